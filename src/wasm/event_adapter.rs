//! Event adapter for converting browser events to page events
//!
//! Each registered [`Subscription`] knows which [`PageEvent`] its DOM event
//! becomes; this module reads the coordinates and measurements the core needs
//! at the moment the event fires.

use js_sys::Array;
use wasm_bindgen::JsCast;
use web_sys::{Event, IntersectionObserverEntry, MouseEvent};

use super::bridge;
use super::dom::Dom;
use crate::input::{Intersection, PageEvent, Subscription};
use crate::types::Point;

/// Client coordinates of a mouse or pointer event
pub fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Convert a DOM event delivered to `subscription`'s listener
pub fn translate(subscription: Subscription, event: &Event, dom: &Dom) -> Option<PageEvent> {
    match subscription {
        Subscription::HeroMove(hero) => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(PageEvent::HeroPointerMove {
                pointer: client_point(mouse),
                rect: dom.rect(hero)?,
            })
        }
        Subscription::HeroLeave(_) => Some(PageEvent::HeroPointerLeave),
        Subscription::TrailMove => {
            // PointerEvent extends MouseEvent
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(PageEvent::PointerMove {
                pointer: client_point(mouse),
                viewport: dom.viewport(),
            })
        }
        Subscription::ModeToggle(_) => Some(PageEvent::ModeToggleClicked),
        Subscription::PageLoad => Some(PageEvent::Loaded {
            libraries: bridge::detect_libraries(),
        }),
    }
}

/// Convert a visibility-watcher callback; entries for unknown elements are dropped
pub fn intersections(entries: &Array, dom: &Dom) -> PageEvent {
    let entries = entries
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .filter_map(|entry| {
            let element = dom.find(&entry.target())?;
            Some(Intersection::new(
                element,
                entry.is_intersecting(),
                entry.intersection_ratio(),
            ))
        })
        .collect();
    PageEvent::Intersections(entries)
}
