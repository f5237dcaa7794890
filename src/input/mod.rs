//! Input pipeline
//!
//! Browser callbacks are translated into [`PageEvent`]s by the WASM event
//! adapter; the dispatcher in [`crate::app`] turns each event into effects.
//! [`Subscription`] lists the (element, event) registrations the dispatcher
//! asks the browser layer to make.

use crate::services::scroll_bridge::Libraries;
use crate::types::{ElementId, Point, Rect, ViewportSize};

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenTarget {
    Window,
    Element(ElementId),
}

/// One listener registration: a single (target, DOM event) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    /// `mousemove` on the hero card
    HeroMove(ElementId),
    /// `mouseleave` on the hero card
    HeroLeave(ElementId),
    /// `pointermove` on the window, feeding the cursor trail
    TrailMove,
    /// `click` on the mode toggle control
    ModeToggle(ElementId),
    /// `load` on the window, starting the scroll bridge
    PageLoad,
}

impl Subscription {
    pub fn target(&self) -> ListenTarget {
        match *self {
            Subscription::HeroMove(id)
            | Subscription::HeroLeave(id)
            | Subscription::ModeToggle(id) => ListenTarget::Element(id),
            Subscription::TrailMove | Subscription::PageLoad => ListenTarget::Window,
        }
    }

    /// DOM event type to listen for
    pub fn dom_event(&self) -> &'static str {
        match self {
            Subscription::HeroMove(_) => "mousemove",
            Subscription::HeroLeave(_) => "mouseleave",
            Subscription::TrailMove => "pointermove",
            Subscription::ModeToggle(_) => "click",
            Subscription::PageLoad => "load",
        }
    }
}

/// One entry of a visibility-watcher callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element's area, 0.0..=1.0
    pub ratio: f64,
}

impl Intersection {
    pub fn new(element: ElementId, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            element,
            is_intersecting,
            ratio,
        }
    }
}

/// Everything the dispatcher reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Visibility watcher fired for one or more reveal elements
    Intersections(Vec<Intersection>),
    /// Pointer moved over the hero card; `rect` is its current bounding box
    HeroPointerMove { pointer: Point, rect: Rect },
    /// Pointer left the hero card
    HeroPointerLeave,
    /// Pointer moved anywhere in the window
    PointerMove { pointer: Point, viewport: ViewportSize },
    /// Display-frame callback requested by [`crate::app::Effect::RequestFrame`]
    AnimationFrame,
    /// Mode toggle control activated
    ModeToggleClicked,
    /// Page finished loading; carries which third-party libraries are present
    Loaded { libraries: Libraries },
}
