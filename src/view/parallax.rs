//! Hover parallax on the hero card
//!
//! The tilt is a pure function of the instantaneous pointer position inside
//! the card's bounding box. Smoothing is left to the CSS transition on the
//! card.

use crate::app::Effect;
use crate::config::ParallaxConfig;
use crate::primitives::css;
use crate::types::{ElementId, Point, Rect};

/// A 3-D tilt: lift plus rotation around the X and Y axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Upward lift in px
    pub lift_px: f64,
    /// Rotation around the X axis in degrees
    pub rotate_x_deg: f64,
    /// Rotation around the Y axis in degrees
    pub rotate_y_deg: f64,
}

impl Tilt {
    /// Resting state: no lift, no rotation
    pub const NEUTRAL: Tilt = Tilt {
        lift_px: 0.0,
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
    };

    /// Tilt for a pointer at `pointer` over a card occupying `rect`.
    ///
    /// `None` when the card has no area (collapsed or not laid out yet).
    pub fn for_pointer(pointer: Point, rect: Rect, config: &ParallaxConfig) -> Option<Tilt> {
        let (nx, ny) = normalized_offset(pointer, rect)?;
        Some(Tilt {
            lift_px: config.lift_px,
            rotate_x_deg: ny * config.gain_deg,
            rotate_y_deg: nx * config.gain_deg,
        })
    }

    /// Inline `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "translateY({}) rotateX({}) rotateY({})",
            css::px(-self.lift_px),
            css::deg(self.rotate_x_deg),
            css::deg(self.rotate_y_deg)
        )
    }
}

/// Pointer offset from the card's center as a fraction of its size, each axis in [-0.5, 0.5]
/// while the pointer is inside the card
pub fn normalized_offset(pointer: Point, rect: Rect) -> Option<(f64, f64)> {
    if !rect.has_area() {
        return None;
    }
    let nx = (pointer.x - rect.left) / rect.width - 0.5;
    let ny = (pointer.y - rect.top) / rect.height - 0.5;
    Some((nx, ny))
}

#[derive(Debug)]
pub struct ParallaxController {
    element: ElementId,
    config: ParallaxConfig,
}

impl ParallaxController {
    pub fn new(element: ElementId, config: ParallaxConfig) -> Self {
        Self { element, config }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn on_pointer_move(&self, pointer: Point, rect: Rect) -> Vec<Effect> {
        match Tilt::for_pointer(pointer, rect, &self.config) {
            Some(tilt) => vec![self.transform(tilt)],
            None => Vec::new(),
        }
    }

    pub fn on_pointer_leave(&self) -> Vec<Effect> {
        vec![self.transform(Tilt::NEUTRAL)]
    }

    fn transform(&self, tilt: Tilt) -> Effect {
        Effect::set_style(self.element, "transform", tilt.to_css())
    }
}
