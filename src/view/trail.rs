//! Cursor light trail
//!
//! Pointer moves are recorded into a [`FrameSlot`] and written to the trail's
//! two custom properties at most once per display frame.

use crate::app::Effect;
use crate::config::TrailConfig;
use crate::primitives::css;
use crate::primitives::frame_slot::FrameSlot;
use crate::types::{ElementId, PercentPosition, Point, ViewportSize};

#[derive(Debug)]
pub struct TrailController {
    element: ElementId,
    config: TrailConfig,
    pending: FrameSlot<PercentPosition>,
}

impl TrailController {
    pub fn new(element: ElementId, config: TrailConfig) -> Self {
        Self {
            element,
            config,
            pending: FrameSlot::new(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Record the latest pointer position; request a frame if none is pending
    pub fn on_pointer_move(&mut self, pointer: Point, viewport: ViewportSize) -> Vec<Effect> {
        let Some(position) = viewport.to_percent(pointer) else {
            return Vec::new();
        };
        if self.pending.put(position) {
            vec![Effect::RequestFrame]
        } else {
            Vec::new()
        }
    }

    /// Frame callback: apply the most recent position, if any
    pub fn on_frame(&mut self) -> Vec<Effect> {
        match self.pending.drain() {
            Some(position) => vec![
                Effect::set_style(self.element, self.config.x_var.clone(), css::percent(position.x)),
                Effect::set_style(self.element, self.config.y_var.clone(), css::percent(position.y)),
            ],
            None => Vec::new(),
        }
    }

    pub fn frame_pending(&self) -> bool {
        self.pending.is_scheduled()
    }

    /// Forget a pending frame, used when the browser layer cancels it on teardown
    pub fn cancel_frame(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportSize {
        ViewportSize::new(1000.0, 800.0)
    }

    #[test]
    fn test_move_requests_one_frame() {
        let mut trail = TrailController::new(ElementId(0), TrailConfig::default());
        assert_eq!(
            trail.on_pointer_move(Point::new(10.0, 10.0), viewport()),
            vec![Effect::RequestFrame]
        );
        assert!(trail
            .on_pointer_move(Point::new(20.0, 20.0), viewport())
            .is_empty());
        assert!(trail.frame_pending());
    }

    #[test]
    fn test_frame_applies_latest_position() {
        let mut trail = TrailController::new(ElementId(2), TrailConfig::default());
        trail.on_pointer_move(Point::new(10.0, 10.0), viewport());
        trail.on_pointer_move(Point::new(500.0, 200.0), viewport());
        assert_eq!(
            trail.on_frame(),
            vec![
                Effect::set_style(ElementId(2), "--x", "50%"),
                Effect::set_style(ElementId(2), "--y", "25%"),
            ]
        );
        assert!(!trail.frame_pending());
        assert!(trail.on_frame().is_empty());
    }

    #[test]
    fn test_degenerate_viewport_ignored() {
        let mut trail = TrailController::new(ElementId(0), TrailConfig::default());
        assert!(trail
            .on_pointer_move(Point::new(1.0, 1.0), ViewportSize::default())
            .is_empty());
        assert!(!trail.frame_pending());
    }
}
