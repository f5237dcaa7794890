//! Geometry and element handles shared by the controllers and the browser layer

use serde::{Deserialize, Serialize};

/// Handle for a DOM element registered by the browser layer.
///
/// The core never touches elements directly; it names them by the index the
/// browser layer assigned when it queried the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point in client (viewport) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's bounding box in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center point of the box
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Whether the box has a usable (non-zero, finite) area
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Inner size of the browser window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Express a client point as percentages of the viewport.
    ///
    /// Returns `None` for a degenerate viewport so no NaN reaches a style value.
    pub fn to_percent(&self, point: Point) -> Option<PercentPosition> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        Some(PercentPosition {
            x: point.x / self.width * 100.0,
            y: point.y / self.height * 100.0,
        })
    }
}

/// Pointer position normalized to percentages of the viewport, [0,100] on both axes
/// while the pointer is inside the window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentPosition {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(rect.center(), Point::new(200.0, 100.0));
    }

    #[test]
    fn test_rect_has_area() {
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).has_area());
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).has_area());
        assert!(!Rect::new(0.0, 0.0, f64::NAN, 10.0).has_area());
    }

    #[test]
    fn test_viewport_to_percent() {
        let viewport = ViewportSize::new(1000.0, 500.0);
        let pos = viewport.to_percent(Point::new(250.0, 500.0)).unwrap();
        assert_eq!(pos, PercentPosition { x: 25.0, y: 100.0 });

        assert!(ViewportSize::new(0.0, 500.0)
            .to_percent(Point::new(1.0, 1.0))
            .is_none());
    }
}
