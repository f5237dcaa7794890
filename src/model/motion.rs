//! Reduced-motion preference
//!
//! Read once at mount and never re-evaluated. A browser that does not
//! understand the media query reports "no preference", so absence means
//! motion is allowed.

/// Media query the browser layer evaluates at mount
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    reduced: bool,
}

impl MotionPreference {
    /// Motion allowed
    pub fn full() -> Self {
        Self { reduced: false }
    }

    /// Motion reduced: effects jump straight to their final state
    pub fn reduced() -> Self {
        Self { reduced: true }
    }

    /// Build from the result of the media query, `None` when unsupported
    pub fn from_query(matches: Option<bool>) -> Self {
        Self {
            reduced: matches.unwrap_or(false),
        }
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub fn allows_motion(&self) -> bool {
        !self.reduced
    }
}
