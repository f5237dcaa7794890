//! Page state owned by the dispatcher
//!
//! This replaces ambient globals: the theme, the motion preference and every
//! controller's bookkeeping live in one struct mutated only by
//! [`crate::app::Page::handle`].

use crate::config::{Config, ScrollMode};
use crate::model::motion::MotionPreference;
use crate::model::theme::ThemeState;
use crate::types::ElementId;
use crate::view::mode_toggle::ModeToggle;
use crate::view::parallax::ParallaxController;
use crate::view::reveal::RevealTracker;
use crate::view::trail::TrailController;

#[derive(Debug)]
pub struct PageState {
    pub config: Config,
    pub motion: MotionPreference,
    pub scroll_mode: ScrollMode,
    pub theme: ThemeState,
    pub reveal: RevealTracker,
    /// Present only when the hover tilt is active
    pub parallax: Option<ParallaxController>,
    /// Present only when the cursor trail is active
    pub trail: Option<TrailController>,
    pub mode_toggle: Option<ModeToggle>,
    pub scroll_container: Option<ElementId>,
    /// Set once the load event has been handled
    pub bridge_started: bool,
}
