//! Effect controllers
//!
//! Each controller owns the state of one visual effect and turns input into
//! [`crate::app::Effect`]s. None of them talks to the browser.

pub mod mode_toggle;
pub mod parallax;
pub mod reveal;
pub mod text_reveal;
pub mod trail;
