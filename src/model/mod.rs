//! Page-session state: the motion preference and the theme
//!
//! Both are plain values; nothing here is persisted across page loads.

pub mod motion;
pub mod theme;
