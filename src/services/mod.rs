//! Integrations with code outside this crate

pub mod scroll_bridge;
