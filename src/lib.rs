// Page effects library - exposes all core modules for testing

// Initialize i18n with translations from locales/ directory
rust_i18n::i18n!("locales", fallback = "en");

pub mod i18n;

// Core types and config are always available (needed for schema generation)
pub mod config;
pub mod types;

// Pure controllers and the dispatcher, compiled and tested natively
pub mod app;
pub mod input;
pub mod model;
pub mod primitives;
pub mod services;
pub mod state;
pub mod view;

// WASM browser build modules
#[cfg(feature = "wasm")]
pub mod wasm;
