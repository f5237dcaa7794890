//! Locale selection for user-visible labels
//!
//! Translations live in `locales/*.yml` and are compiled in by `rust_i18n::i18n!`
//! at the crate root. The browser build picks the locale from
//! `navigator.language` once at mount.

use rust_i18n::t;

use crate::model::theme::ThemeMode;

/// Locales with a translation file under `locales/`
pub const SUPPORTED_LOCALES: &[&str] = &["en", "de"];

/// Fallback locale when the browser language is unknown or unsupported
pub const DEFAULT_LOCALE: &str = "en";

/// Map a BCP 47 language tag (`de-AT`, `en_US`, `EN`) to a supported locale
pub fn locale_for_language(tag: &str) -> &'static str {
    let primary = tag
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|locale| *locale == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Set the process-wide locale from a browser language tag
pub fn set_locale_from_language(tag: &str) -> &'static str {
    let locale = locale_for_language(tag);
    rust_i18n::set_locale(locale);
    locale
}

/// Label for the mode toggle while `active` is the current theme.
///
/// The label names the action the user would take next, so it always names
/// the other theme.
pub fn toggle_label(active: ThemeMode, locale: &str) -> String {
    match active {
        ThemeMode::Light => t!("mode_toggle.to_dark", locale = locale).to_string(),
        ThemeMode::Dark => t!("mode_toggle.to_light", locale = locale).to_string(),
    }
}
