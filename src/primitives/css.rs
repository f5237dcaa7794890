//! Formatting of numbers and values written into inline styles

/// Format a number for CSS: at most three decimals, no trailing zeros, no `-0`.
///
/// `0.08 * 3` is `0.24000000000000002` in floating point; styles should read `0.24`.
pub fn number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    // Normalizes -0.0 as well
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{:.3}", rounded);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// `12.5%`
pub fn percent(value: f64) -> String {
    format!("{}%", number(value))
}

/// `0.16s`
pub fn seconds(value: f64) -> String {
    format!("{}s", number(value))
}

/// `-2px`
pub fn px(value: f64) -> String {
    format!("{}px", number(value))
}

/// `3deg`
pub fn deg(value: f64) -> String {
    format!("{}deg", number(value))
}
