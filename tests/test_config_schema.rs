//! JSON Schema and serialization checks for the page effects configuration

use lumen::config::Config;
use schemars::schema_for;

#[test]
fn test_schema_lists_every_section() {
    let schema = serde_json::to_value(schema_for!(Config)).unwrap();
    let properties = schema["properties"].as_object().unwrap();
    for section in [
        "selectors",
        "classes",
        "desktop_min_width",
        "reveal",
        "parallax",
        "trail",
        "text_reveal",
        "scroll_bridge",
        "log_level",
    ] {
        assert!(properties.contains_key(section), "missing {}", section);
    }
    assert!(properties.get("scroll_mode").is_none());
}

#[test]
fn test_default_config_roundtrips() {
    let json = serde_json::to_string(&Config::default()).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), Config::default());
}

#[test]
fn test_default_selectors_and_classes() {
    let config = Config::default();
    insta::assert_snapshot!(
        serde_json::to_string(&config.selectors).unwrap(),
        @r#"{"reveal":".reveal","reveal_text":".reveal-text","hero":".hero-card","trail":".trail","mode_toggle":".mode-toggle","scroll_container":"[data-scroll-container]"}"#
    );
    insta::assert_snapshot!(
        serde_json::to_string(&config.classes).unwrap(),
        @r#"{"visible":"visible","light":"light","animations_suppressed":"no-bg-anim"}"#
    );
}

#[test]
fn test_nested_unknown_field_rejected() {
    let err = Config::from_json(r#"{ "parallax": { "gain": 4 } }"#).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown field"));
}
