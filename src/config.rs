//! Page effect configuration
//!
//! Every section carries `#[serde(default)]`, so a page can pass a partial JSON
//! object (or nothing at all) and get the stock behavior for the rest. The
//! scroll mode is deliberately absent: it is fixed at build time through the
//! `smooth-scroll` cargo feature, see [`ScrollMode::BUILD`].

use anyhow::{bail, Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the page scrolls, chosen at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Native window scrolling (the "static" mode)
    Native,
    /// A smooth-scroll library drives a virtual scroll container
    Virtual,
}

impl ScrollMode {
    /// Scroll mode compiled into this build
    pub const BUILD: ScrollMode = if cfg!(feature = "smooth-scroll") {
        ScrollMode::Virtual
    } else {
        ScrollMode::Native
    };

    pub fn is_virtual(self) -> bool {
        self == ScrollMode::Virtual
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSS selectors for the marker elements
    pub selectors: Selectors,

    /// Class names written by the controllers
    pub classes: Classes,

    /// Viewport width (CSS px) above which the pointer effects are enabled
    pub desktop_min_width: f64,

    pub reveal: RevealConfig,
    pub parallax: ParallaxConfig,
    pub trail: TrailConfig,
    pub text_reveal: TextRevealConfig,
    pub scroll_bridge: ScrollBridgeConfig,

    /// `tracing` filter directive for the browser console (e.g. "debug", "lumen=trace")
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: Classes::default(),
            desktop_min_width: 900.0,
            reveal: RevealConfig::default(),
            parallax: ParallaxConfig::default(),
            trail: TrailConfig::default(),
            text_reveal: TextRevealConfig::default(),
            scroll_bridge: ScrollBridgeConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Marker selectors the browser layer queries once at mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub reveal: String,
    pub reveal_text: String,
    pub hero: String,
    pub trail: String,
    pub mode_toggle: String,
    pub scroll_container: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            reveal: ".reveal".to_string(),
            reveal_text: ".reveal-text".to_string(),
            hero: ".hero-card".to_string(),
            trail: ".trail".to_string(),
            mode_toggle: ".mode-toggle".to_string(),
            scroll_container: "[data-scroll-container]".to_string(),
        }
    }
}

/// Classes toggled on elements and on `<body>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Classes {
    /// Added to a reveal element once it has been seen
    pub visible: String,
    /// Present on `<body>` while the light theme is active
    pub light: String,
    /// Present on `<body>` while heavy background animation is suppressed
    pub animations_suppressed: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            visible: "visible".to_string(),
            light: "light".to_string(),
            animations_suppressed: "no-bg-anim".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible before it is revealed
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.18 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ParallaxConfig {
    /// Rotation gain in degrees; the pointer at an edge tilts by half of this
    pub gain_deg: f64,
    /// Upward lift (px) while the pointer is over the card
    pub lift_px: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            gain_deg: 6.0,
            lift_px: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TrailConfig {
    /// Custom property receiving the horizontal position
    pub x_var: String,
    /// Custom property receiving the vertical position
    pub y_var: String,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            x_var: "--x".to_string(),
            y_var: "--y".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct TextRevealConfig {
    /// Delay between consecutive words, in seconds
    pub stagger_secs: f64,
}

impl Default for TextRevealConfig {
    fn default() -> Self {
        Self { stagger_secs: 0.08 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollBridgeConfig {
    /// Starting downward offset (px) of the fade-and-rise effect
    pub offset_y: f64,
    /// Tween duration in seconds
    pub duration_secs: f64,
    /// Easing name understood by the animation library
    pub ease: String,
    /// Scroll-trigger start position ("<element edge> <viewport edge>")
    pub start: String,
}

impl Default for ScrollBridgeConfig {
    fn default() -> Self {
        Self {
            offset_y: 40.0,
            duration_secs: 0.8,
            ease: "power2.out".to_string(),
            start: "top 80%".to_string(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).context("Failed to parse page effects config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controllers cannot work with
    pub fn validate(&self) -> Result<()> {
        let threshold = self.reveal.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            bail!("reveal.threshold must be in (0, 1], got {}", threshold);
        }
        if !(self.desktop_min_width.is_finite() && self.desktop_min_width >= 0.0) {
            bail!(
                "desktop_min_width must be a non-negative number, got {}",
                self.desktop_min_width
            );
        }
        if !self.parallax.gain_deg.is_finite() || !self.parallax.lift_px.is_finite() {
            bail!("parallax gain and lift must be finite");
        }
        if !(self.text_reveal.stagger_secs.is_finite() && self.text_reveal.stagger_secs >= 0.0) {
            bail!(
                "text_reveal.stagger_secs must be non-negative, got {}",
                self.text_reveal.stagger_secs
            );
        }
        if !(self.scroll_bridge.duration_secs.is_finite() && self.scroll_bridge.duration_secs > 0.0)
        {
            bail!(
                "scroll_bridge.duration_secs must be positive, got {}",
                self.scroll_bridge.duration_secs
            );
        }
        for (name, var) in [("trail.x_var", &self.trail.x_var), ("trail.y_var", &self.trail.y_var)] {
            if !var.starts_with("--") {
                bail!("{} must be a custom property (start with \"--\"), got {:?}", name, var);
            }
        }
        Ok(())
    }
}
