use serde::Serialize;

use crate::config::{ScrollBridgeConfig, ScrollMode};
use crate::model::motion::MotionPreference;
use crate::types::ElementId;

/// Third-party libraries detected on the page at load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Libraries {
    /// Tweening library (`gsap`)
    pub animation: bool,
    /// Scroll-trigger plugin (`ScrollTrigger`)
    pub scroll_trigger: bool,
    /// Smooth-scroll engine (`LocomotiveScroll`)
    pub smooth_scroll: bool,
}

/// Starting state of the fade-and-rise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FromVars {
    pub opacity: f64,
    pub y: f64,
}

/// End state of the fade-and-rise, including its trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToVars {
    pub opacity: f64,
    pub y: f64,
    pub duration: f64,
    pub ease: String,
    #[serde(rename = "scrollTrigger")]
    pub scroll_trigger: TriggerVars,
}

/// Serializable part of the trigger. The trigger element and the scroller are
/// DOM nodes and are attached by the browser layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerVars {
    pub start: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealTween {
    pub element: ElementId,
    pub from: FromVars,
    pub to: ToVars,
}

impl RevealTween {
    pub fn fade_and_rise(element: ElementId, config: &ScrollBridgeConfig) -> Self {
        Self {
            element,
            from: FromVars {
                opacity: 0.0,
                y: config.offset_y,
            },
            to: ToVars {
                opacity: 1.0,
                y: 0.0,
                duration: config.duration_secs,
                ease: config.ease.clone(),
                scroll_trigger: TriggerVars {
                    start: config.start.clone(),
                },
            },
        }
    }
}

/// What the browser layer should wire up once the page has loaded
#[derive(Debug, Clone, PartialEq)]
pub struct BridgePlan {
    /// Virtual scroll container; `None` means native window scrolling
    pub scroller: Option<ElementId>,
    pub tweens: Vec<RevealTween>,
}

/// Decide whether the bridge runs.
///
/// Requires motion, the tweening library and the scroll-trigger plugin. A
/// virtual-scroll build additionally needs the container and the smooth-scroll
/// library; without them it falls back to native scrolling.
pub fn plan(
    motion: MotionPreference,
    scroll_mode: ScrollMode,
    libraries: Libraries,
    container: Option<ElementId>,
    reveal: &[ElementId],
    config: &ScrollBridgeConfig,
) -> Option<BridgePlan> {
    if motion.is_reduced() {
        return None;
    }
    if !(libraries.animation && libraries.scroll_trigger) {
        tracing::debug!("scroll bridge skipped, libraries: {:?}", libraries);
        return None;
    }

    let scroller = match (scroll_mode, container) {
        (ScrollMode::Virtual, Some(container)) if libraries.smooth_scroll => Some(container),
        (ScrollMode::Virtual, container) => {
            tracing::warn!(
                "virtual scrolling unavailable (container: {}, smooth-scroll library: {}), using native scrolling",
                container.is_some(),
                libraries.smooth_scroll
            );
            None
        }
        (ScrollMode::Native, _) => None,
    };

    Some(BridgePlan {
        scroller,
        tweens: reveal
            .iter()
            .map(|id| RevealTween::fade_and_rise(*id, config))
            .collect(),
    })
}
