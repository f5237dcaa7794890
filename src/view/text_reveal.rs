//! Staggered word reveal
//!
//! Text is split into words once at mount. Every word becomes its own inline
//! unit with an animation delay growing by a fixed stagger per word. The unit
//! text keeps a trailing space so word spacing survives inline layout.

use crate::app::Effect;
use crate::config::TextRevealConfig;
use crate::model::motion::MotionPreference;
use crate::primitives::css;
use crate::types::ElementId;

/// Inline styles that put a word unit in its final state with the animation off
pub const SETTLED_STYLES: &[(&str, &str)] =
    &[("opacity", "1"), ("transform", "none"), ("animation", "none")];

/// One word unit
#[derive(Debug, Clone, PartialEq)]
pub struct WordSpan {
    /// Word followed by a single space
    pub text: String,
    /// Animation start delay in seconds
    pub delay_secs: f64,
}

impl WordSpan {
    /// `animation-delay` value
    pub fn animation_delay(&self) -> String {
        css::seconds(self.delay_secs)
    }
}

/// Split `text` on whitespace into word units with staggered delays
pub fn split_words(text: &str, stagger_secs: f64) -> Vec<WordSpan> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| WordSpan {
            text: format!("{} ", word),
            delay_secs: index as f64 * stagger_secs,
        })
        .collect()
}

/// Effect replacing `element`'s text with word units.
///
/// Splitting happens regardless of the motion preference so the document has
/// the same shape either way; reduced motion only settles the units.
pub fn stage(
    element: ElementId,
    text: &str,
    config: &TextRevealConfig,
    motion: MotionPreference,
) -> Effect {
    let words = split_words(text, config.stagger_secs);
    tracing::debug!("split {} into {} words", element, words.len());
    Effect::ReplaceWithWords {
        element,
        words,
        settled: motion.is_reduced(),
    }
}
