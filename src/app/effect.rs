//! DOM side effects produced by the dispatcher
//!
//! The core never mutates the document itself. Every handler returns a list
//! of [`Effect`]s which the browser layer applies in order.

use crate::services::scroll_bridge::BridgePlan;
use crate::types::ElementId;
use crate::view::text_reveal::WordSpan;

/// Element a class change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Body,
    Element(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add (`present: true`) or remove a class
    SetClass {
        target: Target,
        class: String,
        present: bool,
    },
    /// Set an inline style property (regular or custom `--var`)
    SetStyle {
        element: ElementId,
        property: String,
        value: String,
    },
    /// Replace an element's text content
    SetText { element: ElementId, text: String },
    /// Hide an element outright (`display: none`)
    Hide(ElementId),
    /// Replace an element's content with one inline unit per word.
    ///
    /// When `settled` is set the units are written in their final state with
    /// the animation disabled instead of carrying their delays.
    ReplaceWithWords {
        element: ElementId,
        words: Vec<WordSpan>,
        settled: bool,
    },
    /// Start watching a reveal element for visibility
    Observe(ElementId),
    /// Stop watching a reveal element, permanently
    Unobserve(ElementId),
    /// Schedule one display-frame callback
    RequestFrame,
    /// Wire the third-party scroll libraries according to the plan
    MountScrollBridge(BridgePlan),
}

impl Effect {
    pub fn add_class(target: Target, class: impl Into<String>) -> Self {
        Effect::SetClass {
            target,
            class: class.into(),
            present: true,
        }
    }

    pub fn set_class(target: Target, class: impl Into<String>, present: bool) -> Self {
        Effect::SetClass {
            target,
            class: class.into(),
            present,
        }
    }

    pub fn set_style(
        element: ElementId,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Effect::SetStyle {
            element,
            property: property.into(),
            value: value.into(),
        }
    }
}
