//! Light/dark mode toggle control

use crate::app::{Effect, Target};
use crate::config::Classes;
use crate::i18n;
use crate::model::theme::ThemeState;
use crate::types::ElementId;

#[derive(Debug)]
pub struct ModeToggle {
    element: ElementId,
    locale: String,
}

impl ModeToggle {
    pub fn new(element: ElementId, locale: impl Into<String>) -> Self {
        Self {
            element,
            locale: locale.into(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Flip the theme, relabel the control and update the body classes
    pub fn on_click(&self, theme: &mut ThemeState, classes: &Classes) -> Vec<Effect> {
        let mode = theme.toggle();
        tracing::debug!("theme switched to {:?}", mode);

        let mut effects = vec![
            Effect::set_class(Target::Body, classes.light.clone(), mode.is_light()),
            Effect::SetText {
                element: self.element,
                text: i18n::toggle_label(mode, &self.locale),
            },
        ];
        if let Some(suppressed) = theme.animations_suppressed() {
            effects.push(Effect::set_class(
                Target::Body,
                classes.animations_suppressed.clone(),
                suppressed,
            ));
        }
        effects
    }
}

/// Effects applied once at mount: in the native scroll build the dark theme
/// starts with background animation suppressed.
pub fn startup_effects(theme: &ThemeState, classes: &Classes) -> Vec<Effect> {
    match theme.animations_suppressed() {
        Some(true) => vec![Effect::add_class(
            Target::Body,
            classes.animations_suppressed.clone(),
        )],
        _ => Vec::new(),
    }
}
