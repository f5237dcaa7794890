//! Light/dark theme state machine

use crate::config::ScrollMode;

/// The two page themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == ThemeMode::Light
    }
}

/// Theme plus the derived "heavy background animation suppressed" flag.
///
/// The flag only exists in the native scroll build: there the dark theme
/// suppresses the background animation and the light theme restores it.
/// With virtual scrolling the flag is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
    scroll_mode: ScrollMode,
}

impl ThemeState {
    /// Initial state: dark
    pub fn new(scroll_mode: ScrollMode) -> Self {
        Self {
            mode: ThemeMode::Dark,
            scroll_mode,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the theme and return the new mode
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.flipped();
        self.mode
    }

    /// Current value of the suppression flag, `None` when this build does not manage it
    pub fn animations_suppressed(&self) -> Option<bool> {
        match self.scroll_mode {
            ScrollMode::Native => Some(self.mode == ThemeMode::Dark),
            ScrollMode::Virtual => None,
        }
    }
}
