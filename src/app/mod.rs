//! Dispatcher
//!
//! [`Page::setup`] runs once at mount: it evaluates the motion gate, decides
//! which controllers are active and returns the initial effects together with
//! the listener registrations the browser layer has to make.
//! [`Page::handle`] is the single entry point for every later event.

mod effect;

pub use effect::{Effect, Target};

use bitflags::bitflags;

use crate::config::{Config, ScrollMode};
use crate::input::{PageEvent, Subscription};
use crate::model::motion::MotionPreference;
use crate::model::theme::ThemeState;
use crate::services::scroll_bridge::{self, Libraries};
use crate::state::PageState;
use crate::types::{ElementId, ViewportSize};
use crate::view::mode_toggle::{self, ModeToggle};
use crate::view::parallax::ParallaxController;
use crate::view::reveal::RevealTracker;
use crate::view::text_reveal;
use crate::view::trail::TrailController;

bitflags! {
    /// Controllers that were activated at setup
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Controllers: u8 {
        const REVEAL = 0b0000_0001;
        const PARALLAX = 0b0000_0010;
        const TRAIL = 0b0000_0100;
        const TEXT_REVEAL = 0b0000_1000;
        const MODE_TOGGLE = 0b0001_0000;
        /// Waiting for the load event; the bridge itself may still be skipped
        const SCROLL_BRIDGE = 0b0010_0000;
    }
}

/// What the browser layer found in the document at mount
#[derive(Debug, Clone)]
pub struct Environment {
    pub motion: MotionPreference,
    pub viewport: ViewportSize,
    pub locale: String,
    pub reveal: Vec<ElementId>,
    /// Word-stagger elements with their text content
    pub reveal_text: Vec<(ElementId, String)>,
    pub hero: Option<ElementId>,
    pub trail: Option<ElementId>,
    pub mode_toggle: Option<ElementId>,
    pub scroll_container: Option<ElementId>,
    /// Libraries found when the document had already finished loading at
    /// mount; `None` while the `load` event is still to come
    pub already_loaded: Option<Libraries>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            motion: MotionPreference::full(),
            viewport: ViewportSize::default(),
            locale: crate::i18n::DEFAULT_LOCALE.to_string(),
            reveal: Vec::new(),
            reveal_text: Vec::new(),
            hero: None,
            trail: None,
            mode_toggle: None,
            scroll_container: None,
            already_loaded: None,
        }
    }
}

/// Result of [`Page::setup`]
#[derive(Debug)]
pub struct Setup {
    pub page: Page,
    /// Effects to apply immediately, in order
    pub effects: Vec<Effect>,
    /// Listeners to register, one per (target, event) pair
    pub subscriptions: Vec<Subscription>,
    pub controllers: Controllers,
}

#[derive(Debug)]
pub struct Page {
    state: PageState,
}

impl Page {
    /// Set up with the scroll mode compiled into this build
    pub fn setup(config: Config, env: Environment) -> Setup {
        Self::setup_with_scroll_mode(config, env, ScrollMode::BUILD)
    }

    pub fn setup_with_scroll_mode(
        config: Config,
        env: Environment,
        scroll_mode: ScrollMode,
    ) -> Setup {
        let motion = env.motion;
        let desktop = env.viewport.width > config.desktop_min_width;
        let pointer_effects = motion.allows_motion() && desktop;

        let mut effects = Vec::new();
        let mut subscriptions = Vec::new();
        let mut controllers = Controllers::empty();

        // Reveal on scroll
        let mut reveal = RevealTracker::new(
            config.reveal.threshold,
            config.classes.visible.clone(),
            &env.reveal,
        );
        if !env.reveal.is_empty() {
            effects.extend(reveal.start(motion));
            controllers |= Controllers::REVEAL;
        }

        // Hover parallax
        let parallax = match env.hero {
            Some(hero) if pointer_effects => {
                subscriptions.push(Subscription::HeroMove(hero));
                subscriptions.push(Subscription::HeroLeave(hero));
                controllers |= Controllers::PARALLAX;
                Some(ParallaxController::new(hero, config.parallax.clone()))
            }
            _ => None,
        };

        // Cursor trail
        let trail = match env.trail {
            Some(trail) if pointer_effects => {
                subscriptions.push(Subscription::TrailMove);
                controllers |= Controllers::TRAIL;
                Some(TrailController::new(trail, config.trail.clone()))
            }
            Some(trail) => {
                effects.push(Effect::Hide(trail));
                None
            }
            None => None,
        };

        // Staggered text
        for (element, text) in &env.reveal_text {
            effects.push(text_reveal::stage(
                *element,
                text,
                &config.text_reveal,
                motion,
            ));
            controllers |= Controllers::TEXT_REVEAL;
        }

        // Theme
        let theme = ThemeState::new(scroll_mode);
        effects.extend(mode_toggle::startup_effects(&theme, &config.classes));
        let toggle = env.mode_toggle.map(|element| {
            subscriptions.push(Subscription::ModeToggle(element));
            controllers |= Controllers::MODE_TOGGLE;
            ModeToggle::new(element, env.locale.clone())
        });

        // Scroll bridge waits for the full page load
        let loaded = if motion.allows_motion() {
            controllers |= Controllers::SCROLL_BRIDGE;
            if env.already_loaded.is_none() {
                subscriptions.push(Subscription::PageLoad);
            }
            env.already_loaded
        } else {
            None
        };

        tracing::info!(
            "page effects set up: {:?} (reduced motion: {}, viewport width: {}, scroll: {:?})",
            controllers,
            motion.is_reduced(),
            env.viewport.width,
            scroll_mode
        );

        let state = PageState {
            config,
            motion,
            scroll_mode,
            theme,
            reveal,
            parallax,
            trail,
            mode_toggle: toggle,
            scroll_container: env.scroll_container,
            bridge_started: false,
        };

        let mut page = Page { state };
        if let Some(libraries) = loaded {
            effects.extend(page.handle(PageEvent::Loaded { libraries }));
        }

        Setup {
            page,
            effects,
            subscriptions,
            controllers,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Threshold for the visibility watcher, `None` when nothing is watched
    pub fn observer_threshold(&self) -> Option<f64> {
        (self.state.reveal.watching_count() > 0).then(|| self.state.reveal.threshold())
    }

    /// Dispatch one event and return the effects to apply
    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        let state = &mut self.state;
        match event {
            PageEvent::Intersections(entries) => state.reveal.on_intersections(&entries),
            PageEvent::HeroPointerMove { pointer, rect } => state
                .parallax
                .as_ref()
                .map(|parallax| parallax.on_pointer_move(pointer, rect))
                .unwrap_or_default(),
            PageEvent::HeroPointerLeave => state
                .parallax
                .as_ref()
                .map(ParallaxController::on_pointer_leave)
                .unwrap_or_default(),
            PageEvent::PointerMove { pointer, viewport } => state
                .trail
                .as_mut()
                .map(|trail| trail.on_pointer_move(pointer, viewport))
                .unwrap_or_default(),
            PageEvent::AnimationFrame => state
                .trail
                .as_mut()
                .map(TrailController::on_frame)
                .unwrap_or_default(),
            PageEvent::ModeToggleClicked => match &state.mode_toggle {
                Some(toggle) => toggle.on_click(&mut state.theme, &state.config.classes),
                None => Vec::new(),
            },
            PageEvent::Loaded { libraries } => {
                if state.bridge_started {
                    return Vec::new();
                }
                state.bridge_started = true;
                let reveal: Vec<ElementId> = state.reveal.elements().collect();
                scroll_bridge::plan(
                    state.motion,
                    state.scroll_mode,
                    libraries,
                    state.scroll_container,
                    &reveal,
                    &state.config.scroll_bridge,
                )
                .map(|plan| vec![Effect::MountScrollBridge(plan)])
                .unwrap_or_default()
            }
        }
    }

    /// Forget a pending trail frame after the browser layer cancelled it
    pub fn cancel_frame(&mut self) {
        if let Some(trail) = self.state.trail.as_mut() {
            trail.cancel_frame();
        }
    }
}
