//! In-memory page harness
//!
//! Drives a [`Page`] the way the browser layer does and applies its effects to
//! a small fake document, so tests can assert on resulting classes, styles and
//! text instead of on raw effect lists.

use std::collections::{BTreeMap, BTreeSet};

use lumen::app::{Controllers, Effect, Environment, Page, Setup, Target};
use lumen::config::{Config, ScrollMode};
use lumen::input::{Intersection, PageEvent, Subscription};
use lumen::services::scroll_bridge::{BridgePlan, Libraries};
use lumen::types::{ElementId, Point, Rect, ViewportSize};

/// Element ids used by [`PageHarness::landing_page`]
pub const REVEAL_A: ElementId = ElementId(0);
pub const REVEAL_B: ElementId = ElementId(1);
pub const HEADLINE: ElementId = ElementId(2);
pub const HERO: ElementId = ElementId(3);
pub const TRAIL: ElementId = ElementId(4);
pub const TOGGLE: ElementId = ElementId(5);
pub const CONTAINER: ElementId = ElementId(6);

/// What the fake document looks like after the effects so far
#[derive(Debug, Default)]
pub struct FakeDocument {
    pub body_classes: BTreeSet<String>,
    pub classes: BTreeMap<ElementId, BTreeSet<String>>,
    pub styles: BTreeMap<(ElementId, String), String>,
    pub text: BTreeMap<ElementId, String>,
    pub hidden: BTreeSet<ElementId>,
    /// Word units per element as (text, animation-delay or None when settled)
    pub words: BTreeMap<ElementId, Vec<(String, Option<String>)>>,
    pub observed: BTreeSet<ElementId>,
    pub bridges: Vec<BridgePlan>,
}

impl FakeDocument {
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes
            .get(&id)
            .map(|classes| classes.contains(class))
            .unwrap_or(false)
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.styles
            .get(&(id, property.to_string()))
            .map(String::as_str)
    }

    /// Concatenated text of the word units of `id`
    pub fn word_text(&self, id: ElementId) -> String {
        self.words
            .get(&id)
            .map(|words| words.iter().map(|(text, _)| text.as_str()).collect())
            .unwrap_or_default()
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetClass {
                target,
                class,
                present,
            } => {
                let set = match target {
                    Target::Body => &mut self.body_classes,
                    Target::Element(id) => self.classes.entry(id).or_default(),
                };
                if present {
                    set.insert(class);
                } else {
                    set.remove(&class);
                }
            }
            Effect::SetStyle {
                element,
                property,
                value,
            } => {
                self.styles.insert((element, property), value);
            }
            Effect::SetText { element, text } => {
                self.text.insert(element, text);
            }
            Effect::Hide(element) => {
                self.hidden.insert(element);
            }
            Effect::ReplaceWithWords {
                element,
                words,
                settled,
            } => {
                let units = words
                    .iter()
                    .map(|word| {
                        let delay = (!settled).then(|| word.animation_delay());
                        (word.text.clone(), delay)
                    })
                    .collect();
                self.words.insert(element, units);
            }
            Effect::Observe(element) => {
                self.observed.insert(element);
            }
            Effect::Unobserve(element) => {
                self.observed.remove(&element);
            }
            Effect::RequestFrame => unreachable!("frames are counted by the harness"),
            Effect::MountScrollBridge(plan) => self.bridges.push(plan),
        }
    }
}

pub struct PageHarness {
    page: Page,
    pub document: FakeDocument,
    pub subscriptions: Vec<Subscription>,
    pub controllers: Controllers,
    /// Frame requests not yet delivered
    pub pending_frames: usize,
    /// Total frame requests seen
    pub frames_requested: usize,
}

impl PageHarness {
    pub fn new(config: Config, env: Environment, scroll_mode: ScrollMode) -> Self {
        super::tracing::init_tracing_from_env();
        let Setup {
            page,
            effects,
            subscriptions,
            controllers,
        } = Page::setup_with_scroll_mode(config, env, scroll_mode);
        let mut harness = Self {
            page,
            document: FakeDocument::default(),
            subscriptions,
            controllers,
            pending_frames: 0,
            frames_requested: 0,
        };
        harness.apply(effects);
        harness
    }

    /// Environment of a typical landing page: two reveal cards, a headline,
    /// a hero card, a trail layer, a toggle and a scroll container
    pub fn landing_env(viewport_width: f64) -> Environment {
        Environment {
            viewport: ViewportSize::new(viewport_width, 800.0),
            reveal: vec![REVEAL_A, REVEAL_B],
            reveal_text: vec![(HEADLINE, "Hello world foo".to_string())],
            hero: Some(HERO),
            trail: Some(TRAIL),
            mode_toggle: Some(TOGGLE),
            scroll_container: Some(CONTAINER),
            ..Environment::default()
        }
    }

    pub fn landing_page() -> Self {
        Self::new(
            Config::default(),
            Self::landing_env(1280.0),
            ScrollMode::Native,
        )
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        let effects = self.page.handle(event);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if effect == Effect::RequestFrame {
                self.pending_frames += 1;
                self.frames_requested += 1;
            } else {
                self.document.apply(effect);
            }
        }
    }

    /// Deliver every pending frame callback
    pub fn run_frames(&mut self) {
        while self.pending_frames > 0 {
            self.pending_frames -= 1;
            self.dispatch(PageEvent::AnimationFrame);
        }
    }

    pub fn intersect(&mut self, element: ElementId, ratio: f64) {
        self.dispatch(PageEvent::Intersections(vec![Intersection::new(
            element,
            ratio > 0.0,
            ratio,
        )]));
    }

    pub fn hover(&mut self, pointer: Point, rect: Rect) {
        self.dispatch(PageEvent::HeroPointerMove { pointer, rect });
    }

    pub fn move_pointer(&mut self, pointer: Point) {
        let viewport = ViewportSize::new(1000.0, 500.0);
        self.dispatch(PageEvent::PointerMove { pointer, viewport });
    }

    pub fn click_toggle(&mut self) {
        self.dispatch(PageEvent::ModeToggleClicked);
    }

    pub fn load(&mut self, libraries: Libraries) {
        self.dispatch(PageEvent::Loaded { libraries });
    }
}
