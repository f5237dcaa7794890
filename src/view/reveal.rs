//! Reveal-on-scroll
//!
//! Each tagged element starts hidden and is flipped to visible the first time
//! its visible fraction crosses the threshold. The flip is one-way: the
//! element is unwatched in the same step, and later callbacks for it are
//! ignored.

use std::collections::{BTreeMap, BTreeSet};

use crate::app::{Effect, Target};
use crate::input::Intersection;
use crate::model::motion::MotionPreference;
use crate::types::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

#[derive(Debug)]
pub struct RevealTracker {
    threshold: f64,
    visible_class: String,
    states: BTreeMap<ElementId, RevealState>,
    watching: BTreeSet<ElementId>,
}

impl RevealTracker {
    /// Track `elements` (duplicates are collapsed); nothing is watched until [`Self::start`]
    pub fn new(threshold: f64, visible_class: impl Into<String>, elements: &[ElementId]) -> Self {
        Self {
            threshold,
            visible_class: visible_class.into(),
            states: elements
                .iter()
                .map(|id| (*id, RevealState::Hidden))
                .collect(),
            watching: BTreeSet::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Begin watching, or with reduced motion reveal everything immediately
    pub fn start(&mut self, motion: MotionPreference) -> Vec<Effect> {
        if motion.is_reduced() {
            let ids: Vec<ElementId> = self.states.keys().copied().collect();
            return ids.into_iter().filter_map(|id| self.reveal(id)).collect();
        }

        let mut effects = Vec::new();
        for (id, state) in &self.states {
            if *state == RevealState::Hidden && self.watching.insert(*id) {
                effects.push(Effect::Observe(*id));
            }
        }
        effects
    }

    /// Handle one visibility-watcher callback
    pub fn on_intersections(&mut self, entries: &[Intersection]) -> Vec<Effect> {
        let mut effects = Vec::new();
        for entry in entries {
            if !self.crossed_threshold(entry) {
                continue;
            }
            if !self.watching.remove(&entry.element) {
                tracing::debug!("ignoring intersection for unwatched element {}", entry.element);
                continue;
            }
            effects.extend(self.reveal(entry.element));
            effects.push(Effect::Unobserve(entry.element));
        }
        effects
    }

    /// The watcher is created with `threshold`, so an intersecting delivery is
    /// the crossing. The reported ratio is not compared again: browsers round
    /// it, and an element taller than the viewport may never reach it.
    fn crossed_threshold(&self, entry: &Intersection) -> bool {
        entry.is_intersecting
    }

    fn reveal(&mut self, id: ElementId) -> Option<Effect> {
        let state = self.states.get_mut(&id)?;
        if *state == RevealState::Visible {
            return None;
        }
        *state = RevealState::Visible;
        tracing::debug!("revealed {}", id);
        Some(Effect::add_class(Target::Element(id), self.visible_class.clone()))
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.states.get(&id).copied()
    }

    pub fn is_watching(&self, id: ElementId) -> bool {
        self.watching.contains(&id)
    }

    /// Number of elements still being watched
    pub fn watching_count(&self) -> usize {
        self.watching.len()
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.states.keys().copied()
    }
}
