//! End-to-end behavior of the page effects through the dispatcher

mod common;

use common::harness::*;
use lumen::app::{Controllers, Environment};
use lumen::config::{Config, ScrollMode};
use lumen::input::Subscription;
use lumen::model::motion::MotionPreference;
use lumen::model::theme::ThemeMode;
use lumen::services::scroll_bridge::Libraries;
use lumen::types::{Point, Rect};
use lumen::view::reveal::RevealState;

const ALL_LIBRARIES: Libraries = Libraries {
    animation: true,
    scroll_trigger: true,
    smooth_scroll: true,
};

fn hero_rect() -> Rect {
    Rect::new(100.0, 100.0, 400.0, 200.0)
}

#[test]
fn test_reveal_is_one_way() {
    let mut harness = PageHarness::landing_page();
    assert!(harness.document.observed.contains(&REVEAL_A));
    assert!(!harness.document.has_class(REVEAL_A, "visible"));

    // Outside the viewport nothing happens
    harness.intersect(REVEAL_A, 0.0);
    assert!(!harness.document.has_class(REVEAL_A, "visible"));

    harness.intersect(REVEAL_A, 0.5);
    assert!(harness.document.has_class(REVEAL_A, "visible"));
    assert!(!harness.document.observed.contains(&REVEAL_A));

    // Leaving the viewport never hides it again
    harness.intersect(REVEAL_A, 0.0);
    assert!(harness.document.has_class(REVEAL_A, "visible"));
    assert_eq!(
        harness.page().state().reveal.state(REVEAL_A),
        Some(RevealState::Visible)
    );

    // The other element is still pending
    assert!(!harness.document.has_class(REVEAL_B, "visible"));
    assert!(harness.page().state().reveal.is_watching(REVEAL_B));
}

#[test]
fn test_reduced_motion_reveals_everything_without_watching() {
    let env = Environment {
        motion: MotionPreference::reduced(),
        ..PageHarness::landing_env(1280.0)
    };
    let harness = PageHarness::new(Config::default(), env, ScrollMode::Native);

    assert!(harness.document.has_class(REVEAL_A, "visible"));
    assert!(harness.document.has_class(REVEAL_B, "visible"));
    assert!(harness.document.observed.is_empty());
    assert_eq!(harness.page().observer_threshold(), None);

    // No pointer effects and no scroll bridge
    assert!(!harness.controllers.contains(Controllers::PARALLAX));
    assert!(!harness.controllers.contains(Controllers::TRAIL));
    assert!(!harness.subscriptions.contains(&Subscription::PageLoad));
    assert!(harness.document.hidden.contains(&TRAIL));

    // Words are still split, but settled
    assert_eq!(harness.document.word_text(HEADLINE), "Hello world foo ");
    assert!(harness.document.words[&HEADLINE]
        .iter()
        .all(|(_, delay)| delay.is_none()));
}

#[test]
fn test_hero_tilt_center_and_corner() {
    let mut harness = PageHarness::landing_page();

    harness.hover(hero_rect().center(), hero_rect());
    assert_eq!(
        harness.document.style(HERO, "transform"),
        Some("translateY(-2px) rotateX(0deg) rotateY(0deg)")
    );

    harness.hover(Point::new(100.0, 100.0), hero_rect());
    assert_eq!(
        harness.document.style(HERO, "transform"),
        Some("translateY(-2px) rotateX(-3deg) rotateY(-3deg)")
    );

    harness.hover(Point::new(500.0, 300.0), hero_rect());
    assert_eq!(
        harness.document.style(HERO, "transform"),
        Some("translateY(-2px) rotateX(3deg) rotateY(3deg)")
    );

    harness.dispatch(lumen::input::PageEvent::HeroPointerLeave);
    assert_eq!(
        harness.document.style(HERO, "transform"),
        Some("translateY(0px) rotateX(0deg) rotateY(0deg)")
    );
}

#[test]
fn test_narrow_viewport_disables_pointer_effects() {
    let harness = PageHarness::new(
        Config::default(),
        PageHarness::landing_env(900.0),
        ScrollMode::Native,
    );
    assert!(!harness.controllers.contains(Controllers::PARALLAX));
    assert!(!harness.controllers.contains(Controllers::TRAIL));
    assert!(harness.document.hidden.contains(&TRAIL));
    assert!(harness.controllers.contains(Controllers::REVEAL));
    assert!(harness.controllers.contains(Controllers::MODE_TOGGLE));
}

#[test]
fn test_trail_coalesces_moves_into_one_frame() {
    let mut harness = PageHarness::landing_page();

    for i in 0..100 {
        harness.move_pointer(Point::new(i as f64 * 10.0, i as f64 * 5.0));
    }
    assert_eq!(harness.frames_requested, 1);
    assert_eq!(harness.document.style(TRAIL, "--x"), None);

    harness.run_frames();
    assert_eq!(harness.document.style(TRAIL, "--x"), Some("99%"));
    assert_eq!(harness.document.style(TRAIL, "--y"), Some("99%"));

    // A frame with nothing new changes nothing and schedules nothing
    harness.dispatch(lumen::input::PageEvent::AnimationFrame);
    assert_eq!(harness.frames_requested, 1);

    harness.move_pointer(Point::new(500.0, 250.0));
    assert_eq!(harness.frames_requested, 2);
    harness.run_frames();
    assert_eq!(harness.document.style(TRAIL, "--x"), Some("50%"));
    assert_eq!(harness.document.style(TRAIL, "--y"), Some("50%"));
}

#[test]
fn test_text_reveal_staggers_words() {
    let harness = PageHarness::landing_page();
    let words = &harness.document.words[&HEADLINE];
    let delays: Vec<&str> = words
        .iter()
        .filter_map(|(_, delay)| delay.as_deref())
        .collect();
    assert_eq!(delays, vec!["0s", "0.08s", "0.16s"]);
    assert_eq!(harness.document.word_text(HEADLINE), "Hello world foo ");
}

#[test]
fn test_toggle_twice_restores_theme_and_label() {
    let mut harness = PageHarness::landing_page();
    assert!(harness.document.body_classes.contains("no-bg-anim"));
    assert!(!harness.document.body_classes.contains("light"));

    harness.click_toggle();
    assert!(harness.document.body_classes.contains("light"));
    assert!(!harness.document.body_classes.contains("no-bg-anim"));
    assert_eq!(harness.document.text[&TOGGLE], "Dark mode");
    assert_eq!(harness.page().state().theme.mode(), ThemeMode::Light);

    harness.click_toggle();
    assert!(!harness.document.body_classes.contains("light"));
    assert!(harness.document.body_classes.contains("no-bg-anim"));
    assert_eq!(harness.document.text[&TOGGLE], "Light mode");
    assert_eq!(harness.page().state().theme.mode(), ThemeMode::Dark);
}

#[test]
fn test_toggle_label_follows_locale() {
    let env = Environment {
        locale: "de".to_string(),
        ..PageHarness::landing_env(1280.0)
    };
    let mut harness = PageHarness::new(Config::default(), env, ScrollMode::Native);
    harness.click_toggle();
    assert_eq!(harness.document.text[&TOGGLE], "Dunkler Modus");
}

#[test]
fn test_virtual_scroll_leaves_suppression_alone() {
    let mut harness = PageHarness::new(
        Config::default(),
        PageHarness::landing_env(1280.0),
        ScrollMode::Virtual,
    );
    assert!(harness.document.body_classes.is_empty());
    harness.click_toggle();
    assert_eq!(
        harness.document.body_classes.iter().collect::<Vec<_>>(),
        vec!["light"]
    );
}

#[test]
fn test_load_mounts_bridge_once() {
    let mut harness = PageHarness::landing_page();
    harness.load(ALL_LIBRARIES);
    harness.load(ALL_LIBRARIES);

    assert_eq!(harness.document.bridges.len(), 1);
    let plan = &harness.document.bridges[0];
    assert_eq!(plan.scroller, None);
    let targets: Vec<_> = plan.tweens.iter().map(|tween| tween.element).collect();
    assert_eq!(targets, vec![REVEAL_A, REVEAL_B]);
}

#[test]
fn test_virtual_bridge_binds_container() {
    let mut harness = PageHarness::new(
        Config::default(),
        PageHarness::landing_env(1280.0),
        ScrollMode::Virtual,
    );
    harness.load(ALL_LIBRARIES);
    assert_eq!(harness.document.bridges[0].scroller, Some(CONTAINER));
}

#[test]
fn test_missing_libraries_skip_bridge() {
    let mut harness = PageHarness::landing_page();
    harness.load(Libraries {
        animation: true,
        ..Libraries::default()
    });
    assert!(harness.document.bridges.is_empty());
    // Reveal keeps working on its own
    harness.intersect(REVEAL_B, 1.0);
    assert!(harness.document.has_class(REVEAL_B, "visible"));
}

#[test]
fn test_empty_page_sets_up_nothing_but_theme() {
    let harness = PageHarness::new(
        Config::default(),
        Environment::default(),
        ScrollMode::Native,
    );
    assert_eq!(harness.controllers, Controllers::SCROLL_BRIDGE);
    assert_eq!(harness.subscriptions, vec![Subscription::PageLoad]);
    assert!(harness.document.body_classes.contains("no-bg-anim"));
}

#[test]
fn test_already_loaded_document_mounts_bridge_without_listener() {
    let env = Environment {
        already_loaded: Some(ALL_LIBRARIES),
        ..PageHarness::landing_env(1280.0)
    };
    let mut harness = PageHarness::new(Config::default(), env, ScrollMode::Native);

    assert!(!harness.subscriptions.contains(&Subscription::PageLoad));
    assert!(harness.controllers.contains(Controllers::SCROLL_BRIDGE));
    assert_eq!(harness.document.bridges.len(), 1);
    let targets: Vec<_> = harness.document.bridges[0]
        .tweens
        .iter()
        .map(|tween| tween.element)
        .collect();
    assert_eq!(targets, vec![REVEAL_A, REVEAL_B]);

    harness.load(ALL_LIBRARIES);
    assert_eq!(harness.document.bridges.len(), 1);
}

#[test]
fn test_already_loaded_with_reduced_motion_skips_bridge() {
    let env = Environment {
        motion: MotionPreference::reduced(),
        already_loaded: Some(ALL_LIBRARIES),
        ..PageHarness::landing_env(1280.0)
    };
    let harness = PageHarness::new(Config::default(), env, ScrollMode::Native);
    assert!(harness.document.bridges.is_empty());
    assert!(!harness.controllers.contains(Controllers::SCROLL_BRIDGE));
}

#[test]
fn test_tall_reveal_element_is_revealed() {
    let mut harness = PageHarness::landing_page();
    // The browser delivers the crossing with whatever ratio the element can reach
    harness.intersect(REVEAL_B, 0.15);
    assert!(harness.document.has_class(REVEAL_B, "visible"));
    assert!(!harness.document.observed.contains(&REVEAL_B));
}
