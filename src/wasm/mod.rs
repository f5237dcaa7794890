//! WASM browser build module
//!
//! This module provides the entry point for running the page effects in a
//! browser. The page calls `mount()` once the document is parsed and keeps the
//! returned [`LumenPage`] handle for as long as the effects should run.
//!
//! The runtime owns every JS callback it hands to the browser; callbacks only
//! hold a weak reference back to it, so dropping the handle frees everything.

pub mod bridge;
pub mod console;
pub mod dom;
pub mod event_adapter;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::{anyhow, Context, Result};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, IntersectionObserver, IntersectionObserverInit};

use crate::app::{Controllers, Effect, Environment, Page, Setup};
use crate::config::Config;
use crate::i18n;
use crate::input::{ListenTarget, PageEvent, Subscription};
use crate::model::motion::MotionPreference;
use crate::services::scroll_bridge::{teardown_step, BridgePlan};
use crate::types::ElementId;
use bridge::ScrollBridge;
use dom::Dom;

/// Convert a thrown JS value into an error
pub(crate) fn js_err(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{:?}", value),
    }
}

/// One registered DOM listener
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

struct Runtime {
    this: Weak<Runtime>,
    dom: Dom,
    page: RefCell<Page>,
    controllers: Controllers,
    observer_threshold: Option<f64>,
    observer: RefCell<Option<IntersectionObserver>>,
    observer_callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    frame_callback: Closure<dyn FnMut()>,
    frame_handle: Cell<Option<i32>>,
    listeners: RefCell<Vec<Listener>>,
    bridge: RefCell<Option<ScrollBridge>>,
}

impl Runtime {
    fn mount(config: Config) -> Result<Rc<Self>> {
        let mut dom = Dom::new()?;

        let motion = MotionPreference::from_query(dom.reduced_motion());
        let locale = dom
            .language()
            .map(|language| i18n::set_locale_from_language(&language))
            .unwrap_or(i18n::DEFAULT_LOCALE);

        let selectors = config.selectors.clone();
        let reveal = dom.query_all(&selectors.reveal);
        let reveal_text = dom
            .query_all(&selectors.reveal_text)
            .into_iter()
            .map(|id| (id, dom.text(id)))
            .collect();
        let env = Environment {
            motion,
            viewport: dom.viewport(),
            locale: locale.to_string(),
            reveal,
            reveal_text,
            hero: dom.query_one(&selectors.hero),
            trail: dom.query_one(&selectors.trail),
            mode_toggle: dom.query_one(&selectors.mode_toggle),
            scroll_container: dom.query_one(&selectors.scroll_container),
            already_loaded: dom.is_loaded().then(bridge::detect_libraries),
        };

        let Setup {
            page,
            effects,
            subscriptions,
            controllers,
        } = Page::setup(config, env);
        let observer_threshold = page.observer_threshold();

        let runtime = Rc::new_cyclic(|weak: &Weak<Runtime>| Runtime {
            this: weak.clone(),
            dom,
            page: RefCell::new(page),
            controllers,
            observer_threshold,
            observer: RefCell::new(None),
            observer_callback: observer_callback(weak.clone()),
            frame_callback: frame_callback(weak.clone()),
            frame_handle: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
            bridge: RefCell::new(None),
        });

        runtime.apply(effects);

        for subscription in subscriptions {
            if let Err(e) = runtime.listen(subscription) {
                tracing::warn!("could not listen for {:?}: {:#}", subscription, e);
            }
        }

        Ok(runtime)
    }

    /// Run one event through the dispatcher and apply the resulting effects
    fn dispatch(&self, event: PageEvent) {
        let effects = self.page.borrow_mut().handle(event);
        self.apply(effects);
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            let result = match &effect {
                Effect::Observe(id) => self.observe(*id),
                Effect::Unobserve(id) => self.unobserve(*id),
                Effect::RequestFrame => self.request_frame(),
                Effect::MountScrollBridge(plan) => self.mount_bridge(plan),
                other => self.dom.apply(other),
            };
            if let Err(e) = result {
                tracing::warn!("failed to apply {:?}: {:#}", effect, e);
            }
        }
    }

    fn listen(&self, subscription: Subscription) -> Result<()> {
        let target: EventTarget = match subscription.target() {
            ListenTarget::Window => self.dom.window().clone().into(),
            ListenTarget::Element(id) => self
                .dom
                .element(id)
                .with_context(|| format!("element {} is not registered", id))?
                .clone()
                .into(),
        };

        let weak = self.weak();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(runtime) = weak.upgrade() else {
                return;
            };
            if let Some(page_event) = event_adapter::translate(subscription, &event, &runtime.dom)
            {
                runtime.dispatch(page_event);
            }
        });

        let event = subscription.dom_event();
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.borrow_mut().push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }

    fn observe(&self, id: ElementId) -> Result<()> {
        let element = self
            .dom
            .element(id)
            .with_context(|| format!("element {} is not registered", id))?;

        let mut observer = self.observer.borrow_mut();
        if observer.is_none() {
            let threshold = self
                .observer_threshold
                .context("no reveal threshold configured")?;
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(threshold));
            let created = IntersectionObserver::new_with_options(
                self.observer_callback.as_ref().unchecked_ref(),
                &init,
            )
            .map_err(js_err)?;
            *observer = Some(created);
        }
        if let Some(observer) = observer.as_ref() {
            observer.observe(element);
        }
        Ok(())
    }

    fn unobserve(&self, id: ElementId) -> Result<()> {
        if let (Some(observer), Some(element)) = (self.observer.borrow().as_ref(), self.dom.element(id)) {
            observer.unobserve(element);
        }
        Ok(())
    }

    fn request_frame(&self) -> Result<()> {
        let handle = self
            .dom
            .window()
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.frame_handle.set(Some(handle));
        Ok(())
    }

    fn mount_bridge(&self, plan: &BridgePlan) -> Result<()> {
        let bridge = ScrollBridge::mount(plan, &self.dom)?;
        if let Some(mut previous) = self.bridge.borrow_mut().replace(bridge) {
            previous.destroy();
        }
        Ok(())
    }

    fn weak(&self) -> Weak<Runtime> {
        self.this.clone()
    }

    /// Remove listeners, stop watching and cancel pending work
    fn teardown(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            teardown_step(
                "remove listener",
                listener
                    .target
                    .remove_event_listener_with_callback(
                        listener.event,
                        listener.callback.as_ref().unchecked_ref(),
                    )
                    .map_err(js_err),
            );
        }
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        if let Some(handle) = self.frame_handle.take() {
            teardown_step(
                "cancel animation frame",
                self.dom.window().cancel_animation_frame(handle).map_err(js_err),
            );
            self.page.borrow_mut().cancel_frame();
        }
        if let Some(mut bridge) = self.bridge.borrow_mut().take() {
            bridge.destroy();
        }
        tracing::debug!("page effects torn down");
    }
}

fn observer_callback(weak: Weak<Runtime>) -> Closure<dyn FnMut(Array, IntersectionObserver)> {
    Closure::new(move |entries: Array, _observer: IntersectionObserver| {
        if let Some(runtime) = weak.upgrade() {
            let event = event_adapter::intersections(&entries, &runtime.dom);
            runtime.dispatch(event);
        }
    })
}

fn frame_callback(weak: Weak<Runtime>) -> Closure<dyn FnMut()> {
    Closure::new(move || {
        if let Some(runtime) = weak.upgrade() {
            runtime.frame_handle.set(None);
            runtime.dispatch(PageEvent::AnimationFrame);
        }
    })
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
}

/// Handle returned by [`mount`]; dropping or destroying it removes every effect hook
#[wasm_bindgen]
pub struct LumenPage {
    runtime: Option<Rc<Runtime>>,
}

#[wasm_bindgen]
impl LumenPage {
    /// Stop all effects and release the browser callbacks
    pub fn destroy(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.teardown();
        }
    }

    /// Bit set of the controllers that were activated at mount
    pub fn controllers(&self) -> u8 {
        self.runtime
            .as_ref()
            .map(|runtime| runtime.controllers.bits())
            .unwrap_or(0)
    }

    /// Currently active theme, "dark" or "light"
    pub fn theme(&self) -> String {
        let light = self
            .runtime
            .as_ref()
            .map(|runtime| runtime.page.borrow().state().theme.mode().is_light())
            .unwrap_or(false);
        let mode = if light { "light" } else { "dark" };
        mode.to_string()
    }
}

impl Drop for LumenPage {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the page effects on the current document.
///
/// `config_json` is an optional, possibly partial, JSON configuration. An
/// invalid configuration is reported on the console and the defaults are used.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<LumenPage, JsValue> {
    let (config, config_error) = match config_json.as_deref().map(Config::from_json) {
        None => (Config::default(), None),
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (Config::default(), Some(e)),
    };

    console::init(&config.log_level);
    if let Some(e) = config_error {
        tracing::warn!("ignoring page effects config: {:#}", e);
    }

    let runtime = Runtime::mount(config).map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    Ok(LumenPage {
        runtime: Some(runtime),
    })
}
