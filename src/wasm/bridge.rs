//! JS side of the scroll bridge
//!
//! Talks to `gsap`, `ScrollTrigger` and `LocomotiveScroll` through
//! `js_sys::Reflect`, so the libraries stay optional: when a global is missing
//! the bridge is simply not mounted.

use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

use super::dom::{viewport_of, Dom};
use super::js_err;
use crate::services::scroll_bridge::{
    bind_virtual, refresh_all, teardown_step, tolerate_registration, unbind_virtual, BridgePlan,
    Libraries, PinType, ScrollProxy, ScrollTriggerHost, SmoothScroller,
};

const ANIMATION_GLOBAL: &str = "gsap";
const SCROLL_TRIGGER_GLOBAL: &str = "ScrollTrigger";
const SMOOTH_SCROLL_GLOBAL: &str = "LocomotiveScroll";

/// Look up a global, treating `undefined` and `null` as absent
fn global(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Presence check for the optional libraries
pub fn detect_libraries() -> Libraries {
    Libraries {
        animation: global(ANIMATION_GLOBAL).is_some(),
        scroll_trigger: global(SCROLL_TRIGGER_GLOBAL).is_some(),
        smooth_scroll: global(SMOOTH_SCROLL_GLOBAL).is_some(),
    }
}

/// Call `target[method](...args)`
fn call(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| anyhow!("{} is not a function", method))?;
    let array = Array::new();
    for arg in args {
        array.push(arg);
    }
    function.apply(target, &array).map_err(js_err)
}

/// Follow a property path, `None` as soon as a step is missing
fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter().try_fold(root.clone(), |value, key| {
        Reflect::get(&value, &JsValue::from_str(key))
            .ok()
            .filter(|next| !next.is_undefined() && !next.is_null())
    })
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map_err(js_err)
        .map(|_| ())
}

/// Serialize a vars struct into a plain JS object
fn to_js_object<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value).context("Failed to serialize tween vars")?;
    js_sys::JSON::parse(&json).map_err(js_err)
}

/// [`SmoothScroller`] over a `LocomotiveScroll` instance
pub struct LocomotiveScroller {
    instance: JsValue,
}

impl SmoothScroller for LocomotiveScroller {
    fn scroll_offset(&self) -> f64 {
        get_path(&self.instance, &["scroll", "instance", "scroll", "y"])
            .and_then(|y| y.as_f64())
            .unwrap_or(0.0)
    }

    fn seek_immediate(&self, offset: f64) {
        let options: JsValue = Object::new().into();
        let result = set(&options, "duration", &JsValue::from_f64(0.0))
            .and_then(|_| set(&options, "disableLerp", &JsValue::TRUE))
            .and_then(|_| {
                call(
                    &self.instance,
                    "scrollTo",
                    &[&JsValue::from_f64(offset), &options],
                )
            });
        if let Err(e) = result {
            tracing::warn!("smooth-scroll seek failed: {:#}", e);
        }
    }

    fn update(&self) {
        if let Err(e) = call(&self.instance, "update", &[]) {
            tracing::warn!("smooth-scroll update failed: {:#}", e);
        }
    }

    fn destroy(&self) -> Result<()> {
        call(&self.instance, "destroy", &[]).map(|_| ())
    }
}

/// [`ScrollTriggerHost`] over the `ScrollTrigger` global and one container
struct TriggerHost {
    scroll_trigger: JsValue,
    container: JsValue,
    proxy_options: JsValue,
    on_refresh: JsValue,
}

impl ScrollTriggerHost for TriggerHost {
    fn install_proxy(&self) -> Result<()> {
        call(
            &self.scroll_trigger,
            "scrollerProxy",
            &[&self.container, &self.proxy_options],
        )
        .map(|_| ())
    }

    fn remove_proxy(&self) -> Result<()> {
        call(&self.scroll_trigger, "scrollerProxy", &[&self.container]).map(|_| ())
    }

    fn add_refresh_listener(&self) -> Result<()> {
        call(
            &self.scroll_trigger,
            "addEventListener",
            &[&JsValue::from_str("refresh"), &self.on_refresh],
        )
        .map(|_| ())
    }

    fn remove_refresh_listener(&self) -> Result<()> {
        call(
            &self.scroll_trigger,
            "removeEventListener",
            &[&JsValue::from_str("refresh"), &self.on_refresh],
        )
        .map(|_| ())
    }
}

/// Smooth-scroll instance plus the callbacks handed to the scroll-trigger proxy.
///
/// The closures are only dropped after [`VirtualScroll::unbind`] has taken
/// them away from the library.
struct VirtualScroll {
    host: TriggerHost,
    proxy: Rc<ScrollProxy<LocomotiveScroller>>,
    _scroll_top: Closure<dyn FnMut(JsValue) -> JsValue>,
    _bounding_rect: Closure<dyn FnMut() -> JsValue>,
    _on_refresh: Closure<dyn FnMut()>,
}

impl VirtualScroll {
    fn unbind(self) {
        unbind_virtual(&self.host, self.proxy.scroller());
    }
}

/// A mounted bridge. Dropping it without [`ScrollBridge::destroy`] leaves the
/// library-side objects alive but frees the Rust callbacks.
pub struct ScrollBridge {
    scroll_trigger: JsValue,
    tweens: Vec<JsValue>,
    virtual_scroll: Option<VirtualScroll>,
}

impl ScrollBridge {
    /// Register the plugin, bind the scroller (if any) and create one tween per element.
    ///
    /// On failure everything created so far is torn down again.
    pub fn mount(plan: &BridgePlan, dom: &Dom) -> Result<Self> {
        let gsap = global(ANIMATION_GLOBAL).context("animation library not loaded")?;
        let scroll_trigger =
            global(SCROLL_TRIGGER_GLOBAL).context("scroll-trigger plugin not loaded")?;

        tolerate_registration(call(&gsap, "registerPlugin", &[&scroll_trigger]));

        let mut bridge = Self {
            scroll_trigger,
            tweens: Vec::with_capacity(plan.tweens.len()),
            virtual_scroll: None,
        };
        if let Err(e) = bridge.attach(plan, dom, &gsap) {
            bridge.destroy();
            return Err(e);
        }

        tracing::info!(
            "scroll bridge mounted: {} tweens, virtual scrolling: {}",
            bridge.tweens.len(),
            bridge.virtual_scroll.is_some()
        );
        Ok(bridge)
    }

    fn attach(&mut self, plan: &BridgePlan, dom: &Dom, gsap: &JsValue) -> Result<()> {
        let container = plan.scroller.and_then(|id| dom.element(id));
        if let Some(container) = container {
            self.virtual_scroll = Some(mount_virtual(container, &self.scroll_trigger, dom.window())?);
        }

        for tween in &plan.tweens {
            let Some(element) = dom.element(tween.element) else {
                continue;
            };
            let element: &JsValue = element;
            let from = to_js_object(&tween.from)?;
            let to = to_js_object(&tween.to)?;
            let trigger = Reflect::get(&to, &JsValue::from_str("scrollTrigger")).map_err(js_err)?;
            set(&trigger, "trigger", element)?;
            if let Some(container) = container {
                set(&trigger, "scroller", container)?;
            }
            self.tweens.push(call(gsap, "fromTo", &[element, &from, &to])?);
        }

        let scroll_trigger = &self.scroll_trigger;
        refresh_all(
            self.virtual_scroll.as_ref().map(|v| v.proxy.scroller()),
            || {
                if let Err(e) = call(scroll_trigger, "refresh", &[]) {
                    tracing::warn!("scroll-trigger refresh failed: {:#}", e);
                }
            },
        );
        Ok(())
    }

    /// Kill the tweens and their triggers, then unbind and destroy the smooth scroller
    pub fn destroy(&mut self) {
        for tween in self.tweens.drain(..) {
            if let Some(trigger) = get_path(&tween, &["scrollTrigger"]) {
                teardown_step("kill scroll trigger", call(&trigger, "kill", &[]));
            }
            teardown_step("kill tween", call(&tween, "kill", &[]));
        }
        if let Some(virtual_scroll) = self.virtual_scroll.take() {
            virtual_scroll.unbind();
        }
    }
}

fn mount_virtual(
    container: &HtmlElement,
    scroll_trigger: &JsValue,
    window: &Window,
) -> Result<VirtualScroll> {
    let constructor: Function = global(SMOOTH_SCROLL_GLOBAL)
        .context("smooth-scroll library not loaded")?
        .dyn_into()
        .map_err(|_| anyhow!("{} is not a constructor", SMOOTH_SCROLL_GLOBAL))?;

    let options = Object::new();
    set(&options, "el", container)?;
    set(&options, "smooth", &JsValue::TRUE)?;
    let instance = Reflect::construct(&constructor, &Array::of1(&options)).map_err(js_err)?;
    let proxy = Rc::new(ScrollProxy::new(LocomotiveScroller { instance }));

    // Every smooth-scroll frame updates the triggers
    let subscribed = Reflect::get(scroll_trigger, &JsValue::from_str("update"))
        .map_err(js_err)
        .and_then(|update| {
            call(
                &proxy.scroller().instance,
                "on",
                &[&JsValue::from_str("scroll"), &update],
            )
        });
    if let Err(e) = subscribed {
        teardown_step("destroy smooth scroller", proxy.scroller().destroy());
        return Err(e);
    }

    let scroll_top = {
        let proxy = Rc::clone(&proxy);
        Closure::<dyn FnMut(JsValue) -> JsValue>::new(move |value: JsValue| {
            match proxy.scroll_top(value.as_f64()) {
                Some(offset) => JsValue::from_f64(offset),
                None => JsValue::UNDEFINED,
            }
        })
    };

    let bounding_rect = {
        let window = window.clone();
        Closure::<dyn FnMut() -> JsValue>::new(move || {
            let rect = ScrollProxy::<LocomotiveScroller>::bounding_rect(viewport_of(&window));
            let object = Object::new();
            for (key, value) in [
                ("top", rect.top),
                ("left", rect.left),
                ("width", rect.width),
                ("height", rect.height),
            ] {
                let _ = Reflect::set(&object, &JsValue::from_str(key), &JsValue::from_f64(value));
            }
            object.into()
        })
    };

    // Each trigger refresh re-measures the smooth scroller
    let on_refresh = {
        let proxy = Rc::clone(&proxy);
        Closure::<dyn FnMut()>::new(move || proxy.scroller().update())
    };

    let has_transform = container
        .style()
        .get_property_value("transform")
        .map(|value| !value.is_empty() && value != "none")
        .unwrap_or(false);

    let proxy_options: JsValue = Object::new().into();
    let options_set = set(&proxy_options, "scrollTop", scroll_top.as_ref())
        .and_then(|_| set(&proxy_options, "getBoundingClientRect", bounding_rect.as_ref()))
        .and_then(|_| {
            set(
                &proxy_options,
                "pinType",
                &JsValue::from_str(PinType::for_container(has_transform).as_str()),
            )
        });
    if let Err(e) = options_set {
        teardown_step("destroy smooth scroller", proxy.scroller().destroy());
        return Err(e);
    }

    let container_value: &JsValue = container;
    let host = TriggerHost {
        scroll_trigger: scroll_trigger.clone(),
        container: container_value.clone(),
        proxy_options,
        on_refresh: on_refresh.as_ref().clone(),
    };
    bind_virtual(&host, proxy.scroller())?;

    Ok(VirtualScroll {
        host,
        proxy,
        _scroll_top: scroll_top,
        _bounding_rect: bounding_rect,
        _on_refresh: on_refresh,
    })
}
