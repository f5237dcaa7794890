//! Document access and effect application
//!
//! Elements are looked up once at mount and kept in a registry; the core
//! refers to them by [`ElementId`] index.

use anyhow::{anyhow, bail, Context, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::js_err;
use crate::app::{Effect, Target};
use crate::model::motion::REDUCED_MOTION_QUERY;
use crate::types::{ElementId, Rect, ViewportSize};
use crate::view::text_reveal::{WordSpan, SETTLED_STYLES};

pub struct Dom {
    window: Window,
    document: Document,
    elements: Vec<HtmlElement>,
}

impl Dom {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().context("no global window")?;
        let document = window.document().context("window has no document")?;
        Ok(Self {
            window,
            document,
            elements: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Register an element, returning its existing id if it is already known
    pub fn register(&mut self, element: HtmlElement) -> ElementId {
        if let Some(id) = self.find(&element) {
            return id;
        }
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// All elements matching `selector`; an invalid selector matches nothing
    pub fn query_all(&mut self, selector: &str) -> Vec<ElementId> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("invalid selector {:?}: {:?}", selector, e);
                return Vec::new();
            }
        };

        let mut ids = Vec::new();
        for index in 0..list.length() {
            if let Some(element) = list
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            {
                ids.push(self.register(element));
            }
        }
        ids
    }

    /// First element matching `selector`
    pub fn query_one(&mut self, selector: &str) -> Option<ElementId> {
        match self.document.query_selector(selector) {
            Ok(found) => found
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                .map(|element| self.register(element)),
            Err(e) => {
                tracing::warn!("invalid selector {:?}: {:?}", selector, e);
                None
            }
        }
    }

    pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.0)
    }

    /// Reverse lookup for elements handed back by browser callbacks
    pub fn find(&self, element: &Element) -> Option<ElementId> {
        let target: &wasm_bindgen::JsValue = element.as_ref();
        self.elements
            .iter()
            .position(|candidate| {
                let candidate: &wasm_bindgen::JsValue = candidate.as_ref();
                candidate == target
            })
            .map(ElementId)
    }

    pub fn text(&self, id: ElementId) -> String {
        self.element(id)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        let rect = self.element(id)?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    pub fn viewport(&self) -> ViewportSize {
        viewport_of(&self.window)
    }

    /// Result of the reduced-motion media query, `None` when unsupported
    pub fn reduced_motion(&self) -> Option<bool> {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|list| list.matches())
    }

    pub fn language(&self) -> Option<String> {
        self.window.navigator().language()
    }

    /// Whether the `load` event has already fired
    pub fn is_loaded(&self) -> bool {
        js_sys::Reflect::get(&self.document, &"readyState".into())
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "complete")
    }

    /// Apply a DOM effect. Observer, frame and bridge effects belong to the runtime.
    pub fn apply(&self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::SetClass {
                target,
                class,
                present,
            } => {
                let element: Element = match target {
                    Target::Body => self.document.body().context("document has no body")?.into(),
                    Target::Element(id) => self.require(*id)?.clone().into(),
                };
                element
                    .class_list()
                    .toggle_with_force(class, *present)
                    .map_err(js_err)?;
            }
            Effect::SetStyle {
                element,
                property,
                value,
            } => {
                self.require(*element)?
                    .style()
                    .set_property(property, value)
                    .map_err(js_err)?;
            }
            Effect::SetText { element, text } => {
                self.require(*element)?.set_text_content(Some(text));
            }
            Effect::Hide(element) => {
                self.require(*element)?
                    .style()
                    .set_property("display", "none")
                    .map_err(js_err)?;
            }
            Effect::ReplaceWithWords {
                element,
                words,
                settled,
            } => self.replace_with_words(*element, words, *settled)?,
            Effect::Observe(_)
            | Effect::Unobserve(_)
            | Effect::RequestFrame
            | Effect::MountScrollBridge(_) => {
                bail!("{:?} is not a document effect", effect)
            }
        }
        Ok(())
    }

    fn replace_with_words(&self, id: ElementId, words: &[WordSpan], settled: bool) -> Result<()> {
        let element = self.require(id)?;
        element.set_inner_html("");
        for word in words {
            let span = self
                .document
                .create_element("span")
                .map_err(js_err)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| anyhow!("created <span> is not an HtmlElement"))?;
            span.set_text_content(Some(&word.text));
            let style = span.style();
            if settled {
                for (property, value) in SETTLED_STYLES {
                    style.set_property(property, value).map_err(js_err)?;
                }
            } else {
                style
                    .set_property("animation-delay", &word.animation_delay())
                    .map_err(js_err)?;
            }
            element.append_child(&span).map_err(js_err)?;
        }
        Ok(())
    }

    fn require(&self, id: ElementId) -> Result<&HtmlElement> {
        self.element(id)
            .with_context(|| format!("element {} is not registered", id))
    }
}

/// Inner size of `window`; zero when the browser reports something odd
pub fn viewport_of(window: &Window) -> ViewportSize {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    ViewportSize::new(width, height)
}
