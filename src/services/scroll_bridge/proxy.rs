use anyhow::Result;

use crate::types::{Rect, ViewportSize};

/// The subset of a smooth-scroll engine the bridge needs
pub trait SmoothScroller {
    /// Current virtual scroll offset in px
    fn scroll_offset(&self) -> f64;

    /// Jump to `offset` with zero duration and no interpolation
    fn seek_immediate(&self, offset: f64);

    /// Re-measure the container (after layout or trigger refresh)
    fn update(&self);

    /// Stop smoothing and release the container
    fn destroy(&self) -> Result<()>;
}

/// The scroll-trigger library's hooks into a virtual scroller.
///
/// Both registrations hand the library callbacks owned by the caller, so they
/// must be removed before those callbacks are dropped.
pub trait ScrollTriggerHost {
    /// `scrollerProxy(container, { scrollTop, getBoundingClientRect, pinType })`
    fn install_proxy(&self) -> Result<()>;

    /// `scrollerProxy(container)` without options, forgetting the proxy
    fn remove_proxy(&self) -> Result<()>;

    /// Re-measure the scroller on every trigger refresh
    fn add_refresh_listener(&self) -> Result<()>;

    fn remove_refresh_listener(&self) -> Result<()>;
}

/// How pinned elements are held in place inside the scroller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinType {
    Transform,
    Fixed,
}

impl PinType {
    /// A transformed container breaks `position: fixed`, so pins must use transforms
    pub fn for_container(has_transform: bool) -> Self {
        if has_transform {
            PinType::Transform
        } else {
            PinType::Fixed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PinType::Transform => "transform",
            PinType::Fixed => "fixed",
        }
    }
}

/// Backing logic for the scroll-trigger library's scroller proxy
#[derive(Debug)]
pub struct ScrollProxy<S> {
    scroller: S,
}

impl<S: SmoothScroller> ScrollProxy<S> {
    pub fn new(scroller: S) -> Self {
        Self { scroller }
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }

    /// `scrollTop()` reads the offset; `scrollTop(value)` seeks and returns nothing
    pub fn scroll_top(&self, value: Option<f64>) -> Option<f64> {
        match value {
            Some(offset) => {
                self.scroller.seek_immediate(offset);
                None
            }
            None => Some(self.scroller.scroll_offset()),
        }
    }

    /// The virtual scroller always fills the viewport from the origin
    pub fn bounding_rect(viewport: ViewportSize) -> Rect {
        Rect::new(0.0, 0.0, viewport.width, viewport.height)
    }
}

/// Final synchronous measurement pass: the smooth scroller first, then the triggers
pub fn refresh_all<S: SmoothScroller>(scroller: Option<&S>, refresh_triggers: impl FnOnce()) {
    if let Some(scroller) = scroller {
        scroller.update();
    }
    refresh_triggers();
}

/// Hook a constructed smooth scroller into the scroll-trigger library.
///
/// All or nothing: on failure whatever was installed is removed again and the
/// scroller is destroyed, so the page is left on native scrolling.
pub fn bind_virtual<H: ScrollTriggerHost, S: SmoothScroller>(host: &H, scroller: &S) -> Result<()> {
    if let Err(e) = host.install_proxy() {
        teardown_step("destroy smooth scroller", scroller.destroy());
        return Err(e);
    }
    if let Err(e) = host.add_refresh_listener() {
        teardown_step("remove scroller proxy", host.remove_proxy());
        teardown_step("destroy smooth scroller", scroller.destroy());
        return Err(e);
    }
    Ok(())
}

/// Undo [`bind_virtual`]. Call before dropping the callbacks the host handed out.
pub fn unbind_virtual<H: ScrollTriggerHost, S: SmoothScroller>(host: &H, scroller: &S) {
    teardown_step("remove refresh listener", host.remove_refresh_listener());
    teardown_step("remove scroller proxy", host.remove_proxy());
    teardown_step("destroy smooth scroller", scroller.destroy());
}

/// Teardown keeps going past failures; they are only worth a debug line
pub fn teardown_step<T>(step: &str, result: Result<T>) {
    if let Err(e) = result {
        tracing::debug!("{} failed during teardown: {:#}", step, e);
    }
}

/// Plugin registration fails when the page already registered the plugin
/// itself; that is not an error for us.
pub fn tolerate_registration<T, E: std::fmt::Debug>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("scroll-trigger plugin registration ignored: {:?}", e);
            None
        }
    }
}
