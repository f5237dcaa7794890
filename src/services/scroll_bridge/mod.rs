//! Smooth-scroll / scroll-trigger bridge
//!
//! Optional integration with third-party animation and smooth-scroll
//! libraries loaded by the page. The crate only ever sees them through
//! presence checks:
//! - **`plan`**: decides whether the bridge runs and what it animates
//! - **`proxy`**: maps the scroll-trigger proxy's `scrollTop` calls onto a
//!   [`SmoothScroller`]
//!
//! The JS calls themselves live in `crate::wasm::bridge`.

mod plan;
mod proxy;

pub use plan::{plan, BridgePlan, FromVars, Libraries, RevealTween, ToVars, TriggerVars};
pub use proxy::{
    bind_virtual, refresh_all, teardown_step, tolerate_registration, unbind_virtual, PinType,
    ScrollProxy, ScrollTriggerHost, SmoothScroller,
};
