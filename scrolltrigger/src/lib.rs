//! A headless scroll-spy engine.
//!
//! Tracks which of a set of page sections is active relative to a
//! configurable trigger line near the viewport bottom, and notifies
//! observers (a callback and a page-wide event bus) when the active section
//! changes. Typical use: keeping navigation UI in sync with scroll position.
//!
//! The crate is UI-agnostic. A host adapter (DOM bridge, GUI/TUI layer, or a
//! simulation) is expected to provide:
//! - viewport height and scroll offset, pushed via setters / event methods
//! - per-section document-space geometry, pushed via `measure`/`measure_many`
//! - a monotonic `now_ms` time base, pumped through [`ScrollTrigger::tick`]
//! - execution of the [`ScrollTarget`] commands returned by the scroll-to
//!   operations
//!
//! For a glide-driven scroll executor, see the `scrolltrigger-adapter` crate.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod bus;
mod options;
mod throttle;
mod trigger;
mod types;
mod zone;


pub use bus::{CHANGE_EVENT, EventBus, ListenerId};
pub use options::{
    OffsetAttrFn, OnChangeCallback, QueryFn, ScrollTriggerOptions, SectionSource,
};
pub use trigger::ScrollTrigger;
pub use types::{
    ChangeEvent, Offset, Phase, ScrollBehavior, ScrollTarget, ScrollToOptions, SectionId,
    SectionRect,
};
