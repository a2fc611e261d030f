use std::sync::Arc;

use crate::bus::EventBus;
use crate::{ChangeEvent, Offset, ScrollBehavior, SectionId};

/// A callback fired when the active section changes.
pub type OnChangeCallback<E> = Arc<dyn Fn(&ChangeEvent<E>) + Send + Sync>;

/// Resolves a selector string to section handles, in document order.
///
/// Only consulted for the [`SectionSource::Selector`] arm at construction.
pub type QueryFn<E> = Arc<dyn Fn(&str) -> Vec<E> + Send + Sync>;

/// Reads the raw per-section offset override marker, if any.
///
/// This is the DOM data-attribute analog. The returned string is parsed by
/// the engine: a purely-digit value is pixels, anything else a percentage.
pub type OffsetAttrFn<E> = Arc<dyn Fn(&E) -> Option<String> + Send + Sync>;

/// Where the tracked sections come from.
///
/// Resolved exactly once at construction into a canonical ordered list; the
/// union is not carried past construction (the stored options then hold the
/// canonical `Elements` list).
#[derive(Clone)]
pub enum SectionSource<E> {
    /// A selector string, resolved through [`ScrollTriggerOptions::query`].
    Selector(String),
    /// A pre-resolved list, copied in the given order.
    Elements(Vec<E>),
}

impl<E> core::fmt::Debug for SectionSource<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            Self::Elements(v) => write!(f, "Elements(len={})", v.len()),
        }
    }
}

/// Configuration for [`crate::ScrollTrigger`].
///
/// This type is designed to be cheap to clone: callbacks are stored in `Arc`s
/// so hosts can tweak a few fields and call `ScrollTrigger::update_options`
/// without reallocating closures.
pub struct ScrollTriggerOptions<E = SectionId> {
    /// The sections to track. Required; membership is fixed for the instance
    /// lifetime once resolved.
    pub sections: SectionSource<E>,

    /// The host's selector resolver.
    pub query: Option<QueryFn<E>>,

    /// Global trigger-line offset from the viewport bottom.
    pub offset: Offset,

    /// Per-section offset override hook.
    pub offset_attr: Option<OffsetAttrFn<E>>,

    /// Intersection ratio (0..1) a section must reach inside the trigger zone
    /// for the coarse watcher to report it as intersecting.
    pub threshold: f32,

    /// Minimum time between consecutive active-index recomputes.
    pub throttle_ms: u64,

    /// Default animation style for programmatic scrolls.
    pub behavior: ScrollBehavior,

    /// Optional callback fired when the active section changes.
    pub on_change: Option<OnChangeCallback<E>>,

    /// The broadcast bus to emit [`crate::CHANGE_EVENT`] on. A fresh bus is
    /// created when absent.
    pub bus: Option<EventBus<E>>,
}

impl<E> ScrollTriggerOptions<E> {
    /// Creates options with defaults: offset 100px, threshold 0.1, throttle
    /// 100ms, smooth scrolling, no callback.
    pub fn new(sections: SectionSource<E>) -> Self {
        Self {
            sections,
            query: None,
            offset: Offset::Px(100),
            offset_attr: None,
            threshold: 0.1,
            throttle_ms: 100,
            behavior: ScrollBehavior::Smooth,
            on_change: None,
            bus: None,
        }
    }

    /// Creates options from a pre-resolved section list.
    pub fn from_elements(elements: Vec<E>) -> Self {
        Self::new(SectionSource::Elements(elements))
    }

    /// Creates options from a selector string plus the resolver for it.
    pub fn from_selector(
        selector: impl Into<String>,
        query: impl Fn(&str) -> Vec<E> + Send + Sync + 'static,
    ) -> Self {
        Self::new(SectionSource::Selector(selector.into())).with_query(Some(query))
    }

    pub fn with_query(mut self, query: Option<impl Fn(&str) -> Vec<E> + Send + Sync + 'static>) -> Self {
        self.query = query.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_offset_attr(
        mut self,
        offset_attr: Option<impl Fn(&E) -> Option<String> + Send + Sync + 'static>,
    ) -> Self {
        self.offset_attr = offset_attr.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ChangeEvent<E>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_bus(mut self, bus: Option<EventBus<E>>) -> Self {
        self.bus = bus;
        self
    }
}

impl<E: Clone> Clone for ScrollTriggerOptions<E> {
    fn clone(&self) -> Self {
        Self {
            sections: self.sections.clone(),
            query: self.query.clone(),
            offset: self.offset,
            offset_attr: self.offset_attr.clone(),
            threshold: self.threshold,
            throttle_ms: self.throttle_ms,
            behavior: self.behavior,
            on_change: self.on_change.clone(),
            bus: self.bus.clone(),
        }
    }
}

impl<E> core::fmt::Debug for ScrollTriggerOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollTriggerOptions")
            .field("sections", &self.sections)
            .field("offset", &self.offset)
            .field("threshold", &self.threshold)
            .field("throttle_ms", &self.throttle_ms)
            .field("behavior", &self.behavior)
            .finish_non_exhaustive()
    }
}
