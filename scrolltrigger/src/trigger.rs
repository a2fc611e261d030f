use crate::bus::{CHANGE_EVENT, EventBus};
use crate::throttle::ThrottleGate;
use crate::zone::{SectionWatcher, TriggerZone};
use crate::{
    ChangeEvent, Offset, Phase, ScrollTarget, ScrollToOptions, ScrollTriggerOptions, SectionId,
    SectionRect, SectionSource,
};

/// A headless scroll-spy engine.
///
/// Tracks which of an ordered set of sections is active relative to a
/// trigger line placed a configurable distance up from the viewport bottom,
/// and notifies observers when the active section changes.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects and starts no timers.
/// - Your adapter drives it by pushing viewport height, scroll offset and
///   per-section geometry, and by pumping [`Self::tick`] with injected time.
/// - Programmatic scrolls are returned as [`ScrollTarget`] commands for the
///   adapter to execute (see the `scrolltrigger-adapter` crate for a
///   glide-driven executor).
///
/// Two tiers decide the active section: a coarse per-section intersection
/// watcher wakes the throttle gate when sections enter or leave the trigger
/// zone, and the authoritative recompute re-resolves every offset fresh and
/// scans sections from last to first. Only the recompute changes state.
#[derive(Clone, Debug)]
pub struct ScrollTrigger<E = SectionId> {
    options: ScrollTriggerOptions<E>,
    sections: Vec<E>,
    rects: Vec<SectionRect>,
    measured: Vec<bool>,
    watcher: Option<SectionWatcher>,
    gate: ThrottleGate,
    bus: EventBus<E>,
    watch_resize: bool,
    viewport_height: u32,
    scroll_offset: u64,
    active: Option<usize>,
    phase: Phase,
}

impl<E: Clone + PartialEq> ScrollTrigger<E> {
    /// Creates an engine from options, resolving the section source into the
    /// canonical ordered list.
    ///
    /// An empty resolved list (selector matching nothing, empty element list,
    /// or a selector without a `query` resolver) leaves the instance inert:
    /// every method becomes a safe no-op returning defaults.
    pub fn new(mut options: ScrollTriggerOptions<E>) -> Self {
        let sections = match &options.sections {
            SectionSource::Elements(elements) => elements.clone(),
            SectionSource::Selector(selector) => match &options.query {
                Some(query) => query(selector),
                None => {
                    twarn!(selector = selector.as_str(), "selector source without a query resolver");
                    Vec::new()
                }
            },
        };
        // The union is not carried past construction.
        options.sections = SectionSource::Elements(sections.clone());
        let bus = options.bus.take().unwrap_or_default();

        if sections.is_empty() {
            twarn!("no sections resolved, instance is inert");
            return Self {
                gate: ThrottleGate::new(options.throttle_ms),
                options,
                sections,
                rects: Vec::new(),
                measured: Vec::new(),
                watcher: None,
                bus,
                watch_resize: false,
                viewport_height: 0,
                scroll_offset: 0,
                active: None,
                phase: Phase::Empty,
            };
        }

        tdebug!(sections = sections.len(), "ScrollTrigger::new");
        let len = sections.len();
        let zone = TriggerZone::new(&options.offset, options.threshold, 0);
        let mut t = Self {
            gate: ThrottleGate::new(options.throttle_ms),
            options,
            sections,
            rects: vec![SectionRect::default(); len],
            measured: vec![false; len],
            watcher: Some(SectionWatcher::new(len, zone)),
            bus,
            watch_resize: false,
            viewport_height: 0,
            scroll_offset: 0,
            active: None,
            phase: Phase::Tracking,
        };
        t.watch_resize = t.uses_percent_offsets();
        t
    }

    pub fn options(&self) -> &ScrollTriggerOptions<E> {
        &self.options
    }

    /// The broadcast bus this engine emits [`crate::CHANGE_EVENT`] on.
    ///
    /// The returned handle shares the listener table; subscriptions made on
    /// it survive `destroy`.
    pub fn bus(&self) -> EventBus<E> {
        self.bus.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the currently active section; `None` when no section has
    /// crossed its trigger line.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The currently active section handle.
    pub fn active_section(&self) -> Option<E> {
        self.active.and_then(|i| self.sections.get(i).cloned())
    }

    /// Defensive copy of the tracked section list.
    pub fn sections(&self) -> Vec<E> {
        self.sections.clone()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Whether a viewport-resize watcher is attached (some offset in use is
    /// percentage-based).
    pub fn watches_resize(&self) -> bool {
        self.watch_resize
    }

    /// The section's effective offset in pixels, resolved against the live
    /// viewport: its override marker when present and parseable, else the
    /// global offset.
    pub fn resolved_offset(&self, index: usize) -> Option<u32> {
        if self.phase != Phase::Tracking || index >= self.sections.len() {
            return None;
        }
        Some(self.effective_offset(index).resolve(self.viewport_height))
    }

    /// The section's effective trigger line in viewport space
    /// (`viewport_height - resolved offset`; may be negative).
    pub fn trigger_line(&self, index: usize) -> Option<i64> {
        let offset = self.resolved_offset(index)? as i64;
        Some(self.viewport_height as i64 - offset)
    }

    /// Silent geometry push; does not schedule a recompute.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.phase != Phase::Tracking {
            return;
        }
        self.scroll_offset = offset;
    }

    /// Silent geometry push; does not schedule a recompute.
    pub fn set_viewport_height(&mut self, height: u32) {
        if self.phase != Phase::Tracking {
            return;
        }
        self.viewport_height = height;
    }

    /// Applies a host scroll event: pushes the offset and unconditionally
    /// requests a recompute through the throttle gate.
    ///
    /// Scroll events are a redundant recalculation trigger on top of the
    /// intersection watcher, for hosts where intersection callbacks alone
    /// lag behind (fast momentum scrolling).
    pub fn apply_scroll_event(&mut self, offset: u64, now_ms: u64) {
        if self.phase != Phase::Tracking {
            return;
        }
        ttrace!(offset, now_ms, "apply_scroll_event");
        self.scroll_offset = offset;
        if let Some(w) = &mut self.watcher {
            w.evaluate(&self.rects, &self.measured, self.viewport_height, self.scroll_offset);
        }
        self.gate.request(now_ms);
    }

    /// Applies a host viewport-resize event.
    ///
    /// When percentage offsets are in use the trigger zone is rebuilt against
    /// the new viewport and a recompute is requested; otherwise the height is
    /// stored only.
    pub fn apply_resize_event(&mut self, height: u32, now_ms: u64) {
        if self.phase != Phase::Tracking {
            return;
        }
        ttrace!(height, now_ms, "apply_resize_event");
        self.viewport_height = height;
        if !self.watch_resize {
            return;
        }
        self.rebuild_zone();
        self.gate.request(now_ms);
    }

    /// Pushes document-space geometry for one section.
    ///
    /// A recompute is requested only when the section enters or leaves the
    /// trigger zone; the request is armed at the next [`Self::tick`].
    pub fn measure(&mut self, index: usize, top: u64, height: u32) {
        if self.phase != Phase::Tracking || index >= self.sections.len() {
            return;
        }
        ttrace!(index, top, height, "measure");
        self.rects[index] = SectionRect { top, height };
        self.measured[index] = true;
        self.evaluate_watcher();
    }

    /// Pushes geometry for many sections at once, with a single watcher pass.
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u64, u32)>) {
        if self.phase != Phase::Tracking {
            return;
        }
        for (index, top, height) in measurements {
            if index >= self.sections.len() {
                continue;
            }
            self.rects[index] = SectionRect { top, height };
            self.measured[index] = true;
        }
        self.evaluate_watcher();
    }

    /// Runs the pending throttled recompute when its window has elapsed.
    ///
    /// Hosts pump this from their frame/timer loop with the same time base
    /// they pass to the `apply_*_event` methods.
    pub fn tick(&mut self, now_ms: u64) {
        if self.phase != Phase::Tracking {
            return;
        }
        if self.gate.ready(now_ms) {
            self.recompute();
        }
    }

    /// Re-primes the intersection watcher from current geometry, then forces
    /// one immediate recompute bypassing the throttle gate.
    ///
    /// Use when section sizes or positions changed without membership
    /// changing. Idempotent: a second call with unchanged geometry changes
    /// nothing and fires nothing.
    pub fn refresh(&mut self) {
        if self.phase != Phase::Tracking {
            return;
        }
        tdebug!("refresh");
        if let Some(w) = &mut self.watcher {
            w.prime(&self.rects, &self.measured, self.viewport_height, self.scroll_offset);
        }
        self.gate.cancel();
        self.recompute();
    }

    /// Computes the scroll command that puts the section's top edge exactly
    /// on its effective trigger line.
    ///
    /// `extra_offset` is subtracted from the target. Returns `None` (with a
    /// diagnostic) for an out-of-range index or unmeasured geometry; no state
    /// changes either way.
    pub fn scroll_to(&self, index: usize, opts: ScrollToOptions) -> Option<ScrollTarget> {
        if self.phase != Phase::Tracking {
            return None;
        }
        if index >= self.sections.len() {
            twarn!(index, len = self.sections.len(), "scroll_to: index out of range");
            return None;
        }
        if !self.measured[index] {
            twarn!(index, "scroll_to: section has no measured geometry");
            return None;
        }
        let line = self.viewport_height as i64
            - self.effective_offset(index).resolve(self.viewport_height) as i64;
        let target = self.rects[index].top as i64 - line - opts.extra_offset;
        Some(ScrollTarget {
            offset: target.max(0) as u64,
            behavior: opts.behavior.unwrap_or(self.options.behavior),
        })
    }

    /// [`Self::scroll_to`] by section handle; fails the same way when the
    /// section is not tracked.
    pub fn scroll_to_section(&self, section: &E, opts: ScrollToOptions) -> Option<ScrollTarget> {
        if self.phase != Phase::Tracking {
            return None;
        }
        let Some(index) = self.sections.iter().position(|s| s == section) else {
            twarn!("scroll_to_section: section is not tracked");
            return None;
        };
        self.scroll_to(index, opts)
    }

    /// Clones the live options, applies `f`, and diffs the result:
    ///
    /// - `offset` or `threshold` changed: the trigger zone is rebuilt.
    /// - `offset` touched: percentage usage is re-scanned and the resize
    ///   watcher attached or detached to match.
    /// - `throttle_ms` changes apply to subsequently armed windows.
    ///
    /// Section membership is fixed for the instance lifetime; the canonical
    /// list is reimposed regardless of what `f` does to `sections`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ScrollTriggerOptions<E>)) {
        if self.phase != Phase::Tracking {
            return;
        }
        let mut next = self.options.clone();
        f(&mut next);
        next.sections = SectionSource::Elements(self.sections.clone());
        if let Some(bus) = next.bus.take() {
            self.bus = bus;
        }

        let offset_changed = next.offset != self.options.offset;
        let threshold_changed = next.threshold != self.options.threshold;
        let throttle_changed = next.throttle_ms != self.options.throttle_ms;
        self.options = next;
        tdebug!(
            offset_changed,
            threshold_changed,
            throttle_changed,
            "update_options"
        );

        if throttle_changed {
            self.gate.set_window(self.options.throttle_ms);
        }
        if offset_changed || threshold_changed {
            self.rebuild_zone();
        }
        if offset_changed {
            self.watch_resize = self.uses_percent_offsets();
        }
    }

    /// Tears the engine down. Idempotent; a second call is a no-op.
    ///
    /// Cancels any pending recompute, drops the watcher and its state map,
    /// empties the section list and resets the active index. Every later
    /// call on this instance is a safe no-op returning defaults. No callback
    /// or broadcast can fire after this returns.
    pub fn destroy(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        tdebug!("destroy");
        self.gate.cancel();
        self.watcher = None;
        self.rects.clear();
        self.measured.clear();
        self.sections.clear();
        self.active = None;
        self.phase = Phase::Destroyed;
    }

    fn effective_offset(&self, index: usize) -> Offset {
        if let Some(attr) = &self.options.offset_attr {
            if let Some(raw) = attr(&self.sections[index]) {
                match Offset::parse_override(&raw) {
                    Some(offset) => return offset,
                    None => {
                        twarn!(index, raw = raw.as_str(), "unparseable offset override, using global offset");
                    }
                }
            }
        }
        self.options.offset
    }

    fn uses_percent_offsets(&self) -> bool {
        if self.options.offset.is_percent() {
            return true;
        }
        let Some(attr) = &self.options.offset_attr else {
            return false;
        };
        self.sections.iter().any(|s| {
            attr(s)
                .as_deref()
                .and_then(Offset::parse_override)
                .is_some_and(|o| o.is_percent())
        })
    }

    fn rebuild_zone(&mut self) {
        let zone = TriggerZone::new(&self.options.offset, self.options.threshold, self.viewport_height);
        if let Some(w) = &mut self.watcher {
            w.rebuild(zone);
            w.prime(&self.rects, &self.measured, self.viewport_height, self.scroll_offset);
        }
    }

    fn evaluate_watcher(&mut self) {
        if let Some(w) = &mut self.watcher {
            if w.evaluate(&self.rects, &self.measured, self.viewport_height, self.scroll_offset) {
                self.gate.poke();
            }
        }
    }

    /// The authoritative pass: reverse scan, first section whose top edge has
    /// crossed its own trigger line wins (the section lowest on the page).
    fn compute_active(&self) -> Option<usize> {
        let view = self.viewport_height;
        for i in (0..self.sections.len()).rev() {
            if !self.measured[i] {
                continue;
            }
            let line = view as i64 - self.effective_offset(i).resolve(view) as i64;
            let top = self.rects[i].top as i64 - self.scroll_offset as i64;
            if top <= line {
                return Some(i);
            }
        }
        None
    }

    fn recompute(&mut self) {
        let next = self.compute_active();
        if next == self.active {
            return;
        }
        let previous = self.active;
        self.active = next;
        tdebug!(?next, ?previous, "active section changed");
        let event = ChangeEvent {
            index: next,
            previous_index: previous,
            section: next.and_then(|i| self.sections.get(i).cloned()),
            previous_section: previous.and_then(|i| self.sections.get(i).cloned()),
        };
        if let Some(cb) = &self.options.on_change {
            cb(&event);
        }
        self.bus.emit(CHANGE_EVENT, &event);
    }
}
