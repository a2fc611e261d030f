use scrolltrigger::{ScrollBehavior, ScrollToOptions, ScrollTrigger, SectionId};

use crate::Glide;

/// A framework-neutral controller that wraps a [`ScrollTrigger`] and executes
/// its scroll commands.
///
/// The engine is headless and only *computes* scroll targets; something has
/// to own the page's scroll position and move it. This type does that without
/// holding any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick(now_ms)` each frame/timer tick
///
/// `ScrollBehavior::Auto` commands jump immediately; `Smooth` commands run a
/// [`Glide`] across ticks. The sampled offset is fed back through the
/// engine's scroll-event path, so active-index changes fire en route exactly
/// as they would for a user scroll. Use the offset returned from `tick()` to
/// position the real scroll container.
#[derive(Clone, Debug)]
pub struct Controller<E = SectionId> {
    engine: ScrollTrigger<E>,
    offset: u64,
    glide: Option<Glide>,
    glide_half_life_ms: u64,
}

impl<E: Clone + PartialEq> Controller<E> {
    pub fn new(options: scrolltrigger::ScrollTriggerOptions<E>) -> Self {
        Self::from_engine(ScrollTrigger::new(options))
    }

    pub fn from_engine(engine: ScrollTrigger<E>) -> Self {
        let offset = engine.scroll_offset();
        Self {
            engine,
            offset,
            glide: None,
            glide_half_life_ms: 80,
        }
    }

    pub fn engine(&self) -> &ScrollTrigger<E> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScrollTrigger<E> {
        &mut self.engine
    }

    pub fn into_engine(self) -> ScrollTrigger<E> {
        self.engine
    }

    /// The scroll offset the host should mirror into its real UI.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub fn cancel_glide(&mut self) {
        self.glide = None;
    }

    /// Half-life of the glide's remaining distance, for smooth commands
    /// started after this call. Smaller settles faster.
    pub fn set_glide_half_life_ms(&mut self, half_life_ms: u64) {
        self.glide_half_life_ms = half_life_ms;
    }

    /// Call this when the UI reports a scroll offset change (wheel/drag).
    ///
    /// A user scroll always wins: any active glide is cancelled.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        self.cancel_glide();
        self.offset = offset;
        self.engine.apply_scroll_event(offset, now_ms);
    }

    /// Call this when the UI reports a viewport height change.
    pub fn on_resize(&mut self, height: u32, now_ms: u64) {
        self.engine.apply_resize_event(height, now_ms);
    }

    /// Executes the engine's scroll command for `index`.
    ///
    /// Returns the target offset, or `None` when the engine rejected the
    /// request (invalid index, unmeasured geometry, destroyed instance).
    pub fn scroll_to(&mut self, index: usize, opts: ScrollToOptions, now_ms: u64) -> Option<u64> {
        let target = self.engine.scroll_to(index, opts)?;
        Some(self.execute(target, now_ms))
    }

    /// [`Self::scroll_to`] by section handle.
    pub fn scroll_to_section(
        &mut self,
        section: &E,
        opts: ScrollToOptions,
        now_ms: u64,
    ) -> Option<u64> {
        let target = self.engine.scroll_to_section(section, opts)?;
        Some(self.execute(target, now_ms))
    }

    fn execute(&mut self, target: scrolltrigger::ScrollTarget, now_ms: u64) -> u64 {
        match target.behavior {
            ScrollBehavior::Auto => {
                self.cancel_glide();
                self.offset = target.offset;
                self.engine.apply_scroll_event(target.offset, now_ms);
            }
            ScrollBehavior::Smooth => match &mut self.glide {
                Some(glide) => glide.retarget(now_ms, target),
                None => {
                    self.glide = Some(Glide::toward(
                        self.offset,
                        target,
                        now_ms,
                        self.glide_half_life_ms,
                    ));
                }
            },
        }
        target.offset
    }

    /// Advances the controller.
    ///
    /// Samples the active glide (if any), feeds the new offset back through
    /// the engine's scroll-event path, and always pumps the engine's throttle
    /// gate. Returns the sampled offset while a glide is running.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let sampled = match self.glide {
            Some(glide) => {
                let off = glide.sample(now_ms);
                self.offset = off;
                self.engine.apply_scroll_event(off, now_ms);
                if glide.is_done(now_ms) {
                    self.glide = None;
                }
                Some(off)
            }
            None => None,
        };
        self.engine.tick(now_ms);
        sampled
    }
}
