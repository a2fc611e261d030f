/// Trailing-edge coalescing gate for recompute scheduling.
///
/// `request` arms a deadline only when the gate is idle; requests arriving
/// while armed are dropped, not queued. `ready` releases the deadline once it
/// elapses, re-opening the gate. This bounds recomputes to one per window
/// regardless of input event rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ThrottleGate {
    window_ms: u64,
    due: Option<u64>,
    poked: bool,
}

impl ThrottleGate {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            due: None,
            poked: false,
        }
    }

    /// Applies to subsequently armed windows; an already armed deadline keeps
    /// the old window.
    pub fn set_window(&mut self, window_ms: u64) {
        self.window_ms = window_ms;
    }

    /// Arms the gate if idle; coalesced otherwise.
    pub fn request(&mut self, now_ms: u64) {
        if self.due.is_none() {
            self.due = Some(now_ms.saturating_add(self.window_ms));
        }
    }

    /// Records a wake-up that has no timestamp of its own (geometry pushes).
    /// The deadline is armed on the next `ready` call with that call's time.
    pub fn poke(&mut self) {
        self.poked = true;
    }

    /// Returns `true` once the armed window has elapsed, clearing the
    /// deadline so a new request can be scheduled.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if core::mem::take(&mut self.poked) {
            self.request(now_ms);
        }
        match self.due {
            Some(due) if now_ms >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// Synchronously drops any scheduled recompute.
    pub fn cancel(&mut self) {
        self.due = None;
        self.poked = false;
    }
}
