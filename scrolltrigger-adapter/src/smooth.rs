use scrolltrigger::ScrollTarget;

/// Executes a smooth [`ScrollTarget`] with exponential ease-out.
///
/// Instead of a fixed-duration curve, the glide tracks the signed distance
/// remaining to the target and halves it every `half_life_ms`: fast motion
/// while far away, visible deceleration on approach. Once the remaining
/// distance drops below a sub-pixel threshold the glide snaps onto the
/// target and reports itself done.
///
/// Time is injected (`now_ms`), so sampling is pure and deterministic.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glide {
    target: u64,
    /// Signed distance from the target at `start_ms` (positive = above it).
    displacement: f32,
    start_ms: u64,
    half_life_ms: u64,
}

impl Glide {
    /// Remaining motion below this is invisible; the glide settles.
    const SETTLE_PX: f32 = 0.5;

    /// Starts a glide from the current offset toward a scroll command.
    pub fn toward(from: u64, target: ScrollTarget, start_ms: u64, half_life_ms: u64) -> Self {
        Self {
            target: target.offset,
            displacement: from as f32 - target.offset as f32,
            start_ms,
            half_life_ms: half_life_ms.max(1),
        }
    }

    /// The offset this glide is converging on.
    pub fn target(&self) -> u64 {
        self.target
    }

    fn remaining(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.displacement * 0.5_f32.powf(elapsed as f32 / self.half_life_ms as f32)
    }

    /// The offset at `now_ms`: the target plus the decayed displacement,
    /// snapped onto the target once the motion has settled.
    pub fn sample(&self, now_ms: u64) -> u64 {
        let remaining = self.remaining(now_ms);
        if remaining.abs() < Self::SETTLE_PX {
            return self.target;
        }
        (self.target as f32 + remaining).max(0.0).round() as u64
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.remaining(now_ms).abs() < Self::SETTLE_PX
    }

    /// Redirects an in-flight glide toward a new command, restarting the
    /// decay from the current sampled position so there is no visual jump.
    pub fn retarget(&mut self, now_ms: u64, target: ScrollTarget) {
        let cur = self.sample(now_ms);
        self.target = target.offset;
        self.displacement = cur as f32 - target.offset as f32;
        self.start_ms = now_ms;
    }
}
