use crate::{Offset, SectionRect};

/// The coarse watch region: the viewport with its bottom edge pulled up by
/// the resolved global offset (a `0 0 -offset 0` margin contraction).
///
/// The margin is resolved once at build time and the zone is rebuilt on
/// resize or reconfiguration. This tier is only a wake-up signal; the
/// authoritative active-index decision re-resolves offsets fresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TriggerZone {
    margin_px: u32,
    threshold: f32,
}

impl TriggerZone {
    pub fn new(offset: &Offset, threshold: f32, viewport_height: u32) -> Self {
        Self {
            margin_px: offset.resolve(viewport_height),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Whether `rect` intersects the zone at the configured threshold, for
    /// the given live viewport height and scroll offset.
    pub fn intersects(&self, rect: SectionRect, viewport_height: u32, scroll_offset: u64) -> bool {
        if rect.height == 0 {
            return false;
        }
        let zone_bottom = viewport_height as i64 - self.margin_px as i64;
        if zone_bottom <= 0 {
            return false;
        }
        let top = rect.top as i64 - scroll_offset as i64;
        let bottom = top + rect.height as i64;
        let visible = bottom.min(zone_bottom) - top.max(0);
        if visible <= 0 {
            return false;
        }
        let ratio = visible as f32 / rect.height as f32;
        ratio >= self.threshold
    }
}

/// Per-section intersection state for the trigger zone.
///
/// The unobserve/re-observe analog lives in `prime`; `evaluate` reports
/// whether any section entered or left the zone since the last pass.
#[derive(Clone, Debug)]
pub(crate) struct SectionWatcher {
    zone: TriggerZone,
    intersecting: Vec<bool>,
}

impl SectionWatcher {
    pub fn new(len: usize, zone: TriggerZone) -> Self {
        Self {
            zone,
            intersecting: vec![false; len],
        }
    }

    /// Swaps in a freshly built zone (resize or offset/threshold change).
    pub fn rebuild(&mut self, zone: TriggerZone) {
        self.zone = zone;
    }

    /// Re-evaluates every section and returns `true` when any intersection
    /// flag flipped. Unmeasured sections never intersect.
    pub fn evaluate(
        &mut self,
        rects: &[SectionRect],
        measured: &[bool],
        viewport_height: u32,
        scroll_offset: u64,
    ) -> bool {
        let mut flipped = false;
        for i in 0..self.intersecting.len() {
            let next = measured[i] && self.zone.intersects(rects[i], viewport_height, scroll_offset);
            if next != self.intersecting[i] {
                self.intersecting[i] = next;
                flipped = true;
            }
        }
        flipped
    }

    /// Recomputes every flag fresh without flip reporting.
    pub fn prime(
        &mut self,
        rects: &[SectionRect],
        measured: &[bool],
        viewport_height: u32,
        scroll_offset: u64,
    ) {
        for i in 0..self.intersecting.len() {
            self.intersecting[i] =
                measured[i] && self.zone.intersects(rects[i], viewport_height, scroll_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_contracts_viewport_bottom() {
        // Viewport 800, offset 100: zone spans [0, 700) in viewport space.
        let zone = TriggerZone::new(&Offset::Px(100), 0.0, 800);
        // Fully inside.
        assert!(zone.intersects(SectionRect { top: 100, height: 200 }, 800, 0));
        // Entirely below the zone bottom.
        assert!(!zone.intersects(SectionRect { top: 700, height: 200 }, 800, 0));
        // Scrolled into view.
        assert!(zone.intersects(SectionRect { top: 900, height: 200 }, 800, 400));
    }

    #[test]
    fn threshold_requires_visible_fraction() {
        let zone = TriggerZone::new(&Offset::Px(0), 0.5, 1000);
        // 100 of 400 visible: ratio 0.25 < 0.5.
        assert!(!zone.intersects(SectionRect { top: 900, height: 400 }, 1000, 0));
        // 300 of 400 visible: ratio 0.75.
        assert!(zone.intersects(SectionRect { top: 700, height: 400 }, 1000, 0));
    }

    #[test]
    fn watcher_reports_flips_once() {
        let zone = TriggerZone::new(&Offset::Px(100), 0.0, 800);
        let mut w = SectionWatcher::new(2, zone);
        let rects = [
            SectionRect { top: 0, height: 300 },
            SectionRect { top: 2000, height: 300 },
        ];
        let measured = [true, true];
        assert!(w.evaluate(&rects, &measured, 800, 0)); // section 0 enters
        assert!(!w.evaluate(&rects, &measured, 800, 0)); // steady state
        assert!(w.evaluate(&rects, &measured, 800, 1600)); // 0 leaves, 1 enters
    }
}
