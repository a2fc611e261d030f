/// Default section handle when the host does not supply its own element type.
///
/// Hosts with real element references (DOM node wrappers, widget ids, ...)
/// can use any `Clone + PartialEq` type instead.
pub type SectionId = u64;

/// Distance of the trigger line from the viewport bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Offset {
    /// Fixed distance in pixels.
    Px(u32),
    /// Percentage of the viewport height.
    Percent(f32),
}

impl Offset {
    /// Resolves the offset against a viewport height, in pixels.
    ///
    /// Percentages are recomputed fresh on every call so they track the live
    /// viewport size; nothing is cached here.
    pub fn resolve(&self, viewport_height: u32) -> u32 {
        match self {
            Self::Px(px) => *px,
            Self::Percent(pct) => (viewport_height as f32 * pct / 100.0).round().max(0.0) as u32,
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// Parses a per-section override marker.
    ///
    /// A purely-digit value is pixels; any other non-empty value is read as a
    /// percentage (the number before a trailing `%`). Returns `None` when the
    /// value cannot be parsed either way.
    pub(crate) fn parse_override(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            return raw.parse::<u32>().ok().map(Self::Px);
        }
        let number = raw.strip_suffix('%').unwrap_or(raw);
        number
            .parse::<f32>()
            .ok()
            .filter(|pct| pct.is_finite() && *pct >= 0.0)
            .map(Self::Percent)
    }
}

impl Default for Offset {
    fn default() -> Self {
        Self::Px(100)
    }
}

/// Scroll animation style for programmatic scrolls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Auto,
}

/// Document-space geometry for one tracked section, pushed by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionRect {
    /// Top edge in document space.
    pub top: u64,
    /// Height in pixels.
    pub height: u32,
}

impl SectionRect {
    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// A scroll command computed by the engine and executed by the host adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTarget {
    /// Target scroll offset (document space, clamped at 0).
    pub offset: u64,
    pub behavior: ScrollBehavior,
}

/// Per-call options for the scroll-to operations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToOptions {
    /// Extra pixels subtracted from the computed target offset.
    pub extra_offset: i64,
    /// Overrides the configured scroll behavior for this call.
    pub behavior: Option<ScrollBehavior>,
}

impl ScrollToOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_offset(mut self, extra_offset: i64) -> Self {
        self.extra_offset = extra_offset;
        self
    }

    pub fn with_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }
}

/// Payload shared by the `on_change` callback and the bus broadcast.
///
/// `None` means "no section active" (respectively "no previous section").
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeEvent<E> {
    pub index: Option<usize>,
    pub previous_index: Option<usize>,
    pub section: Option<E>,
    pub previous_section: Option<E>,
}

/// Lifecycle state of a [`crate::ScrollTrigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Normal operation: watcher live, recomputes flowing.
    Tracking,
    /// Construction resolved zero sections; inert from birth.
    Empty,
    /// Torn down by `destroy`; terminal.
    Destroyed,
}
