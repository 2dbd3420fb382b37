use std::fmt;
use std::time::Duration;

use crate::schedule::TimerHandle;

/// Lifetime of every ripple, from creation to natural removal.
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(1200);

/// Viewport position in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Distance from the left edge of the viewport.
    pub x: f64,
    /// Distance from the top edge of the viewport.
    pub y: f64,
}

impl Position {
    /// Create a position from viewport coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which collection an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Expanding ring marking a click.
    Ripple,
    /// Fading dot marking a sampled pointer position.
    Trail,
}

/// Identity of one effect instance, unique for the life of its manager.
///
/// Removal is always keyed by id, never by position, so two effects at
/// the same spot can't be confused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx#{}", self.0)
    }
}

/// One decorative element currently on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectInstance {
    /// Unique id.
    pub id: EffectId,
    /// Ripple or trail.
    pub kind: EffectKind,
    /// Position at creation time.
    pub position: Position,
    /// Clock time at creation.
    pub created_at: Duration,
    /// Delay until natural removal.
    pub lifetime: Duration,
    /// Pending removal task, if one could be scheduled.
    pub timer: Option<TimerHandle>,
}

impl EffectInstance {
    /// Clock time at which this instance expires naturally.
    #[must_use]
    pub fn expires_at(&self) -> Duration {
        self.created_at + self.lifetime
    }
}
