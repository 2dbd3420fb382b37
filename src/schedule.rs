//! Time sources and deferred removal tasks.
//!
//! The manager never sleeps or polls. It asks a [`Scheduler`] to call
//! [`EffectManager::expire`](crate::effect::EffectManager::expire) once an
//! effect's lifetime has elapsed, and cancels that request if the effect is
//! evicted first.

use std::time::Duration;

use web_time::Instant;

use crate::effect::EffectId;
use crate::error::EffectError;

/// Opaque handle to a pending removal task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Queues deferred expiry of effects.
pub trait Scheduler {
    /// Arrange for `id` to be expired after `delay`.
    fn schedule(
        &mut self,
        delay: Duration,
        id: EffectId,
    ) -> Result<TimerHandle, EffectError>;

    /// Drop a pending task. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Wall clock backed by [`web_time::Instant`], which maps to
/// `performance.now()` on wasm.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Start a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
