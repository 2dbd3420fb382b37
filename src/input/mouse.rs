use std::time::Duration;

/// Minimum spacing between accepted pointer-move samples.
pub const TRAIL_INTERVAL: Duration = Duration::from_millis(50);

/// Sampling gate for pointer-move events.
///
/// Accepts an event only when at least `interval` has passed since the
/// previously *accepted* one, so trail density is independent of how often
/// the browser reports movement. The first event is always accepted.
#[derive(Debug, Clone)]
pub struct TrailThrottle {
    interval: Duration,
    last_accepted: Option<Duration>,
}

impl TrailThrottle {
    /// Create a throttle with the given minimum spacing.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Decide whether an event at clock time `now` passes the gate, and
    /// record it if so.
    pub fn accept(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_sub(last) < self.interval {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    /// Clock time of the last accepted event.
    #[must_use]
    pub fn last_accepted(&self) -> Option<Duration> {
        self.last_accepted
    }
}

impl Default for TrailThrottle {
    fn default() -> Self {
        Self::new(TRAIL_INTERVAL)
    }
}
