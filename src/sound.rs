//! Click tone description and the playback seam.

use std::time::Duration;

use crate::error::EffectError;

/// A short enveloped sine tone: linear attack to `volume`, then exponential decay
/// to `floor` by `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Oscillator frequency in Hz.
    pub frequency_hz: f32,
    /// Peak gain.
    pub volume: f32,
    /// Time to reach peak gain.
    pub attack: Duration,
    /// Total tone length, including the attack.
    pub duration: Duration,
    /// Gain at the end of the decay. Must be positive for an exponential ramp.
    pub floor: f32,
}

impl ToneSpec {
    /// The click tone: C5, 10 ms attack, 200 ms total.
    #[must_use]
    pub fn click(volume: f32) -> Self {
        Self {
            frequency_hz: 523.25,
            volume,
            attack: Duration::from_millis(10),
            duration: Duration::from_millis(200),
            floor: 0.001,
        }
    }
}

/// Plays tones. Errors are reported to the manager, which logs and moves
/// on.
pub trait TonePlayer {
    /// Schedule `tone` to start immediately.
    fn play(&mut self, tone: &ToneSpec) -> Result<(), EffectError>;
}
