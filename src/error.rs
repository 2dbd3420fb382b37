//! Crate-level error types.

use std::fmt;

/// Errors produced by the pointer-fx crate.
#[derive(Debug)]
pub enum EffectError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// The host surface rejected a mutation.
    Surface(String),
    /// A deferred removal could not be scheduled.
    Schedule(String),
    /// Tone playback could not be constructed or scheduled.
    Tone(String),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
            Self::Schedule(msg) => {
                write!(f, "failed to schedule removal: {msg}")
            }
            Self::Tone(msg) => write!(f, "tone playback failed: {msg}"),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EffectError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
