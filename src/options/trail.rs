use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer trail appearance and lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Trail", inline)]
#[serde(default)]
pub struct TrailOptions {
    /// Whether pointer movement leaves a trail at all.
    #[schemars(title = "Enable Trail")]
    pub enabled: bool,
    /// Dot color.
    #[schemars(title = "Color")]
    pub color: String,
    /// Dot diameter in pixels.
    #[schemars(title = "Size", range(min = 1.0, max = 64.0))]
    pub size: f64,
    /// How long each dot stays on screen, in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 50, max = 5000))]
    pub duration_ms: u64,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#409EFF".to_owned(),
            size: 12.0,
            duration_ms: 600,
        }
    }
}
