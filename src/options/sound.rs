use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Click tone options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sound", inline)]
#[serde(default)]
pub struct SoundOptions {
    /// Play a short tone on every click.
    #[schemars(title = "Enable Sound")]
    pub enabled: bool,
    /// Peak gain of the tone.
    #[schemars(title = "Volume", range(min = 0.0, max = 1.0))]
    pub volume: f32,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: 0.1,
        }
    }
}
