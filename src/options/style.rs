use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Controls what goes into the shared stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Style", inline)]
#[serde(default)]
pub struct StyleOptions {
    /// Emit positioning, keyframes and the suppression rule alongside the
    /// color rules. Turn off when the host page ships its own.
    #[schemars(title = "Include Base Rules")]
    pub include_base_rules: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            include_base_rules: true,
        }
    }
}
