use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Environment-dependent behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Platform", inline)]
#[serde(default)]
pub struct PlatformOptions {
    /// Stay inert when the device is detected as mobile.
    #[schemars(title = "Disable on Mobile")]
    pub disable_on_mobile: bool,
}

impl Default for PlatformOptions {
    fn default() -> Self {
        Self {
            disable_on_mobile: true,
        }
    }
}
