use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Click ripple appearance and capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ripple", inline)]
#[serde(default)]
pub struct RippleOptions {
    /// Ring color. Passed through to the stylesheet unvalidated.
    #[schemars(title = "Color")]
    pub color: String,
    /// Tag ripples with the `multi-color` class.
    #[schemars(title = "Multi-color")]
    pub multi_color: bool,
    /// Maximum number of ripples on screen at once.
    #[schemars(title = "Max Ripples", range(min = 1, max = 64))]
    pub max_count: usize,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            color: "#409EFF".to_owned(),
            multi_color: false,
            max_count: 5,
        }
    }
}
