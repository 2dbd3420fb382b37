//! Effect configuration with TOML preset and JSON support.
//!
//! The record is read once when an [`EffectManager`](crate::effect::EffectManager)
//! is built. Only the ripple color changes afterwards, through
//! [`EffectManager::change_color`](crate::effect::EffectManager::change_color).

mod platform;
mod ripple;
mod sound;
mod style;
mod trail;

use std::path::Path;

pub use platform::PlatformOptions;
pub use ripple::RippleOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sound::SoundOptions;
pub use style::StyleOptions;
pub use trail::TrailOptions;

use crate::error::EffectError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial files (e.g. only overriding `[trail]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Click ripple options.
    pub ripple: RippleOptions,
    /// Pointer trail options.
    pub trail: TrailOptions,
    /// Click tone options.
    pub sound: SoundOptions,
    /// Device-dependent behavior.
    pub platform: PlatformOptions,
    /// Stylesheet generation.
    #[schemars(skip)]
    pub style: StyleOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a JSON string. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        serde_json::from_str(json)
            .map_err(|e| EffectError::OptionsParse(e.to_string()))
    }

    /// Serialize options to a JSON string.
    pub fn to_json(&self) -> Result<String, EffectError> {
        serde_json::to_string(self)
            .map_err(|e| EffectError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EffectError> {
        let content = std::fs::read_to_string(path).map_err(EffectError::Io)?;
        toml::from_str(&content)
            .map_err(|e| EffectError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EffectError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EffectError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(EffectError::Io)?;
        }
        std::fs::write(path, content).map_err(EffectError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_script() {
        let opts = Options::default();
        assert_eq!(opts.ripple.color, "#409EFF");
        assert!(!opts.ripple.multi_color);
        assert_eq!(opts.ripple.max_count, 5);
        assert!(opts.trail.enabled);
        assert_eq!(opts.trail.color, "#409EFF");
        assert_eq!(opts.trail.size, 12.0);
        assert_eq!(opts.trail.duration_ms, 600);
        assert!(!opts.sound.enabled);
        assert_eq!(opts.sound.volume, 0.1);
        assert!(opts.platform.disable_on_mobile);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[trail]
size = 20.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.trail.size, 20.0);
        // Everything else should be default
        assert_eq!(opts.trail.duration_ms, 600);
        assert_eq!(opts.ripple, RippleOptions::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts =
            Options::from_json(r##"{"ripple": {"color": "#FF0000"}}"##)
                .unwrap();
        assert_eq!(opts.ripple.color, "#FF0000");
        assert_eq!(opts.ripple.max_count, 5);
        assert!(opts.style.include_base_rules);
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        let err = Options::from_json("{ripple:").unwrap_err();
        assert!(matches!(err, EffectError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = std::env::temp_dir().join("pointer-fx-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.sound.enabled = true;
        opts.ripple.max_count = 3;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("ripple"));
        assert!(props.contains_key("trail"));
        assert!(props.contains_key("sound"));
        assert!(props.contains_key("platform"));
        assert!(!props.contains_key("style"));

        let trail = &props["trail"]["properties"];
        assert!(trail.get("duration_ms").is_some());
        assert!(trail.get("size").is_some());
    }
}
