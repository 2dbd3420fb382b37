//! The rendering surface effects are drawn on.
//!
//! The surface is opaque to the manager: it accepts absolutely positioned
//! elements described by an [`EffectElement`], removes them by id, and
//! animates them purely through the shared stylesheet.

use crate::effect::{EffectId, EffectKind, Position};
use crate::error::EffectError;
use crate::style::{MULTI_COLOR_CLASS, RIPPLE_CLASS, TRAIL_CLASS};

/// Everything a surface needs to materialize one effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectElement {
    /// Key used for later removal.
    pub id: EffectId,
    /// Ripple or trail.
    pub kind: EffectKind,
    /// CSS classes, primary class first.
    pub classes: Vec<&'static str>,
    /// Viewport anchor.
    pub position: Position,
    /// Explicit square size in pixels, if any.
    pub size: Option<f64>,
}

impl EffectElement {
    /// Ripple element, optionally tagged multi-color.
    #[must_use]
    pub fn ripple(id: EffectId, position: Position, multi_color: bool) -> Self {
        let mut classes = vec![RIPPLE_CLASS];
        if multi_color {
            classes.push(MULTI_COLOR_CLASS);
        }
        Self {
            id,
            kind: EffectKind::Ripple,
            classes,
            position,
            size: None,
        }
    }

    /// Trail dot `size` pixels across.
    #[must_use]
    pub fn trail(id: EffectId, position: Position, size: f64) -> Self {
        Self {
            id,
            kind: EffectKind::Trail,
            classes: vec![TRAIL_CLASS],
            position,
            size: Some(size),
        }
    }

    /// Space-separated class attribute value.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

/// Host surface mutations.
pub trait Surface {
    /// Install the shared stylesheet. Called once on activation.
    fn install_style(&mut self, css: &str) -> Result<(), EffectError>;

    /// Replace the text of the installed stylesheet.
    fn update_style(&mut self, css: &str) -> Result<(), EffectError>;

    /// Attach a new element.
    fn append(&mut self, element: &EffectElement) -> Result<(), EffectError>;

    /// Detach the element with `id`. Must be a no-op when it is not
    /// attached.
    fn remove(&mut self, id: EffectId) -> Result<(), EffectError>;

    /// Toggle presentational suppression of all effects.
    fn set_suppressed(&mut self, suppressed: bool) -> Result<(), EffectError>;
}
