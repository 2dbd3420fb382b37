//! The single stylesheet shared by every ripple and trail.
//!
//! Elements only carry class names and geometry, so rewriting this text
//! recolors effects that are already on screen as well as future ones.

use std::fmt::Write as _;

use crate::effect::RIPPLE_LIFETIME;
use crate::options::Options;

/// Class applied to ripple elements.
pub const RIPPLE_CLASS: &str = "click-ripple";
/// Extra class applied to ripples when multi-color is enabled.
pub const MULTI_COLOR_CLASS: &str = "multi-color";
/// Class applied to trail elements.
pub const TRAIL_CLASS: &str = "mouse-trail";
/// Class placed on the document body while effects are suppressed.
pub const SUPPRESSED_CLASS: &str = "no-mouse-effect";

/// Generated stylesheet text plus the color it was last painted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    text: String,
    ripple_color: String,
}

impl StyleSheet {
    /// Build the stylesheet for `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let ripple = &options.ripple.color;
        let trail = &options.trail.color;
        let mut text = format!(
            "
.{RIPPLE_CLASS} {{
  border-color: {ripple} !important;
  box-shadow: 0 0 10px {ripple} !important;
}}
.{TRAIL_CLASS} {{
  background: {trail} !important;
}}
"
        );
        if options.style.include_base_rules {
            push_base_rules(&mut text, options.trail.duration_ms);
        }
        Self {
            text,
            ripple_color: ripple.clone(),
        }
    }

    /// Full stylesheet text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Color most recently applied to ripples.
    #[must_use]
    pub fn ripple_color(&self) -> &str {
        &self.ripple_color
    }

    /// Rewrite every `#rrggbb` token in the text to `color`.
    ///
    /// Trail colors written as hex tokens are rewritten too. A non-hex
    /// `color` leaves no tokens behind, so later recolors find nothing to
    /// replace.
    pub fn recolor(&mut self, color: &str) {
        self.text = replace_color_tokens(&self.text, color);
        color.clone_into(&mut self.ripple_color);
    }
}

/// Replace each `#` followed by six hex digits with `color`.
#[must_use]
pub fn replace_color_tokens(text: &str, color: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' && starts_with_hex6(&bytes[i + 1..]) {
            out.push_str(&text[copied..i]);
            out.push_str(color);
            i += 7;
            copied = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

fn starts_with_hex6(rest: &[u8]) -> bool {
    rest.len() >= 6 && rest[..6].iter().all(u8::is_ascii_hexdigit)
}

// Positioning and animation. Colors here must stay out of `#rrggbb` form
// or recolor() would overwrite them.
fn push_base_rules(text: &mut String, trail_ms: u64) {
    let ripple_ms = RIPPLE_LIFETIME.as_millis();
    let _ = write!(
        text,
        "
.{RIPPLE_CLASS} {{
  position: fixed;
  width: 0;
  height: 0;
  border: 2px solid;
  border-radius: 50%;
  pointer-events: none;
  transform: translate(-50%, -50%);
  animation: pointer-fx-ripple {ripple_ms}ms ease-out forwards;
  z-index: 2147483647;
}}
.{TRAIL_CLASS} {{
  position: fixed;
  border-radius: 50%;
  pointer-events: none;
  transform: translate(-50%, -50%);
  animation: pointer-fx-trail {trail_ms}ms linear forwards;
  z-index: 2147483646;
}}
@keyframes pointer-fx-ripple {{
  from {{ width: 0; height: 0; opacity: 1; }}
  to {{ width: 100px; height: 100px; opacity: 0; }}
}}
@keyframes pointer-fx-trail {{
  from {{ opacity: 0.8; }}
  to {{ opacity: 0; transform: translate(-50%, -50%) scale(0.2); }}
}}
.{SUPPRESSED_CLASS} .{RIPPLE_CLASS},
.{SUPPRESSED_CLASS} .{TRAIL_CLASS} {{
  display: none !important;
}}
"
    );
}
