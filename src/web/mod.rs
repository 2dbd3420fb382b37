//! Browser backends and the JS-facing handle (feature `web`).
//!
//! [`MouseEffect`] wires a [`DomSurface`], a [`TimeoutScheduler`] and a
//! [`WebAudioTonePlayer`] into an [`EffectManager`](crate::EffectManager)
//! and forwards `document` click and `mousemove` events to it.

mod audio;
mod bindings;
mod surface;
mod timer;

pub use audio::WebAudioTonePlayer;
pub use bindings::{install_mouse_effect, MouseEffect};
pub use surface::DomSurface;
pub use timer::TimeoutScheduler;

use wasm_bindgen::JsValue;

/// Render a JS exception for an error message.
fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}
