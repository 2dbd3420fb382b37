use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioScheduledSourceNode, OscillatorType};

use super::describe;
use crate::error::EffectError;
use crate::sound::{TonePlayer, ToneSpec};

fn tone_err(e: &JsValue) -> EffectError {
    EffectError::Tone(describe(e))
}

/// Tone player on the Web Audio API.
///
/// One `AudioContext` is created on first use and reused afterwards;
/// browsers cap how many a page may open.
#[derive(Default)]
pub struct WebAudioTonePlayer {
    context: Option<AudioContext>,
}

impl WebAudioTonePlayer {
    /// Player with no context yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<AudioContext, EffectError> {
        if let Some(context) = &self.context {
            return Ok(context.clone());
        }
        let context = AudioContext::new().map_err(|e| tone_err(&e))?;
        self.context = Some(context.clone());
        Ok(context)
    }
}

impl TonePlayer for WebAudioTonePlayer {
    fn play(&mut self, tone: &ToneSpec) -> Result<(), EffectError> {
        let ctx = self.context()?;
        let oscillator = ctx.create_oscillator().map_err(|e| tone_err(&e))?;
        let gain = ctx.create_gain().map_err(|e| tone_err(&e))?;
        let _ = oscillator
            .connect_with_audio_node(&gain)
            .map_err(|e| tone_err(&e))?;
        let _ = gain
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| tone_err(&e))?;

        oscillator.set_type(OscillatorType::Sine);
        oscillator.frequency().set_value(tone.frequency_hz);

        let start = ctx.current_time();
        let peak = start + tone.attack.as_secs_f64();
        let end = start + tone.duration.as_secs_f64();
        let envelope = gain.gain();
        let _ = envelope
            .set_value_at_time(0.0, start)
            .map_err(|e| tone_err(&e))?;
        let _ = envelope
            .linear_ramp_to_value_at_time(tone.volume, peak)
            .map_err(|e| tone_err(&e))?;
        let _ = envelope
            .exponential_ramp_to_value_at_time(tone.floor, end)
            .map_err(|e| tone_err(&e))?;

        let source: &AudioScheduledSourceNode = &oscillator;
        source.start_with_when(start).map_err(|e| tone_err(&e))?;
        source.stop_with_when(end).map_err(|e| tone_err(&e))?;
        Ok(())
    }
}
