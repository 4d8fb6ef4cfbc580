// WebAudio cue player: a short enveloped tone at the item's cue note.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, OscillatorType};

use crate::catalog;
use crate::store::CuePlayer;
use crate::web::storage::js_err;

const CUE_SECONDS: f64 = 0.35;
const CUE_GAIN: f32 = 0.25;

/// The audio context is created on first use, which happens inside the click handler
/// so browsers allow playback.
#[derive(Default)]
pub struct WebCuePlayer {
    ctx: Option<AudioContext>,
}

impl WebCuePlayer {
    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.ctx.is_none() {
            self.ctx = Some(AudioContext::new()?);
        }
        self.ctx
            .as_ref()
            .ok_or_else(|| JsValue::from_str("audio context unavailable"))
    }
}

impl CuePlayer for WebCuePlayer {
    fn play(&mut self, item_id: &str, muted: bool) {
        if muted {
            return;
        }
        let Some(hz) = catalog::categories()
            .iter()
            .find_map(|category| category.item(item_id))
            .and_then(|item| note_frequency(item.cue_note))
        else {
            log::warn!("no cue tone for '{item_id}'");
            return;
        };
        let result = self.context().and_then(|ctx| tone(ctx, hz as f32));
        if let Err(err) = result {
            log::warn!("cue playback failed: {}", js_err(err));
        }
    }
}

fn tone(ctx: &AudioContext, hz: f32) -> Result<(), JsValue> {
    let _ = ctx.resume();
    let osc = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    osc.set_type(OscillatorType::Triangle);
    osc.frequency().set_value(hz);
    let now = ctx.current_time();
    gain.gain().set_value_at_time(CUE_GAIN, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(0.001, now + CUE_SECONDS)?;
    osc.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    osc.start()?;
    osc.stop_with_when(now + CUE_SECONDS)?;
    Ok(())
}

/// Frequency in Hz of a note like `C4`, `F#3` or `Bb5` (A4 = 440 Hz).
pub fn note_frequency(note: &str) -> Option<f64> {
    let mut chars = note.chars();
    let semitone: i32 = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let (shift, octave) = match rest.chars().next()? {
        '#' => (1, &rest[1..]),
        'b' => (-1, &rest[1..]),
        _ => (0, rest),
    };
    let octave: i32 = octave.parse().ok()?;
    let midi = 12 * (octave + 1) + semitone + shift;
    Some(440.0 * 2f64.powf(f64::from(midi - 69) / 12.0))
}
