//! Browser adapters for the collaborators: console logging, localStorage persistence
//! and identity, WebAudio cues and `setTimeout` timers.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::game::{TimerKind, TimerToken};
use crate::store::TimerScheduler;

mod audio;
mod logger;
mod storage;

pub use audio::{WebCuePlayer, note_frequency};
pub use logger::init_logging;
pub use storage::{
    LocalScoreStore, decode_high_score, identity_key, merge_high_score, record_key,
    resolve_identity,
};

/// Timers backed by `window.setTimeout`. A firing timer calls `on_fire`, which feeds
/// the event back into the running game. Each pending handle owns its JS callback,
/// which is released when the kind is cancelled or rescheduled.
pub struct TimeoutScheduler {
    on_fire: fn(TimerKind, TimerToken),
    handles: HashMap<TimerKind, (i32, Closure<dyn FnMut()>)>,
}

impl TimeoutScheduler {
    pub fn new(on_fire: fn(TimerKind, TimerToken)) -> Self {
        Self {
            on_fire,
            handles: HashMap::new(),
        }
    }

    /// True while a timeout of `kind` and its callback are held.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.handles.contains_key(&kind)
    }
}

impl TimerScheduler for TimeoutScheduler {
    fn schedule(&mut self, kind: TimerKind, token: TimerToken, delay_ms: u32) {
        self.cancel(kind);
        let Some(win) = window() else {
            log::warn!("no window; {kind:?} timer dropped");
            return;
        };
        let on_fire = self.on_fire;
        let callback = Closure::wrap(Box::new(move || on_fire(kind, token)) as Box<dyn FnMut()>);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => {
                self.handles.insert(kind, (handle, callback));
            }
            Err(err) => log::warn!("setTimeout failed: {}", storage::js_err(err)),
        }
    }

    fn cancel(&mut self, kind: TimerKind) {
        let Some((handle, _callback)) = self.handles.remove(&kind) else {
            return;
        };
        if let Some(win) = window() {
            win.clear_timeout_with_handle(handle);
        }
    }
}
