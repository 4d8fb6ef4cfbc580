//! Sensory Match core crate.
//!
//! A listen-and-match quiz for young or sensory-sensitive learners. The game logic
//! (catalog, round generation, state machine, accessibility presenter) is plain Rust
//! and runs on the host; the `wasm_bindgen` exports below drive it from a web page,
//! which renders whatever `view_json()` describes.

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod present;
pub mod round;
pub mod runtime;
pub mod settings;
pub mod store;
pub mod view;
pub mod web;

pub use catalog::{Category, Item};
pub use config::GameConfig;
pub use difficulty::Difficulty;
pub use error::{ConfigError, GameError, IdentityError, PersistenceError};
pub use game::{Effect, Event, Feedback, GameSession, Phase, TimerKind, TimerToken};
pub use present::{BorderPattern, PresentationDirectives, Theme, present};
pub use round::{Round, generate_round};
pub use runtime::GameRuntime;
pub use settings::{SettingToggle, Settings};
pub use store::{CuePlayer, ScoreStore, TimerScheduler, UserId};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Browser session
// -----------------------------------------------------------------------------

type WebRuntime =
    GameRuntime<web::LocalScoreStore, web::WebCuePlayer, web::TimeoutScheduler, ChaCha8Rng>;

thread_local! {
    static RUNTIME: RefCell<Option<WebRuntime>> = const { RefCell::new(None) };
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn with_runtime<T>(f: impl FnOnce(&mut WebRuntime) -> Result<T, JsValue>) -> Result<T, JsValue> {
    RUNTIME.with(|slot| {
        let mut slot = slot.borrow_mut();
        let runtime = slot
            .as_mut()
            .ok_or_else(|| JsValue::from_str("game not started"))?;
        f(runtime)
    })
}

fn dispatch(event: Event) -> Result<(), JsValue> {
    with_runtime(|runtime| runtime.dispatch(event).map_err(to_js))
}

fn fire_timer(kind: TimerKind, token: TimerToken) {
    if let Err(err) = dispatch(Event::TimerFired { kind, token }) {
        log::warn!("timer {kind:?} failed: {err:?}");
    }
}

/// Boot the game. `config_json` optionally overrides [`GameConfig`] fields.
#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsValue> {
    web::init_logging(log::LevelFilter::Info);
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(to_js)?,
        None => GameConfig::default(),
    };
    let session = GameSession::new(&config).map_err(to_js)?;
    let mut rng = ChaCha8Rng::from_entropy();
    let identity = web::resolve_identity(&config.storage_namespace, &mut rng);
    let mut runtime = GameRuntime::new(
        session,
        web::LocalScoreStore::new(&config.storage_namespace),
        web::WebCuePlayer::default(),
        web::TimeoutScheduler::new(fire_timer),
        rng,
    );
    runtime.boot(identity);
    RUNTIME.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(mut previous) = slot.take() {
            previous.shutdown();
        }
        *slot = Some(runtime);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn begin_setup() -> Result<(), JsValue> {
    dispatch(Event::BeginSetup)
}

#[wasm_bindgen]
pub fn select_category(key: &str) -> Result<(), JsValue> {
    dispatch(Event::SelectCategory(key.to_string()))
}

#[wasm_bindgen]
pub fn select_difficulty(key: &str) -> Result<(), JsValue> {
    dispatch(Event::SelectDifficulty(key.to_string()))
}

#[wasm_bindgen]
pub fn play() -> Result<(), JsValue> {
    dispatch(Event::Play)
}

#[wasm_bindgen]
pub fn play_cue() -> Result<(), JsValue> {
    dispatch(Event::RequestCue)
}

#[wasm_bindgen]
pub fn choose(item_id: &str) -> Result<(), JsValue> {
    dispatch(Event::Choose(item_id.to_string()))
}

#[wasm_bindgen]
pub fn next_round() -> Result<(), JsValue> {
    dispatch(Event::NextRound)
}

/// Flip a setting by key (`mute`, `manual_pacing`, `visual_cues`, `high_contrast`,
/// `colorblind_mode`) and return its new value.
#[wasm_bindgen]
pub fn toggle_setting(key: &str) -> Result<bool, JsValue> {
    let toggle = SettingToggle::from_key(key)
        .ok_or_else(|| JsValue::from_str(&format!("unknown setting '{key}'")))?;
    dispatch(Event::Toggle(toggle))?;
    with_runtime(|runtime| Ok(runtime.session().settings().get(toggle)))
}

/// Current view model as JSON.
#[wasm_bindgen]
pub fn view_json() -> Result<String, JsValue> {
    with_runtime(|runtime| {
        let view = view::view_model(runtime.session(), runtime.user());
        serde_json::to_string(&view).map_err(to_js)
    })
}
