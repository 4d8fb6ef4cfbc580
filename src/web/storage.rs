// localStorage-backed score store and anonymous identity.

use rand::Rng;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;
use web_sys::{Storage, window};

use crate::error::{IdentityError, PersistenceError};
use crate::store::{ScoreStore, UserId};

const HIGH_SCORE_FIELD: &str = "highScore";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRecord {
    #[serde(default, deserialize_with = "lenient_score")]
    high_score: u32,
}

/// Any missing, null, negative or non-numeric value reads as 0; fractional scores are
/// truncated.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let score = match value {
        Value::Number(n) => n
            .as_u64()
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.min(f64::from(u32::MAX)) as u32)
            })
            .unwrap_or(0),
        _ => 0,
    };
    Ok(score)
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub(crate) fn js_err(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub fn record_key(namespace: &str, user: &UserId) -> String {
    format!("{namespace}/users/{user}/gameData/main")
}

pub fn identity_key(namespace: &str) -> String {
    format!("{namespace}/anon-id")
}

/// Stores `{"highScore": n}` per user, merging into any existing record.
pub struct LocalScoreStore {
    namespace: String,
}

impl LocalScoreStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
        }
    }
}

impl ScoreStore for LocalScoreStore {
    fn read(&self, user: &UserId) -> Result<Option<u32>, PersistenceError> {
        let storage = local_storage().ok_or(PersistenceError::Unavailable)?;
        let raw = storage
            .get_item(&record_key(&self.namespace, user))
            .map_err(|err| PersistenceError::Read(js_err(err)))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        decode_high_score(&raw).map(Some)
    }

    fn write(&mut self, user: &UserId, score: u32) -> Result<(), PersistenceError> {
        let storage = local_storage().ok_or(PersistenceError::Unavailable)?;
        let key = record_key(&self.namespace, user);
        let existing = storage
            .get_item(&key)
            .map_err(|err| PersistenceError::Read(js_err(err)))?;
        let merged = merge_high_score(existing.as_deref(), score)?;
        storage
            .set_item(&key, &merged)
            .map_err(|err| PersistenceError::Write(js_err(err)))
    }
}

pub fn decode_high_score(raw: &str) -> Result<u32, PersistenceError> {
    serde_json::from_str::<ScoreRecord>(raw)
        .map(|record| record.high_score)
        .map_err(|err| PersistenceError::Decode(err.to_string()))
}

/// Set the high score field, keeping unrelated fields of an existing record. A
/// malformed record is replaced.
pub fn merge_high_score(existing: Option<&str>, score: u32) -> Result<String, PersistenceError> {
    let mut fields = existing
        .and_then(|raw| serde_json::from_str::<Map<String, Value>>(raw).ok())
        .unwrap_or_default();
    fields.insert(HIGH_SCORE_FIELD.to_string(), Value::from(score));
    serde_json::to_string(&fields).map_err(|err| PersistenceError::Write(err.to_string()))
}

/// Load the anonymous user id, creating and saving one on first visit.
pub fn resolve_identity<R: Rng + ?Sized>(
    namespace: &str,
    rng: &mut R,
) -> Result<UserId, IdentityError> {
    let storage = local_storage().ok_or(IdentityError::Unavailable)?;
    let key = identity_key(namespace);
    let stored = storage
        .get_item(&key)
        .map_err(|err| IdentityError::Storage(js_err(err)))?;
    if let Some(id) = stored.filter(|id| !id.trim().is_empty()) {
        return Ok(UserId::new(id));
    }
    let id = format!("anon-{:016x}", rng.r#gen::<u64>());
    storage
        .set_item(&key, &id)
        .map_err(|err| IdentityError::Storage(js_err(err)))?;
    log::info!("created anonymous identity {id}");
    Ok(UserId::new(id))
}
