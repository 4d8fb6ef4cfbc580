//! External collaborators at the edge of the core: score persistence, cue playback and
//! timer scheduling, plus in-memory implementations for host tests and headless use.

use std::collections::HashMap;
use std::fmt;

use crate::error::PersistenceError;
use crate::game::{TimerKind, TimerToken};

/// Opaque per-user identity established by an external sign-in step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persists a single high score per user.
pub trait ScoreStore {
    fn read(&self, user: &UserId) -> Result<Option<u32>, PersistenceError>;
    fn write(&mut self, user: &UserId, score: u32) -> Result<(), PersistenceError>;
}

/// Plays the audio cue for an item. Fire-and-forget; a muted request plays nothing.
pub trait CuePlayer {
    fn play(&mut self, item_id: &str, muted: bool);
}

/// Delivers `TimerFired` events later. Scheduling a kind replaces its pending timer.
pub trait TimerScheduler {
    fn schedule(&mut self, kind: TimerKind, token: TimerToken, delay_ms: u32);
    fn cancel(&mut self, kind: TimerKind);
}

#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    scores: HashMap<UserId, u32>,
    /// When set, every call fails with this error.
    pub fail_with: Option<PersistenceError>,
}

impl MemoryScoreStore {
    pub fn with_score(user: &UserId, score: u32) -> Self {
        let mut store = Self::default();
        store.scores.insert(user.clone(), score);
        store
    }

    /// A store whose every read and write fails with `err`.
    pub fn failing(err: PersistenceError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    pub fn get(&self, user: &UserId) -> Option<u32> {
        self.scores.get(user).copied()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self, user: &UserId) -> Result<Option<u32>, PersistenceError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.get(user)),
        }
    }

    fn write(&mut self, user: &UserId, score: u32) -> Result<(), PersistenceError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.scores.insert(user.clone(), score);
        Ok(())
    }
}

/// Records cue requests instead of making sound.
#[derive(Debug, Default)]
pub struct RecordingCuePlayer {
    pub played: Vec<(String, bool)>,
}

impl CuePlayer for RecordingCuePlayer {
    fn play(&mut self, item_id: &str, muted: bool) {
        self.played.push((item_id.to_string(), muted));
    }
}

/// Holds pending timers until the caller fires them explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: HashMap<TimerKind, (TimerToken, u32)>,
}

impl ManualScheduler {
    pub fn pending(&self, kind: TimerKind) -> Option<(TimerToken, u32)> {
        self.pending.get(&kind).copied()
    }

    /// Remove and return the pending token for `kind`, as if its delay elapsed.
    pub fn elapse(&mut self, kind: TimerKind) -> Option<TimerToken> {
        self.pending.remove(&kind).map(|(token, _)| token)
    }
}

impl TimerScheduler for ManualScheduler {
    fn schedule(&mut self, kind: TimerKind, token: TimerToken, delay_ms: u32) {
        self.pending.insert(kind, (token, delay_ms));
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.pending.remove(&kind);
    }
}
