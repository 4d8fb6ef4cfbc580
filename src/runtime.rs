//! Event loop glue: feeds events into the session and carries out the resulting
//! effects against the collaborators.
//!
//! Persistence and identity failures are logged and skipped here; the in-memory high
//! score stays authoritative for the rest of the session.

use rand::Rng;

use crate::error::{GameError, IdentityError};
use crate::game::{Effect, Event, GameSession, TimerKind};
use crate::store::{CuePlayer, ScoreStore, TimerScheduler, UserId};

pub struct GameRuntime<S, C, T, R> {
    session: GameSession,
    user: Option<UserId>,
    store: S,
    cues: C,
    scheduler: T,
    rng: R,
}

impl<S, C, T, R> GameRuntime<S, C, T, R>
where
    S: ScoreStore,
    C: CuePlayer,
    T: TimerScheduler,
    R: Rng,
{
    pub fn new(session: GameSession, store: S, cues: C, scheduler: T, rng: R) -> Self {
        Self {
            session,
            user: None,
            store,
            cues,
            scheduler,
            rng,
        }
    }

    /// Attach the resolved identity and pull the stored high score. Without an
    /// identity the store is never consulted.
    pub fn boot(&mut self, identity: Result<UserId, IdentityError>) {
        let user = match identity {
            Ok(user) => user,
            Err(err) => {
                log::warn!("no user identity, high score stays in memory: {err}");
                return;
            }
        };
        log::info!("session booted for user {user}");
        match self.store.read(&user) {
            Ok(stored) => {
                if let Err(err) = self.dispatch(Event::HighScoreLoaded(stored)) {
                    log::warn!("high score load rejected: {err}");
                }
            }
            Err(err) => log::warn!("high score load failed: {err}"),
        }
        self.user = Some(user);
    }

    /// Run one transition. Only round generation failures are reported; the session
    /// is left untouched in that case.
    pub fn dispatch(&mut self, event: Event) -> Result<(), GameError> {
        let effects = self.session.handle(event, &mut self.rng)?;
        for effect in effects {
            self.execute(effect);
        }
        Ok(())
    }

    /// Cancel every outstanding timer before this runtime is dropped or replaced.
    pub fn shutdown(&mut self) {
        for kind in [TimerKind::CueWindow, TimerKind::AutoAdvance] {
            self.scheduler.cancel(kind);
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::PlayCue { item_id, muted } => self.cues.play(item_id, muted),
            Effect::ScheduleTimer {
                kind,
                token,
                delay_ms,
            } => self.scheduler.schedule(kind, token, delay_ms),
            Effect::CancelTimer { kind } => self.scheduler.cancel(kind),
            Effect::PersistHighScore(score) => {
                let Some(user) = &self.user else {
                    return;
                };
                if let Err(err) = self.store.write(user, score) {
                    log::warn!("high score {score} not saved: {err}");
                }
            }
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }
}
