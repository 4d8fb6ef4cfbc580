//! Game state machine.
//!
//! `GameSession` is an explicit value driven by [`Event`]s. Each call to
//! [`GameSession::handle`] performs one transition and returns the [`Effect`]s the
//! outside world must carry out (play a cue, arm or cancel a timer, persist a high
//! score). The session itself never touches I/O, so every transition can be tested
//! with a seeded rng and no UI.
//!
//! Phases: `Start -> Setup -> Playing -> Feedback -> Playing -> ...`

use rand::Rng;
use serde::Serialize;

use crate::catalog::{self, Category, SHAPES};
use crate::config::{AUTO_ADVANCE_MS, CUE_WINDOW_MS, GameConfig};
use crate::difficulty::{self, Difficulty, MEDIUM};
use crate::error::GameError;
use crate::present::{PresentationDirectives, present};
use crate::round::{Round, generate_round};
use crate::settings::{SettingToggle, Settings};

mod timers;

pub use timers::{TimerKind, TimerToken, Timers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Setup,
    Playing,
    Feedback,
}

/// Outcome of the last choice, shown during `Feedback`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    BeginSetup,
    SelectCategory(String),
    SelectDifficulty(String),
    /// Confirm setup and start playing.
    Play,
    RequestCue,
    Choose(String),
    /// Explicit advance; only honoured under manual pacing.
    NextRound,
    Toggle(SettingToggle),
    TimerFired { kind: TimerKind, token: TimerToken },
    /// Completion of the startup Score Store read.
    HighScoreLoaded(Option<u32>),
}

/// Instruction for the collaborators around the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    PlayCue { item_id: &'static str, muted: bool },
    ScheduleTimer {
        kind: TimerKind,
        token: TimerToken,
        delay_ms: u32,
    },
    CancelTimer { kind: TimerKind },
    PersistHighScore(u32),
}

#[derive(Clone, Debug)]
pub struct GameSession {
    phase: Phase,
    score: u32,
    high_score: u32,
    category: &'static Category,
    difficulty: &'static Difficulty,
    round: Option<Round>,
    feedback: Option<Feedback>,
    settings: Settings,
    timers: Timers,
    cue_window_ms: u32,
    auto_advance_ms: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: Phase::Start,
            score: 0,
            high_score: 0,
            category: &SHAPES,
            difficulty: &MEDIUM,
            round: None,
            feedback: None,
            settings: Settings::initial(),
            timers: Timers::default(),
            cue_window_ms: CUE_WINDOW_MS,
            auto_advance_ms: AUTO_ADVANCE_MS,
        }
    }
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let category = catalog::category(&config.default_category)
            .ok_or_else(|| GameError::UnknownCategory(config.default_category.clone()))?;
        let difficulty = difficulty::difficulty(&config.default_difficulty)
            .ok_or_else(|| GameError::UnknownDifficulty(config.default_difficulty.clone()))?;
        Ok(Self {
            category,
            difficulty,
            cue_window_ms: config.cue_window_ms,
            auto_advance_ms: config.auto_advance_ms,
            ..Self::default()
        })
    }

    /// Preselect a category and difficulty that need not come from the built-in
    /// tables (custom content packs).
    pub fn with_selection(
        mut self,
        category: &'static Category,
        difficulty: &'static Difficulty,
    ) -> Self {
        self.category = category;
        self.difficulty = difficulty;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn category(&self) -> &'static Category {
        self.category
    }

    pub fn difficulty(&self) -> &'static Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// True while the visual cue window is open.
    pub fn cue_active(&self) -> bool {
        self.timers.is_pending(TimerKind::CueWindow)
    }

    pub fn directives(&self) -> PresentationDirectives {
        present(
            &self.settings,
            self.category,
            self.round.as_ref(),
            self.phase,
            self.cue_active(),
            self.feedback.as_ref(),
        )
    }

    /// Apply one event. Ignored events return no effects; on `Err` the session is
    /// unchanged.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: Event,
        rng: &mut R,
    ) -> Result<Vec<Effect>, GameError> {
        log::debug!("{:?} <- {:?}", self.phase, event);
        match event {
            Event::BeginSetup => Ok(self.begin_setup()),
            Event::SelectCategory(key) => self.select_category(&key),
            Event::SelectDifficulty(key) => self.select_difficulty(&key),
            Event::Play => self.play(rng),
            Event::RequestCue => Ok(self.request_cue()),
            Event::Choose(id) => Ok(self.choose(&id)),
            Event::NextRound => {
                if self.phase == Phase::Feedback && self.settings.manual_pacing {
                    self.advance(rng)
                } else {
                    Ok(Vec::new())
                }
            }
            Event::Toggle(toggle) => Ok(self.toggle(toggle)),
            Event::TimerFired { kind, token } => self.timer_fired(kind, token, rng),
            Event::HighScoreLoaded(stored) => {
                if let Some(stored) = stored {
                    self.high_score = self.high_score.max(stored);
                }
                Ok(Vec::new())
            }
        }
    }

    fn begin_setup(&mut self) -> Vec<Effect> {
        if self.phase == Phase::Start {
            self.phase = Phase::Setup;
        }
        Vec::new()
    }

    fn ensure_selectable(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Start | Phase::Setup => Ok(()),
            phase => Err(GameError::SelectionLocked { phase }),
        }
    }

    fn select_category(&mut self, key: &str) -> Result<Vec<Effect>, GameError> {
        self.ensure_selectable()?;
        self.category =
            catalog::category(key).ok_or_else(|| GameError::UnknownCategory(key.to_string()))?;
        Ok(Vec::new())
    }

    fn select_difficulty(&mut self, key: &str) -> Result<Vec<Effect>, GameError> {
        self.ensure_selectable()?;
        self.difficulty = difficulty::difficulty(key)
            .ok_or_else(|| GameError::UnknownDifficulty(key.to_string()))?;
        Ok(Vec::new())
    }

    fn play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Effect>, GameError> {
        if self.phase != Phase::Setup {
            return Ok(Vec::new());
        }
        let round = generate_round(self.category, self.difficulty, rng)?;
        self.score = 0;
        log::info!(
            "game started: category={} difficulty={}",
            self.category.key,
            self.difficulty.key
        );
        Ok(self.install_round(round))
    }

    /// Generate the next round with the current selection and return to `Playing`.
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Effect>, GameError> {
        let round = generate_round(self.category, self.difficulty, rng)?;
        Ok(self.install_round(round))
    }

    fn install_round(&mut self, round: Round) -> Vec<Effect> {
        let effects: Vec<Effect> = [TimerKind::AutoAdvance, TimerKind::CueWindow]
            .into_iter()
            .filter_map(|kind| self.cancel_timer(kind))
            .collect();
        self.round = Some(round);
        self.feedback = None;
        self.phase = Phase::Playing;
        effects
    }

    fn request_cue(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Playing || self.cue_active() {
            return Vec::new();
        }
        let Some(target) = self.round.as_ref().map(Round::target) else {
            return Vec::new();
        };
        vec![
            Effect::PlayCue {
                item_id: target.id,
                muted: self.settings.muted,
            },
            self.schedule_timer(TimerKind::CueWindow),
        ]
    }

    fn choose(&mut self, id: &str) -> Vec<Effect> {
        if self.phase != Phase::Playing {
            return Vec::new();
        }
        let Some(round) = self.round.as_ref() else {
            return Vec::new();
        };
        let Some(chosen) = round.choice(id) else {
            log::warn!("ignoring choice '{id}' outside the current round");
            return Vec::new();
        };
        let target = round.target();

        let mut effects = Vec::new();
        if chosen.id == target.id {
            self.score = self.score.saturating_add(1);
            if self.score > self.high_score {
                self.high_score = self.score;
                log::info!("new high score {}", self.high_score);
                effects.push(Effect::PersistHighScore(self.high_score));
            }
            self.feedback = Some(Feedback {
                is_correct: true,
                message: format!("You found the {}!", chosen.display_name),
            });
        } else {
            self.score = 0;
            self.feedback = Some(Feedback {
                is_correct: false,
                message: format!(
                    "That's a {}. Let's find the {}!",
                    chosen.display_name, target.display_name
                ),
            });
        }
        self.phase = Phase::Feedback;
        if !self.settings.manual_pacing {
            effects.push(self.schedule_timer(TimerKind::AutoAdvance));
        }
        effects
    }

    fn toggle(&mut self, toggle: SettingToggle) -> Vec<Effect> {
        let enabled = self.settings.toggle(toggle);
        log::debug!("setting {} -> {}", toggle.key(), enabled);
        if toggle != SettingToggle::ManualPacing || self.phase != Phase::Feedback {
            return Vec::new();
        }
        if enabled {
            self.cancel_timer(TimerKind::AutoAdvance).into_iter().collect()
        } else {
            vec![self.schedule_timer(TimerKind::AutoAdvance)]
        }
    }

    fn timer_fired<R: Rng + ?Sized>(
        &mut self,
        kind: TimerKind,
        token: TimerToken,
        rng: &mut R,
    ) -> Result<Vec<Effect>, GameError> {
        if !self.timers.is_current(kind, token) {
            log::debug!("stale {kind:?} timer {token:?} dropped");
            return Ok(Vec::new());
        }
        match kind {
            TimerKind::CueWindow => {
                self.timers.cancel(kind);
                Ok(Vec::new())
            }
            TimerKind::AutoAdvance => {
                if self.phase != Phase::Feedback || self.settings.manual_pacing {
                    self.timers.cancel(kind);
                    return Ok(Vec::new());
                }
                let round = generate_round(self.category, self.difficulty, rng)?;
                self.timers.cancel(kind);
                Ok(self.install_round(round))
            }
        }
    }

    fn schedule_timer(&mut self, kind: TimerKind) -> Effect {
        let token = self.timers.start(kind);
        let delay_ms = match kind {
            TimerKind::CueWindow => self.cue_window_ms,
            TimerKind::AutoAdvance => self.auto_advance_ms,
        };
        Effect::ScheduleTimer {
            kind,
            token,
            delay_ms,
        }
    }

    fn cancel_timer(&mut self, kind: TimerKind) -> Option<Effect> {
        self.timers
            .cancel(kind)
            .map(|_| Effect::CancelTimer { kind })
    }
}
