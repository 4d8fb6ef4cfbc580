// Deferred actions owned by the state machine. Each kind has at most one pending
// instance; starting a new one supersedes the old token, so a late firing of the old
// timer is recognised as stale and dropped. Tokens come from one process-wide counter,
// so a timer left over from an earlier session never matches a later one.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Visual cue display window; cue requests are debounced while pending.
    CueWindow,
    /// Automatic move from feedback to the next round.
    AutoAdvance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    cue_window: Option<TimerToken>,
    auto_advance: Option<TimerToken>,
}

impl Timers {
    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<TimerToken> {
        match kind {
            TimerKind::CueWindow => &mut self.cue_window,
            TimerKind::AutoAdvance => &mut self.auto_advance,
        }
    }

    pub fn pending(&self, kind: TimerKind) -> Option<TimerToken> {
        match kind {
            TimerKind::CueWindow => self.cue_window,
            TimerKind::AutoAdvance => self.auto_advance,
        }
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending(kind).is_some()
    }

    /// Issue a fresh token for `kind`, replacing any pending one.
    pub fn start(&mut self, kind: TimerKind) -> TimerToken {
        let token = TimerToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed));
        *self.slot_mut(kind) = Some(token);
        token
    }

    pub fn cancel(&mut self, kind: TimerKind) -> Option<TimerToken> {
        self.slot_mut(kind).take()
    }

    pub fn is_current(&self, kind: TimerKind, token: TimerToken) -> bool {
        self.pending(kind) == Some(token)
    }
}
