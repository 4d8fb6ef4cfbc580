// Integration tests (native) for the `sensory-match` crate.
// These tests drive full sessions through `GameRuntime` with in-memory collaborators
// so they run under `cargo test` on the host.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sensory_match::catalog::{Category, Item};
use sensory_match::difficulty::HARD;
use sensory_match::store::{ManualScheduler, MemoryScoreStore, RecordingCuePlayer};
use sensory_match::{
    BorderPattern, Event, GameError, GameRuntime, GameSession, IdentityError, PersistenceError,
    Phase, SettingToggle, TimerKind, UserId,
};

type TestRuntime = GameRuntime<MemoryScoreStore, RecordingCuePlayer, ManualScheduler, ChaCha8Rng>;

fn runtime_with(session: GameSession, store: MemoryScoreStore, seed: u64) -> TestRuntime {
    GameRuntime::new(
        session,
        store,
        RecordingCuePlayer::default(),
        ManualScheduler::default(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

fn user() -> UserId {
    UserId::new("anon-test")
}

fn start_playing(rt: &mut TestRuntime) {
    rt.dispatch(Event::BeginSetup).unwrap();
    rt.dispatch(Event::Play).unwrap();
    assert_eq!(rt.session().phase(), Phase::Playing);
}

fn target(rt: &TestRuntime) -> String {
    rt.session().round().unwrap().target().id.to_string()
}

fn wrong(rt: &TestRuntime) -> String {
    let round = rt.session().round().unwrap();
    let target = round.target().id;
    round
        .choices()
        .iter()
        .map(|item| item.id)
        .find(|id| *id != target)
        .unwrap()
        .to_string()
}

fn elapse_advance(rt: &mut TestRuntime) {
    let token = rt
        .scheduler_mut()
        .elapse(TimerKind::AutoAdvance)
        .expect("auto-advance should be pending");
    rt.dispatch(Event::TimerFired {
        kind: TimerKind::AutoAdvance,
        token,
    })
    .unwrap();
}

#[test]
fn boot_loads_stored_high_score() {
    let store = MemoryScoreStore::with_score(&user(), 6);
    let mut rt = runtime_with(GameSession::default(), store, 1);
    rt.boot(Ok(user()));
    assert_eq!(rt.session().high_score(), 6);
    assert_eq!(rt.user(), Some(&user()));
}

#[test]
fn correct_streak_updates_and_persists_high_score() {
    let mut rt = runtime_with(GameSession::default(), MemoryScoreStore::default(), 2);
    rt.boot(Ok(user()));
    start_playing(&mut rt);

    for expected in 1..=2 {
        let id = target(&rt);
        rt.dispatch(Event::Choose(id)).unwrap();
        assert_eq!(rt.session().score(), expected);
        elapse_advance(&mut rt);
    }
    // score is 2; a third correct answer lifts both counters to 3
    let id = target(&rt);
    let name = rt.session().round().unwrap().target().display_name;
    rt.dispatch(Event::Choose(id)).unwrap();
    assert_eq!(rt.session().score(), 3);
    assert_eq!(rt.session().high_score(), 3);
    assert_eq!(rt.session().phase(), Phase::Feedback);
    assert!(rt.session().feedback().unwrap().message.contains(name));
    assert_eq!(rt.store().get(&user()), Some(3));
}

#[test]
fn wrong_answer_resets_score_but_keeps_high_score() {
    let mut rt = runtime_with(GameSession::default(), MemoryScoreStore::default(), 3);
    rt.boot(Ok(user()));
    start_playing(&mut rt);
    for _ in 0..5 {
        let id = target(&rt);
        rt.dispatch(Event::Choose(id)).unwrap();
        elapse_advance(&mut rt);
    }
    assert_eq!(rt.session().score(), 5);

    let wrong_id = wrong(&rt);
    let round = rt.session().round().unwrap().clone();
    rt.dispatch(Event::Choose(wrong_id.clone())).unwrap();
    assert_eq!(rt.session().score(), 0);
    assert_eq!(rt.session().high_score(), 5);
    let message = &rt.session().feedback().unwrap().message;
    assert!(message.contains(round.choice(&wrong_id).unwrap().display_name));
    assert!(message.contains(round.target().display_name));
    assert_eq!(rt.store().get(&user()), Some(5));
}

#[test]
fn missing_identity_skips_persistence() {
    let store = MemoryScoreStore::with_score(&user(), 9);
    let mut rt = runtime_with(GameSession::default(), store, 4);
    rt.boot(Err(IdentityError::Unavailable));
    assert_eq!(rt.session().high_score(), 0);
    assert!(rt.user().is_none());

    start_playing(&mut rt);
    let id = target(&rt);
    rt.dispatch(Event::Choose(id)).unwrap();
    assert_eq!(rt.session().high_score(), 1);
    assert_eq!(rt.store().get(&user()), Some(9));
}

#[test]
fn failing_store_never_blocks_play() {
    let store = MemoryScoreStore::failing(PersistenceError::Unavailable);
    let mut rt = runtime_with(GameSession::default(), store, 5);
    rt.boot(Ok(user()));
    assert_eq!(rt.session().high_score(), 0);

    start_playing(&mut rt);
    let id = target(&rt);
    rt.dispatch(Event::Choose(id)).unwrap();
    assert_eq!(rt.session().high_score(), 1);
    assert_eq!(rt.session().phase(), Phase::Feedback);
}

#[test]
fn manual_pacing_holds_feedback_until_next_round() {
    let mut rt = runtime_with(GameSession::default(), MemoryScoreStore::default(), 6);
    rt.dispatch(Event::Toggle(SettingToggle::ManualPacing)).unwrap();
    start_playing(&mut rt);
    let id = wrong(&rt);
    rt.dispatch(Event::Choose(id)).unwrap();
    assert!(rt.scheduler().pending(TimerKind::AutoAdvance).is_none());
    assert_eq!(rt.session().phase(), Phase::Feedback);
    assert!(rt.session().directives().show_next_round);

    rt.dispatch(Event::NextRound).unwrap();
    assert_eq!(rt.session().phase(), Phase::Playing);
    assert!(rt.session().feedback().is_none());
}

#[test]
fn auto_pacing_schedules_fixed_delay() {
    let mut rt = runtime_with(GameSession::default(), MemoryScoreStore::default(), 7);
    start_playing(&mut rt);
    let id = target(&rt);
    rt.dispatch(Event::Choose(id)).unwrap();
    let (_, delay) = rt.scheduler().pending(TimerKind::AutoAdvance).unwrap();
    assert_eq!(delay, 1800);
    elapse_advance(&mut rt);
    assert_eq!(rt.session().phase(), Phase::Playing);
}

#[test]
fn timer_from_previous_session_is_ignored() {
    let mut old = runtime_with(GameSession::default(), MemoryScoreStore::default(), 11);
    start_playing(&mut old);
    let id = target(&old);
    old.dispatch(Event::Choose(id)).unwrap();
    let (old_token, _) = old.scheduler().pending(TimerKind::AutoAdvance).unwrap();
    old.shutdown();
    assert!(old.scheduler().pending(TimerKind::AutoAdvance).is_none());

    let mut fresh = runtime_with(GameSession::default(), MemoryScoreStore::default(), 12);
    start_playing(&mut fresh);
    let id = target(&fresh);
    fresh.dispatch(Event::Choose(id)).unwrap();
    let (new_token, _) = fresh.scheduler().pending(TimerKind::AutoAdvance).unwrap();
    assert_ne!(old_token, new_token);

    fresh
        .dispatch(Event::TimerFired {
            kind: TimerKind::AutoAdvance,
            token: old_token,
        })
        .unwrap();
    assert_eq!(fresh.session().phase(), Phase::Feedback);
    assert!(fresh.session().timers().is_current(TimerKind::AutoAdvance, new_token));
}

#[test]
fn cue_plays_once_per_window() {
    let mut rt = runtime_with(GameSession::default(), MemoryScoreStore::default(), 8);
    start_playing(&mut rt);
    rt.dispatch(Event::RequestCue).unwrap();
    rt.dispatch(Event::RequestCue).unwrap();
    let target_id = target(&rt);
    assert_eq!(rt.cues().played, vec![(target_id.clone(), false)]);
    assert!(rt.session().directives().visual_cue.is_some());

    let token = rt.scheduler_mut().elapse(TimerKind::CueWindow).unwrap();
    rt.dispatch(Event::TimerFired {
        kind: TimerKind::CueWindow,
        token,
    })
    .unwrap();
    assert!(rt.session().directives().visual_cue.is_none());
    rt.dispatch(Event::Toggle(SettingToggle::Mute)).unwrap();
    rt.dispatch(Event::RequestCue).unwrap();
    assert_eq!(rt.cues().played.last(), Some(&(target_id, true)));
}

static TRIO_ITEMS: [Item; 3] = [
    Item::new("red", "Red", "text-red-500", "bg-red-100", "C4"),
    Item::new("blue", "Blue", "text-blue-500", "bg-blue-100", "E4"),
    Item::new("green", "Green", "text-green-500", "bg-green-100", "G4"),
];

static TRIO: Category = Category {
    key: "colors",
    display_name: "Colors",
    items: &TRIO_ITEMS,
};

#[test]
fn insufficient_items_keeps_setup() {
    let session = GameSession::default().with_selection(&TRIO, &HARD);
    let mut rt = runtime_with(session, MemoryScoreStore::default(), 9);
    rt.dispatch(Event::BeginSetup).unwrap();
    let err = rt.dispatch(Event::Play).unwrap_err();
    assert_eq!(
        err,
        GameError::InsufficientItems {
            category: "colors".into(),
            available: 3,
            required: 4,
        }
    );
    assert_eq!(rt.session().phase(), Phase::Setup);
    assert!(rt.session().round().is_none());

    // recoverable by picking a smaller difficulty
    rt.dispatch(Event::SelectDifficulty("medium".into())).unwrap();
    rt.dispatch(Event::Play).unwrap();
    assert_eq!(rt.session().phase(), Phase::Playing);
    assert_eq!(rt.session().round().unwrap().choices().len(), 3);
}

static FIVE_ITEMS: [Item; 5] = [
    Item::new("one", "One", "text-red-500", "bg-red-100", "C4"),
    Item::new("two", "Two", "text-blue-500", "bg-blue-100", "D4"),
    Item::new("three", "Three", "text-green-500", "bg-green-100", "E4"),
    Item::new("four", "Four", "text-yellow-500", "bg-yellow-100", "F4"),
    Item::new("five", "Five", "text-pink-500", "bg-pink-100", "G4"),
];

static FIVE: Category = Category {
    key: "numbers",
    display_name: "Numbers",
    items: &FIVE_ITEMS,
};

#[test]
fn colorblind_borders_follow_catalog_index() {
    let session = GameSession::default().with_selection(&FIVE, &HARD);
    let mut rt = runtime_with(session, MemoryScoreStore::default(), 10);
    rt.dispatch(Event::Toggle(SettingToggle::ColorblindMode)).unwrap();
    for round_no in 0..20 {
        if round_no == 0 {
            start_playing(&mut rt);
        } else {
            let id = target(&rt);
            rt.dispatch(Event::Choose(id)).unwrap();
            elapse_advance(&mut rt);
        }
        for choice in rt.session().directives().choices {
            let index = FIVE.index_of(choice.item_id).unwrap();
            assert_eq!(choice.border, Some(BorderPattern::for_index(index)));
            if choice.item_id == "five" {
                assert_eq!(choice.border, Some(BorderPattern::Solid));
            }
        }
    }
}
