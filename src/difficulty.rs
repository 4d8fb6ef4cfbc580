//! Difficulty table: how many choices a round presents.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Difficulty {
    pub key: &'static str,
    pub display_name: &'static str,
    pub choice_count: usize,
}

pub static EASY: Difficulty = Difficulty {
    key: "easy",
    display_name: "Easy",
    choice_count: 2,
};

pub static MEDIUM: Difficulty = Difficulty {
    key: "medium",
    display_name: "Medium",
    choice_count: 3,
};

pub static HARD: Difficulty = Difficulty {
    key: "hard",
    display_name: "Hard",
    choice_count: 4,
};

static DIFFICULTIES: [&Difficulty; 3] = [&EASY, &MEDIUM, &HARD];

pub fn difficulties() -> &'static [&'static Difficulty] {
    &DIFFICULTIES
}

pub fn difficulty(key: &str) -> Option<&'static Difficulty> {
    DIFFICULTIES.iter().copied().find(|d| d.key == key)
}
