//! Round generation: one target plus a shuffled set of unique distractors.
//!
//! Randomness is always injected so a seeded (or mock) generator reproduces a round
//! exactly.

use rand::Rng;
use serde::Serialize;

use crate::catalog::{Category, Item};
use crate::difficulty::Difficulty;
use crate::error::GameError;

/// A target item and the choices presented for it, in presentation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Round {
    target: &'static Item,
    choices: Vec<&'static Item>,
}

impl Round {
    pub fn target(&self) -> &'static Item {
        self.target
    }

    pub fn choices(&self) -> &[&'static Item] {
        &self.choices
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// Presentation slot of `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.choices.iter().position(|item| item.id == id)
    }

    pub fn choice(&self, id: &str) -> Option<&'static Item> {
        self.choices.iter().copied().find(|item| item.id == id)
    }
}

/// Build a round for `category` at `difficulty`.
///
/// Fails with [`GameError::InsufficientItems`] when the category cannot fill the
/// choice set; nothing is truncated.
pub fn generate_round<R: Rng + ?Sized>(
    category: &'static Category,
    difficulty: &Difficulty,
    rng: &mut R,
) -> Result<Round, GameError> {
    let required = difficulty.choice_count;
    if required == 0 || category.items.len() < required {
        return Err(GameError::InsufficientItems {
            category: category.key.to_string(),
            available: category.items.len(),
            required,
        });
    }

    let target = &category.items[rng.gen_range(0..category.items.len())];
    let complement: Vec<&'static Item> = category
        .items
        .iter()
        .filter(|item| item.id != target.id)
        .collect();

    let mut choices = Vec::with_capacity(required);
    choices.push(target);
    choices.extend(sample_distinct(&complement, required - 1, rng));
    shuffle(&mut choices, rng);

    log::debug!(
        "round generated: category={} target={} choices={}",
        category.key,
        target.id,
        choices.len()
    );
    Ok(Round { target, choices })
}

/// In-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Draw `k` elements of `pool` uniformly without replacement (partial Fisher–Yates
/// over indices). `k` is clamped to the pool size.
pub fn sample_distinct<T: Copy, R: Rng + ?Sized>(pool: &[T], k: usize, rng: &mut R) -> Vec<T> {
    let k = k.min(pool.len());
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    for i in 0..k {
        let j = rng.gen_range(i..indices.len());
        indices.swap(i, j);
    }
    indices[..k].iter().map(|&idx| pool[idx]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SHAPES;
    use crate::difficulty::{EASY, HARD, MEDIUM};
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    static PAIR_ITEMS: [Item; 2] = [
        Item::new("sun", "Sun", "text-yellow-500", "bg-yellow-100", "C5"),
        Item::new("moon", "Moon", "text-gray-500", "bg-gray-100", "A4"),
    ];

    static PAIR: Category = Category {
        key: "sky",
        display_name: "Sky",
        items: &PAIR_ITEMS,
    };

    fn ids(round: &Round) -> HashSet<&'static str> {
        round.choices().iter().map(|item| item.id).collect()
    }

    #[test]
    fn zero_draws_pick_first_item_and_next_two_distractors() {
        let mut rng = StepRng::new(0, 0);
        let round = generate_round(&SHAPES, &MEDIUM, &mut rng).unwrap();
        assert_eq!(round.target().id, "circle");
        let expected: HashSet<&str> = ["circle", "square", "triangle"].into_iter().collect();
        assert_eq!(ids(&round), expected);
    }

    #[test]
    fn choice_set_matches_difficulty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for difficulty in [&EASY, &MEDIUM, &HARD] {
            let round = generate_round(&SHAPES, difficulty, &mut rng).unwrap();
            assert_eq!(round.choices().len(), difficulty.choice_count);
            assert_eq!(ids(&round).len(), difficulty.choice_count);
            assert!(round.contains(round.target().id));
        }
    }

    #[test]
    fn too_few_items_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = generate_round(&PAIR, &MEDIUM, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientItems {
                category: "sky".into(),
                available: 2,
                required: 3,
            }
        );
        assert!(generate_round(&PAIR, &EASY, &mut rng).is_ok());
    }

    #[test]
    fn target_position_is_spread_across_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut slots = [0usize; 4];
        for _ in 0..4000 {
            let round = generate_round(&SHAPES, &HARD, &mut rng).unwrap();
            slots[round.position_of(round.target().id).unwrap()] += 1;
        }
        for count in slots {
            assert!((800..1200).contains(&count), "slot counts skewed: {slots:?}");
        }
    }

    #[test]
    fn sample_distinct_never_repeats() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pool = [1, 2, 3, 4, 5, 6];
        for k in 0..=6 {
            let drawn = sample_distinct(&pool, k, &mut rng);
            let unique: HashSet<_> = drawn.iter().collect();
            assert_eq!(drawn.len(), k);
            assert_eq!(unique.len(), k);
        }
        assert_eq!(sample_distinct(&pool, 10, &mut rng).len(), 6);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut values = vec![5, 1, 4, 2, 3];
        shuffle(&mut values, &mut rng);
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}
