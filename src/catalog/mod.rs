//! Content catalog: the fixed categories and their items.
//!
//! Catalog entries are plain data. Icons are never referenced directly; each item
//! carries a `render_key` that the host page resolves to its own graphic, and a
//! `cue_note` the browser cue player turns into a tone.

use serde::Serialize;

mod animals;
mod instruments;
mod shapes;

pub use animals::ANIMALS;
pub use instruments::INSTRUMENTS;
pub use shapes::SHAPES;

/// A selectable item. Identity is `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Opaque icon handle resolved by the presentation layer.
    pub render_key: &'static str,
    /// Foreground color token (e.g. `text-blue-500`).
    pub color_token: &'static str,
    /// Tile background token for the light theme.
    pub background_token: &'static str,
    /// Scientific pitch notation, e.g. `C4`.
    pub cue_note: &'static str,
}

impl Item {
    /// Catalog constructor; the render key is the item id.
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        color_token: &'static str,
        background_token: &'static str,
        cue_note: &'static str,
    ) -> Self {
        Self {
            id,
            display_name,
            render_key: id,
            color_token,
            background_token,
            cue_note,
        }
    }
}

/// Themed set of items. Item order is stable and meaningful: border patterns are
/// assigned by index.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: &'static str,
    pub display_name: &'static str,
    pub items: &'static [Item],
}

impl Category {
    pub fn item(&self, id: &str) -> Option<&'static Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Stable catalog index of `id` within this category.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

static CATEGORIES: [&Category; 3] = [&SHAPES, &ANIMALS, &INSTRUMENTS];

/// All categories in presentation order.
pub fn categories() -> &'static [&'static Category] {
    &CATEGORIES
}

pub fn category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().copied().find(|c| c.key == key)
}
