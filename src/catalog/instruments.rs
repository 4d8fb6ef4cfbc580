// Instruments category definition.
use super::{Category, Item};

pub static INSTRUMENTS: Category = Category {
    key: "instruments",
    display_name: "Instruments",
    items: &INSTRUMENT_ITEMS,
};

static INSTRUMENT_ITEMS: [Item; 4] = [
    Item::new("drum", "Drum", "text-teal-500", "bg-teal-100", "C2"),
    Item::new("guitar", "Guitar", "text-pink-500", "bg-pink-100", "E3"),
    Item::new("piano", "Piano", "text-gray-700", "bg-gray-200", "C4"),
    Item::new("trumpet", "Trumpet", "text-amber-500", "bg-amber-100", "G4"),
];
