// Animals category definition.
use super::{Category, Item};

pub static ANIMALS: Category = Category {
    key: "animals",
    display_name: "Animals",
    items: &ANIMAL_ITEMS,
};

static ANIMAL_ITEMS: [Item; 4] = [
    Item::new("cat", "Cat", "text-purple-500", "bg-purple-100", "E6"),
    Item::new("dog", "Dog", "text-orange-500", "bg-orange-100", "A3"),
    Item::new("bird", "Bird", "text-sky-500", "bg-sky-100", "C7"),
    Item::new("fish", "Fish", "text-indigo-500", "bg-indigo-100", "C3"),
];
