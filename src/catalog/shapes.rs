// Shapes category definition.
use super::{Category, Item};

pub static SHAPES: Category = Category {
    key: "shapes",
    display_name: "Shapes",
    items: &SHAPE_ITEMS,
};

static SHAPE_ITEMS: [Item; 4] = [
    Item::new("circle", "Circle", "text-blue-500", "bg-blue-100", "C4"),
    Item::new("square", "Square", "text-red-500", "bg-red-100", "G3"),
    Item::new("triangle", "Triangle", "text-green-500", "bg-green-100", "E5"),
    Item::new("star", "Star", "text-yellow-500", "bg-yellow-100", "C6"),
];
