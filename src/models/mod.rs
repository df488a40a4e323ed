//! Domain model layer.

pub mod item;

pub use item::{Item, ItemColumn, ItemRepository};
