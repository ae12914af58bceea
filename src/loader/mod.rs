//! Card registry and deck loaders

pub mod deck;
pub mod registry;

pub use deck::{DeckList, DeckLoader};
pub use registry::{CardConstructor, CardRegistry};
