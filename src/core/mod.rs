//! Core game types and entities

pub mod card;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{Card, CardBuilder, Condition, Handler};
pub use entity::{CardId, ConditionId, EntityStore, Seat, TemplateId};
pub use player::Player;
pub use types::{CardKind, CardName, Civilisation, Family, PlayerName};
