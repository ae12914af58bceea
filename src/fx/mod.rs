//! Reusable card abilities
//!
//! Every function here returns a [`Handler`] that card templates attach with
//! `CardBuilder::handler` (or that the engine adds as a condition). A handler
//! is invoked for every event in the match; each one checks the event and
//! the card it is invoked for before doing anything.

mod ambush;
mod leech;
mod modifiers;
mod poison;
mod restrictions;
mod spell;

pub use ambush::ambush;
pub use leech::leech;
pub use modifiers::{attack_modifier, defence_modifier, equipment, granted};
pub use poison::{destroy_end_of_turn, poisonous, venomous};
pub use restrictions::{
    cant_attack_creatures, cant_attack_players, cant_be_attacked, cant_be_blocked, cant_block,
    cant_evolve,
};
pub use spell::{negate_attack, spell};

use crate::core::{CardId, CardName, Seat};
use crate::game::Match;

/// Owner and name of a card, if it still exists
fn owner_and_name(m: &Match, card: CardId) -> Option<(Seat, CardName)> {
    m.card(card).ok().map(|c| (c.owner, c.name.clone()))
}
