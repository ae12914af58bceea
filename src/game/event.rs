//! Events dispatched through the effect pipeline

use crate::core::{CardId, Civilisation, Family, Seat};
use crate::game::phase::Step;
use crate::zones::Zone;
use smallvec::SmallVec;

/// Something that is about to happen (or, for queries, a value being computed)
///
/// Handlers match on the variant they care about and may rewrite its fields;
/// the default action and any scheduled effects see the rewritten values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Turn step marker for the active player
    Step(Step),

    /// The active player asked to end their turn
    EndTurn,

    PlayCard {
        card: CardId,
        target: Option<CardId>,
    },

    /// Informational, fired after a zone move has been committed
    CardMoved {
        card: CardId,
        from: Zone,
        to: Zone,
    },

    /// `target` is `None` when attacking the opposing player
    Attack {
        attacker: CardId,
        target: Option<CardId>,
    },

    /// A set-down card played in response to an attack
    Trap {
        card: CardId,
        attacker: CardId,
        negate_attack: bool,
    },

    Block {
        blocker: CardId,
        attacker: CardId,
    },

    Battle {
        attacker: CardId,
        defender: CardId,
        blocked: bool,
    },

    /// `card` (in hand or trapzone) evolves from `creature` on the battlezone
    Evolve {
        card: CardId,
        creature: CardId,
    },

    Equip {
        card: CardId,
        creature: CardId,
    },

    SpellCast {
        card: CardId,
        targets: SmallVec<[CardId; 2]>,
    },

    CreatureDestroyed {
        card: CardId,
        source: Option<CardId>,
    },

    Damage {
        player: Seat,
        source: Option<CardId>,
        amount: i32,
    },

    Heal {
        player: Seat,
        source: Option<CardId>,
        amount: i32,
    },

    GetAttack {
        card: CardId,
        attack: i32,
    },

    GetDefence {
        card: CardId,
        defence: i32,
    },

    GetRank {
        card: CardId,
        rank: i32,
    },

    GetFamily {
        card: CardId,
        families: SmallVec<[Family; 2]>,
    },

    GetCivilisation {
        card: CardId,
        civilisations: SmallVec<[Civilisation; 2]>,
    },
}

impl Event {
    /// Computed-property queries never trigger a state broadcast
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Event::GetAttack { .. }
                | Event::GetDefence { .. }
                | Event::GetRank { .. }
                | Event::GetFamily { .. }
                | Event::GetCivilisation { .. }
        )
    }

    /// Is this the event of `card` being played?
    pub fn is_play_of(&self, card: CardId) -> bool {
        matches!(self, Event::PlayCard { card: played, .. } if *played == card)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Step(_) => "step",
            Event::EndTurn => "end_turn",
            Event::PlayCard { .. } => "play_card",
            Event::CardMoved { .. } => "card_moved",
            Event::Attack { .. } => "attack",
            Event::Trap { .. } => "trap",
            Event::Block { .. } => "block",
            Event::Battle { .. } => "battle",
            Event::Evolve { .. } => "evolve",
            Event::Equip { .. } => "equip",
            Event::SpellCast { .. } => "spell_cast",
            Event::CreatureDestroyed { .. } => "creature_destroyed",
            Event::Damage { .. } => "damage",
            Event::Heal { .. } => "heal",
            Event::GetAttack { .. } => "get_attack",
            Event::GetDefence { .. } => "get_defence",
            Event::GetRank { .. } => "get_rank",
            Event::GetFamily { .. } => "get_family",
            Event::GetCivilisation { .. } => "get_civilisation",
        }
    }
}
