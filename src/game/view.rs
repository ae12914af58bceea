//! Per-player view of the match sent in state updates

use crate::core::{CardId, CardName, Civilisation, Family, Seat, TemplateId};
use crate::game::Match;
use crate::protocol::ServerMessage;
use crate::zones::Zone;
use serde::Serialize;

/// A card as seen by a client; hidden cards carry only their id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub id: CardId,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub face: Option<CardFace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFace {
    pub uid: TemplateId,
    pub name: CardName,
    #[serde(rename = "civilization")]
    pub civilisation: Civilisation,
    pub family: Family,
    pub rank: i32,
    pub attack: i32,
    pub defence: i32,
    pub tapped: bool,
    #[serde(rename = "attachedCards")]
    pub attached_cards: Vec<CardState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub life: i32,
    /// Cards left in the deck
    pub deck: usize,
    pub hand: Vec<CardState>,
    pub graveyard: Vec<CardState>,
    pub battlezone: Vec<CardState>,
    pub trapzone: Vec<CardState>,
}

impl CardState {
    pub fn hidden(id: CardId) -> Self {
        CardState { id, face: None }
    }
}

impl Match {
    /// Face-up view of a card with its effective stats
    pub fn card_state(&mut self, id: CardId) -> CardState {
        let Ok(card) = self.card(id) else {
            return CardState::hidden(id);
        };
        let (uid, name, civilisation, family, tapped) = (
            card.template_id,
            card.name.clone(),
            card.civilisation,
            card.family,
            card.tapped,
        );

        let attached = self.attachments(id);
        let face = CardFace {
            uid,
            name,
            civilisation,
            family,
            rank: self.get_rank(id),
            attack: self.get_attack(id),
            defence: self.get_defence(id),
            tapped,
            attached_cards: self.card_states(&attached),
        };
        CardState {
            id,
            face: Some(face),
        }
    }

    pub fn card_states(&mut self, ids: &[CardId]) -> Vec<CardState> {
        ids.iter().map(|id| self.card_state(*id)).collect()
    }

    /// `seat`'s zones; hand and trapzone are reduced to ids when `redact`
    pub fn player_state(&mut self, seat: Seat, redact: bool) -> PlayerState {
        let player = self.player(seat);
        let life = player.life;
        let deck = player.zones.deck.len();
        let hand = player.container(Zone::Hand);
        let graveyard = player.container(Zone::Graveyard);
        let battlezone = player.container(Zone::Battlezone);
        let trapzone = player.container(Zone::Trapzone);

        let (hand, trapzone) = if redact {
            (
                hand.into_iter().map(CardState::hidden).collect(),
                trapzone.into_iter().map(CardState::hidden).collect(),
            )
        } else {
            (self.card_states(&hand), self.card_states(&trapzone))
        };

        PlayerState {
            life,
            deck,
            hand,
            graveyard: self.card_states(&graveyard),
            battlezone: self.card_states(&battlezone),
            trapzone,
        }
    }

    /// The state update `seat` should see
    pub fn state_for(&mut self, seat: Seat) -> ServerMessage {
        ServerMessage::StateUpdate {
            my_turn: self.is_turn_of(seat),
            me: self.player_state(seat, false),
            opponent: self.player_state(seat.opponent(), true),
        }
    }

    /// Push the current state to both players
    pub fn broadcast_state(&mut self) {
        for seat in Seat::BOTH {
            let msg = self.state_for(seat);
            self.write_to(seat, &msg);
        }
    }
}
