//! Player representation

use crate::core::{Card, CardId, EntityStore, PlayerName, Seat};
use crate::game::prompt::{prompt_channel, PromptInbox, PromptSender};
use crate::protocol::{write_guarded, ServerMessage, Writer};
use crate::zones::{CardZone, PlayerZones, Zone};
use crate::Result;
use std::sync::Arc;

/// Represents a player seated at a match
///
/// The player owns every card it brought in its deck; cards are always
/// addressed through their owner.
pub struct Player {
    pub seat: Seat,

    pub name: PlayerName,

    /// Life total (no floor, may go negative before the match reacts)
    pub life: i32,

    pub zones: PlayerZones,

    /// Every card owned by this player, keyed by runtime id
    pub cards: EntityStore<Card>,

    /// Has a valid deck been chosen?
    pub ready: bool,

    /// Number of turns this player has started
    pub turn_no: u32,

    writer: Arc<dyn Writer>,

    prompt: PromptSender,
    inbox: PromptInbox,
}

impl Player {
    pub fn new(
        seat: Seat,
        name: impl Into<PlayerName>,
        starting_life: i32,
        writer: Arc<dyn Writer>,
    ) -> Self {
        let (prompt, inbox) = prompt_channel();
        Player {
            seat,
            name: name.into(),
            life: starting_life,
            zones: PlayerZones::new(),
            cards: EntityStore::new(),
            ready: false,
            turn_no: 0,
            writer,
            prompt,
            inbox,
        }
    }

    /// Snapshot of a zone, safe to iterate while the zone changes
    pub fn container(&self, zone: Zone) -> Vec<CardId> {
        self.zones.get(zone).cards.clone()
    }

    pub fn container_mut(&mut self, zone: Zone) -> &mut CardZone {
        self.zones.get_mut(zone)
    }

    pub fn has_card(&self, zone: Zone, id: CardId) -> bool {
        self.zones.get(zone).contains(id)
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards.get_mut(id)
    }

    /// Creatures currently on the battlezone
    pub fn creatures(&self) -> Vec<CardId> {
        self.zones
            .battlezone
            .cards
            .iter()
            .copied()
            .filter(|id| self.cards.get(*id).map(|c| c.is_creature()).unwrap_or(false))
            .collect()
    }

    pub fn writer(&self) -> Arc<dyn Writer> {
        self.writer.clone()
    }

    /// Transport handle for answering this player's prompts
    pub fn prompt_sender(&self) -> PromptSender {
        self.prompt.clone()
    }

    pub fn inbox_mut(&mut self) -> &mut PromptInbox {
        &mut self.inbox
    }

    /// Send a message to this player
    ///
    /// A panicking writer is caught and logged so one broken connection
    /// cannot take the match down.
    pub fn write(&self, msg: &ServerMessage) {
        if !write_guarded(self.writer.as_ref(), msg) {
            tracing::warn!(seat = %self.seat, "Recovered from panic while writing to player");
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("seat", &self.seat)
            .field("name", &self.name)
            .field("life", &self.life)
            .field("ready", &self.ready)
            .field("turn_no", &self.turn_no)
            .finish()
    }
}
