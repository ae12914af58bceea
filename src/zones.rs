//! Game zones (Deck, Hand, Graveyard, Battlezone, Trapzone, Soul)

use crate::core::CardId;
use crate::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Deck,
    Hand,
    Graveyard,
    Battlezone,
    /// Face-down cards set aside to be played as traps (the "hidden zone")
    Trapzone,
    /// Holding area for cards attached to another card (equipment, previous forms)
    Soul,
}

impl Zone {
    /// Zone order used when the pipeline visits a player's cards
    pub const ALL: [Zone; 6] = [
        Zone::Battlezone,
        Zone::Soul,
        Zone::Trapzone,
        Zone::Hand,
        Zone::Graveyard,
        Zone::Deck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Graveyard => "graveyard",
            Zone::Battlezone => "battlezone",
            Zone::Trapzone => "trapzone",
            Zone::Soul => "soul",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "deck" => Ok(Zone::Deck),
            "hand" => Ok(Zone::Hand),
            "graveyard" => Ok(Zone::Graveyard),
            "battlezone" => Ok(Zone::Battlezone),
            "trapzone" | "hiddenzone" => Ok(Zone::Trapzone),
            "soul" => Ok(Zone::Soul),
            other => Err(MatchError::InvalidZone(other.to_string())),
        }
    }
}

/// An ordered zone; insertion order is draw order for the deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // Order-preserving: iteration order feeds the handler pipeline
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Top of the deck is the front of the list
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.first().copied()
    }

    /// Replace every occurrence of `a` with `b` and vice versa
    pub fn swap_ids(&mut self, a: CardId, b: CardId) {
        for id in self.cards.iter_mut() {
            if *id == a {
                *id = b;
            } else if *id == b {
                *id = a;
            }
        }
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

/// Collection of all zones for a player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub hand: CardZone,
    pub graveyard: CardZone,
    pub battlezone: CardZone,
    pub trapzone: CardZone,
    pub soul: CardZone,
}

impl PlayerZones {
    pub fn new() -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck),
            hand: CardZone::new(Zone::Hand),
            graveyard: CardZone::new(Zone::Graveyard),
            battlezone: CardZone::new(Zone::Battlezone),
            trapzone: CardZone::new(Zone::Trapzone),
            soul: CardZone::new(Zone::Soul),
        }
    }

    pub fn get(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Graveyard => &self.graveyard,
            Zone::Battlezone => &self.battlezone,
            Zone::Trapzone => &self.trapzone,
            Zone::Soul => &self.soul,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Graveyard => &mut self.graveyard,
            Zone::Battlezone => &mut self.battlezone,
            Zone::Trapzone => &mut self.trapzone,
            Zone::Soul => &mut self.soul,
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardZone> {
        [
            &mut self.deck,
            &mut self.hand,
            &mut self.graveyard,
            &mut self.battlezone,
            &mut self.trapzone,
            &mut self.soul,
        ]
        .into_iter()
    }
}

impl Default for PlayerZones {
    fn default() -> Self {
        Self::new()
    }
}
