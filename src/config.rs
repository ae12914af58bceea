//! Match configuration

use serde::Deserialize;
use std::path::Path;

/// Tunable rules of a match
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub starting_life: i32,

    /// Cards each player draws when the match starts
    pub opening_hand: usize,

    /// Exact number of cards a deck must have
    pub deck_size: usize,

    /// Maximum copies of one template in a deck
    pub max_copies: usize,

    /// Seed for deck shuffles; random when absent
    pub seed: Option<u64>,

    /// May player one attack on their first turn?
    pub first_turn_attack: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            starting_life: 2000,
            opening_hand: 5,
            deck_size: 40,
            max_copies: 4,
            seed: None,
            first_turn_attack: false,
        }
    }
}

impl MatchConfig {
    /// Load a JSON config; missing fields keep their defaults
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    pub fn with_deck_size(mut self, cards: usize) -> Self {
        self.deck_size = cards;
        self
    }

    pub fn with_max_copies(mut self, copies: usize) -> Self {
        self.max_copies = copies;
        self
    }

    pub fn with_first_turn_attack(mut self, allowed: bool) -> Self {
        self.first_turn_attack = allowed;
        self
    }
}
