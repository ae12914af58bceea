//! Runtime identities and entity storage

use crate::{MatchError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Runtime identity of a card during a match
///
/// Distinct from the template id: two copies of the same template get two
/// different `CardId`s. Ids are handed out by the match and never reused.
/// On the wire a `CardId` is a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CardId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u32),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(CardId(n)),
            Raw::Text(s) => s
                .trim()
                .parse::<u32>()
                .map(CardId)
                .map_err(|_| serde::de::Error::custom(format!("invalid card id '{s}'"))),
        }
    }
}

/// Identifier of a card template in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(u32);

impl TemplateId {
    pub fn new(id: u32) -> Self {
        TemplateId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of a temporary condition attached to a card
///
/// Returned by `Match::add_condition` and used to remove exactly that
/// condition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionId(u32);

impl ConditionId {
    pub fn new(id: u32) -> Self {
        ConditionId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub const BOTH: [Seat; 2] = [Seat::One, Seat::Two];

    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "player 1"),
            Seat::Two => write!(f, "player 2"),
        }
    }
}

impl std::str::FromStr for Seat {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "p1" | "one" => Ok(Seat::One),
            "2" | "p2" | "two" => Ok(Seat::Two),
            other => Err(MatchError::InvalidAction(format!("unknown seat '{other}'"))),
        }
    }
}

/// Keyed storage for entities owned by a player
///
/// Uses FxHashMap for fast hashing of integer keys. Entities are never
/// deallocated during a match, only re-keyed by identity swaps.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    entities: FxHashMap<CardId, T>,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: FxHashMap::default(),
        }
    }

    /// Insert an entity with a specific ID
    pub fn insert(&mut self, id: CardId, entity: T) {
        self.entities.insert(id, entity);
    }

    /// Get an entity by ID
    pub fn get(&self, id: CardId) -> Result<&T> {
        self.entities.get(&id).ok_or(MatchError::CardNotFound(id))
    }

    /// Get a mutable reference to an entity
    pub fn get_mut(&mut self, id: CardId) -> Result<&mut T> {
        self.entities
            .get_mut(&id)
            .ok_or(MatchError::CardNotFound(id))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn remove(&mut self, id: CardId) -> Option<T> {
        self.entities.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &T)> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&CardId, &mut T)> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_store() {
        let mut store = EntityStore::new();
        store.insert(CardId::new(0), "first");
        store.insert(CardId::new(1), "second");

        assert_eq!(store.len(), 2);
        assert_eq!(*store.get(CardId::new(1)).unwrap(), "second");
        assert!(matches!(
            store.get(CardId::new(999)),
            Err(MatchError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_card_id_wire_format() {
        let id = CardId::new(17);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"17\"");

        let parsed: CardId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(parsed, id);
        let numeric: CardId = serde_json::from_str("17").unwrap();
        assert_eq!(numeric, id);
        assert!(serde_json::from_str::<CardId>("\"abc\"").is_err());
    }

    #[test]
    fn test_seat_opponent() {
        assert_eq!(Seat::One.opponent(), Seat::Two);
        assert_eq!(Seat::Two.opponent(), Seat::One);
        assert_eq!("p2".parse::<Seat>().unwrap(), Seat::Two);
        assert!("3".parse::<Seat>().is_err());
    }
}
