//! Error types for the match engine

use crate::core::{CardId, Seat};
use crate::zones::Zone;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Card {card} is not in {zone}")]
    CardNotInZone { card: CardId, zone: Zone },

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Card constructor does not exist for id {0}")]
    UnknownTemplate(u32),

    #[error("Players at max capacity")]
    SeatsFull,

    #[error("Both seats must be filled, {0} is empty")]
    SeatsNotFilled(Seat),

    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
