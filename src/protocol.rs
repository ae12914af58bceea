//! Wire messages exchanged with the transport
//!
//! Every message is a JSON object tagged by a `header` field.

use crate::core::CardId;
use crate::game::view::{CardState, PlayerState};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Output sink for one seat; the only capability the match needs from the transport
pub trait Writer: Send + Sync {
    fn write(&self, msg: &ServerMessage);
}

/// Write `msg`, catching a panicking writer; returns false if it panicked
pub fn write_guarded(writer: &dyn Writer, msg: &ServerMessage) -> bool {
    catch_unwind(AssertUnwindSafe(|| writer.write(msg))).is_ok()
}

/// Messages sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "header", rename_all = "snake_case")]
pub enum ClientMessage {
    ChooseDeck {
        cards: Vec<u32>,
    },
    PlayCard {
        id: CardId,
        #[serde(rename = "targetId", default)]
        target_id: Option<CardId>,
    },
    SetCard {
        id: CardId,
    },
    Attack {
        id: CardId,
        #[serde(rename = "targetId", default)]
        target_id: Option<CardId>,
    },
    Action {
        #[serde(default)]
        cards: Vec<CardId>,
    },
    Cancel,
    EndTurn,
}

impl ClientMessage {
    /// Decode raw bytes; `None` for malformed JSON or unknown headers
    pub fn parse(data: &[u8]) -> Option<ClientMessage> {
        match serde_json::from_slice(data) {
            Ok(msg) => Some(msg),
            Err(err) => {
                tracing::debug!("Dropping malformed message: {err}");
                None
            }
        }
    }
}

/// Messages sent to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "header", rename_all = "snake_case")]
pub enum ServerMessage {
    StateUpdate {
        #[serde(rename = "myTurn")]
        my_turn: bool,
        me: PlayerState,
        opponent: PlayerState,
    },
    Chat {
        sender: String,
        message: String,
    },
    Warn {
        message: String,
    },
    /// Selection prompt
    Action {
        cards: Vec<CardState>,
        text: String,
        #[serde(rename = "minSelections")]
        min_selections: usize,
        #[serde(rename = "maxSelections")]
        max_selections: usize,
        cancellable: bool,
    },
    CloseAction,
}

impl ServerMessage {
    pub fn header(&self) -> &'static str {
        match self {
            ServerMessage::StateUpdate { .. } => "state_update",
            ServerMessage::Chat { .. } => "chat",
            ServerMessage::Warn { .. } => "warn",
            ServerMessage::Action { .. } => "action",
            ServerMessage::CloseAction => "close_action",
        }
    }
}
