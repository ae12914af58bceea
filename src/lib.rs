//! Ganjifa - server-authoritative match engine for a two-player card game
//!
//! A [`game::Match`] owns both players and every card. Everything that
//! happens in a match is an [`game::Event`] resolved through the effect
//! pipeline: every card's handlers see the event first and may veto it,
//! rewrite it, replace its default action or schedule work around it.
//! Interactive choices block the match until the prompted player answers,
//! so a match runs on its own worker thread behind a [`game::MatchHandle`].

pub mod cards;
pub mod config;
pub mod core;
pub mod error;
pub mod fx;
pub mod game;
pub mod loader;
pub mod protocol;
pub mod zones;

pub use error::{MatchError, Result};
