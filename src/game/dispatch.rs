//! Applying client messages to a match

use crate::core::Seat;
use crate::game::Match;
use crate::protocol::ClientMessage;
use crate::zones::Zone;

impl Match {
    /// Decode and apply one message from `seat`; malformed input is dropped
    pub fn parse(&mut self, seat: Seat, data: &[u8]) {
        if let Some(msg) = ClientMessage::parse(data) {
            self.dispatch(seat, msg);
        }
    }

    /// Apply one decoded message from `seat`
    ///
    /// Rule violations are answered with a warning and change nothing.
    pub fn dispatch(&mut self, seat: Seat, msg: ClientMessage) {
        if self.is_over() {
            return;
        }

        match msg {
            ClientMessage::ChooseDeck { cards } => {
                if self.started() {
                    self.warn(seat, "match started cannot choose deck again");
                    return;
                }
                if let Err(err) = self.choose_deck(seat, &cards) {
                    self.warn(seat, err.to_string());
                    return;
                }
                self.start();
            }
            ClientMessage::Action { .. } | ClientMessage::Cancel => {
                tracing::debug!(%seat, "Prompt reply with no prompt outstanding");
            }
            ClientMessage::EndTurn
            | ClientMessage::SetCard { .. }
            | ClientMessage::PlayCard { .. }
            | ClientMessage::Attack { .. } => {
                if !self.started() {
                    self.warn(seat, "The match has not started yet");
                    return;
                }
                if !self.is_turn_of(seat) {
                    self.warn(seat, "It's not your turn");
                    return;
                }
                self.dispatch_turn_action(seat, msg);
            }
        }
    }

    fn dispatch_turn_action(&mut self, seat: Seat, msg: ClientMessage) {
        match msg {
            ClientMessage::EndTurn => self.end_turn(),
            ClientMessage::SetCard { id } => {
                if let Err(err) = self.set_card(seat, id) {
                    tracing::debug!("set_card: {err}");
                }
            }
            ClientMessage::PlayCard { id, target_id } => {
                if !self.player(seat).has_card(Zone::Hand, id) {
                    tracing::debug!(card = %id, "Played card is not in hand");
                    return;
                }
                self.play_card(seat, id, target_id);
            }
            ClientMessage::Attack { id, target_id } => self.attack(seat, id, target_id),
            ClientMessage::ChooseDeck { .. }
            | ClientMessage::Action { .. }
            | ClientMessage::Cancel => {}
        }
    }

    /// `seat` left; the opponent wins
    pub fn forfeit(&mut self, seat: Seat) {
        if self.is_over() {
            return;
        }
        let name = self.player(seat).name.clone();
        self.end(seat.opponent(), format!("{name} left the match"));
        self.broadcast_state();
    }
}
