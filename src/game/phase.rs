//! Turn steps and the turn state machine

use crate::core::Seat;
use crate::game::state::SERVER;
use crate::game::{Context, Event, Match};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// Steps of a turn, entered strictly in order once per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Resolve anything pending from the previous turn
    BeginTurn,
    /// The active player's cards are untapped and lose their conditions
    Untap,
    /// "At the start of your turn" abilities
    StartOfTurn,
    /// The active player draws a card
    Draw,
    /// Open step: plays, attacks, end-turn request
    Main,
    End,
}

impl Step {
    /// Get the next step in turn order
    pub fn next(&self) -> Option<Step> {
        match self {
            Step::BeginTurn => Some(Step::Untap),
            Step::Untap => Some(Step::StartOfTurn),
            Step::StartOfTurn => Some(Step::Draw),
            Step::Draw => Some(Step::Main),
            Step::Main => Some(Step::End),
            Step::End => None, // Next player's BeginTurn
        }
    }

    /// Can the active player play, set and attack in this step?
    pub fn is_open(&self) -> bool {
        matches!(self, Step::Main)
    }
}

/// Represents the current turn structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Turns started so far across both players
    pub turn_number: u32,

    pub current_step: Step,

    /// Active player (whose turn it is)
    pub active_player: Seat,
}

impl TurnStructure {
    pub fn new(starting_player: Seat) -> Self {
        TurnStructure {
            turn_number: 0,
            current_step: Step::BeginTurn,
            active_player: starting_player,
        }
    }

    /// Advance to the next step
    pub fn advance_step(&mut self) -> bool {
        if let Some(next_step) = self.current_step.next() {
            self.current_step = next_step;
            true
        } else {
            false // End of turn
        }
    }

    /// Start a new turn
    pub fn next_turn(&mut self, next_player: Seat) {
        self.turn_number += 1;
        self.current_step = Step::BeginTurn;
        self.active_player = next_player;
    }
}

impl Match {
    /// Start the match once both players have chosen a deck
    ///
    /// Shuffles both decks, deals the opening hands and begins player one's
    /// first turn. Does nothing if already started or a player is not ready.
    pub fn start(&mut self) {
        if self.started || !Seat::BOTH.iter().all(|s| self.player(*s).ready) {
            return;
        }
        self.started = true;
        tracing::info!("Match started");

        for seat in Seat::BOTH {
            self.shuffle_deck(seat);
        }
        let hand = self.config.opening_hand;
        for seat in Seat::BOTH {
            self.draw_cards(seat, hand);
        }
        if self.is_over() {
            return;
        }

        self.chat(SERVER, "The match has begun!");
        self.begin_turn(Seat::One);
    }

    /// Start `seat`'s turn and run every step up to the open main step
    pub fn begin_turn(&mut self, seat: Seat) {
        self.turn.next_turn(seat);
        self.player_mut(seat).turn_no += 1;
        tracing::debug!(turn = self.turn.turn_number, %seat, "Beginning turn");

        loop {
            let step = self.turn.current_step;
            if step == Step::Main || self.is_over() {
                break;
            }
            self.fire(Event::Step(step));
            self.turn.advance_step();
        }
    }

    /// The active player asks to end their turn; abilities may refuse
    pub fn end_turn(&mut self) {
        self.fire(Event::EndTurn);
    }

    pub(crate) fn end_turn_action(&mut self) {
        self.turn.current_step = Step::End;
        self.fire(Event::Step(Step::End));
        if self.is_over() {
            return;
        }
        let next = self.turn.active_player.opponent();
        self.begin_turn(next);
    }

    pub(crate) fn step_action(&mut self, step: Step, _ctx: &mut Context) {
        let seat = self.turn.active_player;
        match step {
            Step::Untap => {
                let player = self.player_mut(seat);
                for (_, card) in player.cards.iter_mut() {
                    card.clear_conditions();
                    if card.zone == Zone::Battlezone {
                        card.untap();
                    }
                }
            }
            Step::Draw => self.draw_cards(seat, 1),
            Step::BeginTurn | Step::StartOfTurn | Step::Main | Step::End => {}
        }
    }
}
