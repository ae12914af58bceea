//! Shared fixtures for the integration tests
#![allow(dead_code)]

use ganjifa::cards;
use ganjifa::config::MatchConfig;
use ganjifa::core::{CardId, Seat, TemplateId};
use ganjifa::game::{Match, PromptReply, PromptSender};
use ganjifa::protocol::{ServerMessage, Writer};
use ganjifa::zones::Zone;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

/// Records everything sent to one seat and answers prompts from a script
///
/// The answer is delivered from inside `write`, while the match is already
/// waiting on the prompt, so prompts resolve on the calling thread. A prompt
/// with nothing scripted is answered as if the player had disconnected.
#[derive(Default)]
pub struct TestClient {
    messages: Mutex<Vec<ServerMessage>>,
    replies: Mutex<VecDeque<PromptReply>>,
    prompt: OnceLock<PromptSender>,
}

impl TestClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn connect(&self, sender: PromptSender) {
        let _ = self.prompt.set(sender);
    }

    pub fn answer(&self, reply: PromptReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn select(&self, cards: &[CardId]) {
        self.answer(PromptReply::Select(cards.to_vec()));
    }

    pub fn messages(&self) -> Vec<ServerMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }

    pub fn chats(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::Chat { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::Warn { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Texts of every selection prompt received
    pub fn prompts(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ServerMessage::Action { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, header: &str) -> usize {
        self.messages().iter().filter(|m| m.header() == header).count()
    }
}

impl Writer for TestClient {
    fn write(&self, msg: &ServerMessage) {
        self.messages.lock().unwrap().push(msg.clone());
        if let ServerMessage::Action { .. } = msg {
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(PromptReply::Disconnected);
            if let Some(sender) = self.prompt.get() {
                sender.reply(reply);
            }
        }
    }
}

/// Small decks, no opening hand, seeded, and attacks allowed on turn one
pub fn test_config() -> MatchConfig {
    MatchConfig::default()
        .with_seed(7)
        .with_deck_size(10)
        .with_max_copies(10)
        .with_opening_hand(0)
        .with_first_turn_attack(true)
}

/// `cards` padded with Kukkutah up to ten cards
pub fn deck(cards: &[u32]) -> Vec<u32> {
    let mut deck = cards.to_vec();
    deck.resize(10, cards::KUKKUTAH);
    deck
}

pub struct Table {
    pub m: Match,
    pub clients: [Arc<TestClient>; 2],
}

impl Table {
    /// Alice (seat one) and Bob (seat two) with decks chosen, not started
    pub fn with_config(config: MatchConfig, deck1: &[u32], deck2: &[u32]) -> Table {
        let alice = TestClient::new();
        let bob = TestClient::new();
        let alice_writer: Arc<dyn Writer> = alice.clone();
        let bob_writer: Arc<dyn Writer> = bob.clone();
        let mut m = Match::new_two_player(
            config,
            Arc::new(cards::starter_registry()),
            ("Alice", alice_writer),
            ("Bob", bob_writer),
        )
        .unwrap();
        alice.connect(m.player(Seat::One).prompt_sender());
        bob.connect(m.player(Seat::Two).prompt_sender());

        m.choose_deck(Seat::One, &deck(deck1)).unwrap();
        m.choose_deck(Seat::Two, &deck(deck2)).unwrap();
        Table {
            m,
            clients: [alice, bob],
        }
    }

    /// Started match, Alice's first turn in its main step
    pub fn started(deck1: &[u32], deck2: &[u32]) -> Table {
        Self::started_with(test_config(), deck1, deck2)
    }

    pub fn started_with(config: MatchConfig, deck1: &[u32], deck2: &[u32]) -> Table {
        let mut table = Self::with_config(config, deck1, deck2);
        table.m.start();
        assert!(table.m.started());
        table
    }

    pub fn client(&self, seat: Seat) -> &TestClient {
        &self.clients[seat.index()]
    }

    /// Move a card of `template` from `seat`'s deck (or hand) into `zone`
    pub fn place(&mut self, seat: Seat, template: u32, zone: Zone) -> CardId {
        let id = self.find(seat, template, &[Zone::Deck, Zone::Hand]);
        self.m.move_card(id, zone).unwrap();
        id
    }

    /// Any card of `template` owned by `seat` in one of `zones`
    pub fn find(&self, seat: Seat, template: u32, zones: &[Zone]) -> CardId {
        let player = self.m.player(seat);
        zones
            .iter()
            .flat_map(|z| player.container(*z))
            .find(|id| {
                player.card(*id).unwrap().template_id == TemplateId::new(template)
            })
            .unwrap_or_else(|| panic!("no card of template {template} for {seat}"))
    }

    pub fn name(&self, id: CardId) -> String {
        self.m.card(id).unwrap().name.to_string()
    }

    pub fn zone(&self, id: CardId) -> Zone {
        self.m.zone_of(id).unwrap()
    }

    pub fn life(&self, seat: Seat) -> i32 {
        self.m.player(seat).life
    }
}
