//! Matches driven through the threaded runner, the way a transport does

mod common;

use common::{deck, test_config};
use ganjifa::cards::{self, KUKKUTAH, VANARA};
use ganjifa::core::{CardId, Seat, TemplateId};
use ganjifa::game::{Match, MatchHandle, MatchStatus};
use ganjifa::protocol::{ServerMessage, Writer};
use ganjifa::zones::Zone;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

struct ChannelWriter {
    tx: Mutex<Sender<ServerMessage>>,
}

impl Writer for ChannelWriter {
    fn write(&self, msg: &ServerMessage) {
        let _ = self.tx.lock().unwrap().send(msg.clone());
    }
}

struct Conn {
    rx: Receiver<ServerMessage>,
}

impl Conn {
    /// Skip messages until one with `header` arrives
    fn expect(&self, header: &str) -> ServerMessage {
        loop {
            let msg = self
                .rx
                .recv_timeout(TIMEOUT)
                .unwrap_or_else(|_| panic!("timed out waiting for {header}"));
            if msg.header() == header {
                return msg;
            }
        }
    }

    fn expect_warn(&self, text: &str) {
        loop {
            if let ServerMessage::Warn { message } = self.expect("warn") {
                if message == text {
                    return;
                }
            }
        }
    }
}

fn find(m: &Match, seat: Seat, template: u32) -> CardId {
    let player = m.player(seat);
    [Zone::Deck, Zone::Hand]
        .iter()
        .flat_map(|z| player.container(*z))
        .find(|id| player.card(*id).unwrap().template_id == TemplateId::new(template))
        .unwrap()
}

/// Alice's Vanara and Bob's Kukkutah on the battlezone, match running
fn spawn_match() -> (MatchHandle, [Conn; 2], CardId, CardId) {
    let (tx1, rx1) = channel();
    let (tx2, rx2) = channel();
    let w1: Arc<dyn Writer> = Arc::new(ChannelWriter { tx: Mutex::new(tx1) });
    let w2: Arc<dyn Writer> = Arc::new(ChannelWriter { tx: Mutex::new(tx2) });
    let mut m = Match::new_two_player(
        test_config(),
        Arc::new(cards::starter_registry()),
        ("Alice", w1),
        ("Bob", w2),
    )
    .unwrap();
    m.choose_deck(Seat::One, &deck(&[VANARA])).unwrap();
    m.choose_deck(Seat::Two, &deck(&[])).unwrap();
    m.start();

    let vanara = find(&m, Seat::One, VANARA);
    let kukkutah = find(&m, Seat::Two, KUKKUTAH);
    m.move_card(vanara, Zone::Battlezone).unwrap();
    m.move_card(kukkutah, Zone::Battlezone).unwrap();

    let handle = MatchHandle::spawn(m).unwrap();
    (handle, [Conn { rx: rx1 }, Conn { rx: rx2 }], vanara, kukkutah)
}

fn attack_json(id: CardId) -> Vec<u8> {
    format!(r#"{{"header":"attack","id":"{id}"}}"#).into_bytes()
}

#[test]
fn test_block_through_prompt_reply() {
    let (handle, conns, vanara, kukkutah) = spawn_match();

    handle.parse(Seat::One, &attack_json(vanara));
    match conns[1].expect("action") {
        ServerMessage::Action { cards, cancellable, .. } => {
            assert!(cancellable);
            assert_eq!(cards.len(), 1);
        }
        other => panic!("unexpected {other:?}"),
    }
    handle.parse(
        Seat::Two,
        format!(r#"{{"header":"action","cards":["{kukkutah}"]}}"#).as_bytes(),
    );
    conns[1].expect("close_action");

    let m = handle.shutdown().unwrap();
    // 2 attack doesn't beat 2 defence
    assert_eq!(m.zone_of(kukkutah), Some(Zone::Battlezone));
    assert!(m.card(kukkutah).unwrap().tapped);
    assert!(m.card(vanara).unwrap().tapped);
    assert_eq!(m.player(Seat::Two).life, 2000);
}

#[test]
fn test_messages_are_refused_while_a_prompt_is_open() {
    let (handle, conns, vanara, _) = spawn_match();

    handle.parse(Seat::One, &attack_json(vanara));
    conns[1].expect("action");

    handle.parse(Seat::One, br#"{"header":"end_turn"}"#);
    conns[0].expect_warn("Waiting for an action to resolve");

    handle.parse(Seat::Two, br#"{"header":"cancel"}"#);
    conns[1].expect("close_action");

    let m = handle.shutdown().unwrap();
    assert_eq!(m.player(Seat::Two).life, 1998);
    assert!(m.is_turn_of(Seat::One));
}

#[test]
fn test_wrong_seat_and_garbage() {
    let (handle, conns, _, _) = spawn_match();

    handle.parse(Seat::Two, b"{not json");
    handle.parse(Seat::Two, br#"{"header":"end_turn"}"#);
    conns[1].expect_warn("It's not your turn");

    // Stray replies with no prompt open go nowhere
    handle.parse(Seat::One, br#"{"header":"cancel"}"#);

    let m = handle.shutdown().unwrap();
    assert!(m.is_turn_of(Seat::One));
    assert!(!m.is_over());
}

#[tokio::test]
async fn test_disconnect_during_prompt_forfeits() {
    let (handle, conns, vanara, _) = spawn_match();

    handle.parse(Seat::One, &attack_json(vanara));
    conns[1].expect("action");
    handle.disconnect(Seat::Two);

    let status = tokio::time::timeout(TIMEOUT, handle.finished())
        .await
        .expect("match did not finish");
    assert_eq!(
        status,
        MatchStatus::Finished {
            winner: Seat::One,
            reason: "Bob left the match".to_string(),
        }
    );
    assert_eq!(handle.status(), status);
}

#[test]
fn test_shutdown_hands_back_the_match() {
    let (handle, _conns, _, _) = spawn_match();
    assert_eq!(handle.status(), MatchStatus::Running);

    handle.parse(Seat::One, br#"{"header":"end_turn"}"#);
    let m = handle.shutdown().unwrap();

    assert!(m.is_turn_of(Seat::Two));
    assert!(!m.is_over());
}

#[test]
fn test_dropping_the_handle_releases_a_prompted_worker() {
    let (handle, conns, vanara, _) = spawn_match();

    handle.parse(Seat::One, &attack_json(vanara));
    conns[1].expect("action");
    drop(handle);

    // The writers go away with the match once the worker has stopped
    loop {
        match conns[1].rx.recv_timeout(TIMEOUT) {
            Ok(_) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => panic!("worker still blocked on the prompt"),
        }
    }
}
