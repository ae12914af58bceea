//! Threaded match runner
//!
//! A match lives on its own worker thread. Messages from both connections
//! are queued and applied one at a time; prompt replies skip the queue and
//! go straight to the prompted player, which is what lets a prompt block
//! the worker while the other side keeps talking.

use crate::core::Seat;
use crate::game::prompt::{PromptReply, PromptSender};
use crate::game::Match;
use crate::protocol::{write_guarded, ClientMessage, ServerMessage, Writer};
use crate::Result;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::sync::{mpsc, watch};

/// Lifecycle of a running match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    /// Waiting for both players to choose a deck
    Waiting,
    Running,
    Finished { winner: Seat, reason: String },
}

impl MatchStatus {
    fn of(m: &Match) -> MatchStatus {
        match m.outcome() {
            Some(outcome) => MatchStatus::Finished {
                winner: outcome.winner,
                reason: outcome.reason.clone(),
            },
            None if m.started() => MatchStatus::Running,
            None => MatchStatus::Waiting,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Finished { .. })
    }
}

#[derive(Debug)]
enum Command {
    Message(Seat, ClientMessage),
    Forfeit(Seat),
    Shutdown,
}

/// Handle to a match running on a worker thread
pub struct MatchHandle {
    commands: mpsc::UnboundedSender<Command>,
    prompts: [PromptSender; 2],
    writers: [Arc<dyn Writer>; 2],
    busy: Arc<AtomicBool>,
    status: watch::Receiver<MatchStatus>,
    worker: Option<thread::JoinHandle<Match>>,
}

impl MatchHandle {
    /// Move `m` onto a new worker thread
    pub fn spawn(m: Match) -> Result<MatchHandle> {
        let (commands, rx) = mpsc::unbounded_channel();
        let (status_tx, status) = watch::channel(MatchStatus::of(&m));
        let busy = Arc::new(AtomicBool::new(false));
        let prompts = [
            m.player(Seat::One).prompt_sender(),
            m.player(Seat::Two).prompt_sender(),
        ];
        let writers = [m.player(Seat::One).writer(), m.player(Seat::Two).writer()];

        let worker_busy = busy.clone();
        let worker = thread::Builder::new()
            .name("match".to_string())
            .spawn(move || run(m, rx, worker_busy, status_tx))?;

        Ok(MatchHandle {
            commands,
            prompts,
            writers,
            busy,
            status,
            worker: Some(worker),
        })
    }

    /// Raw bytes from `seat`'s connection
    ///
    /// Malformed messages are dropped. While a message is being resolved,
    /// anything but a prompt reply is refused with a warning.
    pub fn parse(&self, seat: Seat, data: &[u8]) {
        let Some(msg) = ClientMessage::parse(data) else {
            return;
        };
        self.send(seat, msg);
    }

    pub fn send(&self, seat: Seat, msg: ClientMessage) {
        let reply = match msg {
            ClientMessage::Action { cards } => PromptReply::Select(cards),
            ClientMessage::Cancel => PromptReply::Cancel,
            msg => return self.enqueue(seat, msg),
        };
        if !self.prompts[seat.index()].reply(reply) {
            tracing::debug!(%seat, "Dropping prompt reply, nothing is waiting for it");
        }
    }

    fn enqueue(&self, seat: Seat, msg: ClientMessage) {
        if self.busy.load(Ordering::SeqCst) {
            let warn = ServerMessage::Warn {
                message: "Waiting for an action to resolve".to_string(),
            };
            if !write_guarded(self.writers[seat.index()].as_ref(), &warn) {
                tracing::warn!(%seat, "Recovered from panic while writing to player");
            }
            return;
        }
        let _ = self.commands.send(Command::Message(seat, msg));
    }

    /// `seat`'s connection is gone; wake its prompt and forfeit the match
    pub fn disconnect(&self, seat: Seat) {
        self.prompts[seat.index()].disconnect();
        let _ = self.commands.send(Command::Forfeit(seat));
    }

    pub fn status(&self) -> MatchStatus {
        self.status.borrow().clone()
    }

    /// Resolves once the match has a winner (or the worker stopped)
    pub async fn finished(&self) -> MatchStatus {
        let mut status = self.status.clone();
        let finished = status
            .wait_for(MatchStatus::is_finished)
            .await
            .map(|s| s.clone());
        match finished {
            Ok(s) => s,
            Err(_) => status.borrow().clone(),
        }
    }

    /// Stop the worker and hand back the match
    ///
    /// Returns `None` if the worker panicked outside of message handling.
    pub fn shutdown(mut self) -> Option<Match> {
        self.stop_worker();
        self.worker.take().and_then(|w| w.join().ok())
    }

    /// Queue a shutdown and wake any prompt the worker is blocked on
    fn stop_worker(&self) {
        let _ = self.commands.send(Command::Shutdown);
        for prompt in &self.prompts {
            if prompt.is_awaiting() {
                prompt.disconnect();
            }
        }
    }
}

impl Drop for MatchHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.stop_worker();
        }
    }
}

fn run(
    mut m: Match,
    mut commands: mpsc::UnboundedReceiver<Command>,
    busy: Arc<AtomicBool>,
    status: watch::Sender<MatchStatus>,
) -> Match {
    while let Some(command) = commands.blocking_recv() {
        busy.store(true, Ordering::SeqCst);
        let result = catch_unwind(AssertUnwindSafe(|| match command {
            Command::Message(seat, msg) => {
                m.dispatch(seat, msg);
                true
            }
            Command::Forfeit(seat) => {
                m.forfeit(seat);
                true
            }
            Command::Shutdown => false,
        }));
        busy.store(false, Ordering::SeqCst);

        let keep_going = match result {
            Ok(keep_going) => keep_going,
            Err(_) => {
                tracing::warn!("Recovered from panic while processing a message");
                m.reset_depth();
                true
            }
        };

        status.send_replace(MatchStatus::of(&m));
        if !keep_going || m.is_over() {
            break;
        }
    }
    tracing::debug!("Match worker stopped");
    m
}
