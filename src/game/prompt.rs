//! Interactive selection prompts
//!
//! A prompt suspends the match worker until the prompted player answers.
//! The transport side holds a [`PromptSender`] and forwards `action` and
//! `cancel` messages into it; the match side owns the [`PromptInbox`] and
//! blocks on it. Replies are only accepted while a prompt is outstanding,
//! so a stray `cancel` can never leak into a later prompt.

use crate::core::{CardId, Seat};
use crate::game::Match;
use crate::protocol::ServerMessage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A player's answer to an outstanding prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptReply {
    Select(Vec<CardId>),
    Cancel,
    Disconnected,
}

#[derive(Debug, Default)]
struct PromptFlags {
    awaiting: AtomicBool,
    disconnected: AtomicBool,
}

/// Create the sender/inbox pair for one seat
pub fn prompt_channel() -> (PromptSender, PromptInbox) {
    let (tx, rx) = mpsc::channel(1);
    let flags = Arc::new(PromptFlags::default());
    (
        PromptSender {
            tx,
            flags: flags.clone(),
        },
        PromptInbox { rx, flags },
    )
}

/// Transport-side handle used to answer prompts
#[derive(Debug, Clone)]
pub struct PromptSender {
    tx: mpsc::Sender<PromptReply>,
    flags: Arc<PromptFlags>,
}

impl PromptSender {
    /// Deliver a reply; returns false if no prompt was waiting for it
    pub fn reply(&self, reply: PromptReply) -> bool {
        if !self.flags.awaiting.load(Ordering::SeqCst) {
            return false;
        }
        self.tx.try_send(reply).is_ok()
    }

    pub fn is_awaiting(&self) -> bool {
        self.flags.awaiting.load(Ordering::SeqCst)
    }

    /// Mark the seat as gone and wake any outstanding prompt
    pub fn disconnect(&self) {
        self.flags.disconnected.store(true, Ordering::SeqCst);
        let _ = self.tx.try_send(PromptReply::Disconnected);
    }
}

/// Match-side end of the prompt channel
#[derive(Debug)]
pub struct PromptInbox {
    rx: mpsc::Receiver<PromptReply>,
    flags: Arc<PromptFlags>,
}

impl PromptInbox {
    pub fn is_disconnected(&self) -> bool {
        self.flags.disconnected.load(Ordering::SeqCst)
    }

    /// Open the inbox for a new prompt, discarding anything stale
    pub fn open(&mut self) {
        while self.rx.try_recv().is_ok() {}
        self.flags.awaiting.store(true, Ordering::SeqCst);
    }

    pub fn close(&mut self) {
        self.flags.awaiting.store(false, Ordering::SeqCst);
    }

    /// Block the calling thread until the next reply arrives
    ///
    /// Must not be called from inside an async runtime.
    pub fn wait(&mut self) -> PromptReply {
        if self.is_disconnected() {
            return PromptReply::Disconnected;
        }
        self.rx.blocking_recv().unwrap_or(PromptReply::Disconnected)
    }
}

impl Match {
    /// Prompt `seat` to pick between `min` and `max` of `candidates`
    ///
    /// Blocks until a valid selection arrives. Invalid selections are warned
    /// about and re-prompted with no retry limit. A cancel is honoured only if
    /// `cancellable`, returning an empty selection. A disconnected seat always
    /// gets an empty selection.
    pub fn search(
        &mut self,
        seat: Seat,
        candidates: &[CardId],
        text: &str,
        min: usize,
        max: usize,
        cancellable: bool,
    ) -> Vec<CardId> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let min = min.min(candidates.len());
        let max = max.max(min);

        let prompt = ServerMessage::Action {
            cards: self.card_states(candidates),
            text: text.to_string(),
            min_selections: min,
            max_selections: max,
            cancellable,
        };

        self.player_mut(seat).inbox_mut().open();
        self.write_to(seat, &prompt);

        let result = loop {
            match self.player_mut(seat).inbox_mut().wait() {
                PromptReply::Disconnected => break Vec::new(),
                PromptReply::Cancel => {
                    if cancellable {
                        break Vec::new();
                    }
                }
                PromptReply::Select(cards) => {
                    let mut selection: Vec<CardId> = Vec::with_capacity(cards.len());
                    for id in cards {
                        if !selection.contains(&id) {
                            selection.push(id);
                        }
                    }

                    let valid = selection.len() >= min
                        && selection.len() <= max
                        && selection.iter().all(|id| candidates.contains(id));
                    if valid {
                        break selection;
                    }

                    self.warn(seat, "Invalid selection");
                    self.write_to(seat, &prompt);
                }
            }
        };

        self.player_mut(seat).inbox_mut().close();
        self.write_to(seat, &ServerMessage::CloseAction);
        result
    }

    /// Like [`Match::search`], restricted to candidates matching `predicate`
    #[allow(clippy::too_many_arguments)]
    pub fn filter<F>(
        &mut self,
        seat: Seat,
        candidates: &[CardId],
        text: &str,
        min: usize,
        max: usize,
        cancellable: bool,
        predicate: F,
    ) -> Vec<CardId>
    where
        F: Fn(&mut Match, CardId) -> bool,
    {
        let mut filtered = Vec::new();
        for &id in candidates {
            if predicate(self, id) {
                filtered.push(id);
            }
        }
        self.search(seat, &filtered, text, min, max, cancellable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_dropped_without_prompt() {
        let (sender, mut inbox) = prompt_channel();
        assert!(!sender.reply(PromptReply::Cancel));

        inbox.open();
        assert!(sender.is_awaiting());
        assert!(sender.reply(PromptReply::Select(vec![CardId::new(1)])));
        assert_eq!(inbox.wait(), PromptReply::Select(vec![CardId::new(1)]));

        inbox.close();
        assert!(!sender.reply(PromptReply::Cancel));
    }

    #[test]
    fn test_disconnect_wakes_inbox() {
        let (sender, mut inbox) = prompt_channel();
        inbox.open();
        sender.disconnect();
        assert_eq!(inbox.wait(), PromptReply::Disconnected);
        assert!(inbox.is_disconnected());
    }

    #[test]
    fn test_dropped_sender_counts_as_disconnect() {
        let (sender, mut inbox) = prompt_channel();
        drop(sender);
        inbox.open();
        assert_eq!(inbox.wait(), PromptReply::Disconnected);
    }
}
