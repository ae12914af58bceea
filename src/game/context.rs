//! Per-event resolution context

use crate::game::{Event, Match};
use std::collections::VecDeque;
use std::fmt;

/// A deferred piece of work scheduled by a handler
pub type Effect = Box<dyn FnOnce(&mut Match, &mut Context)>;

/// Wraps one event for one run of the pipeline
///
/// Handlers use the context to veto the action (`interrupt_flow`), replace
/// its default behaviour (`override_with`) or queue work around it
/// (`schedule_before`, `schedule_after`).
pub struct Context {
    event: Event,
    cancelled: bool,
    override_fx: Option<Effect>,
    pre_fx: VecDeque<Effect>,
    post_fx: VecDeque<Effect>,
}

impl Context {
    pub fn new(event: Event) -> Self {
        Context {
            event,
            cancelled: false,
            override_fx: None,
            pre_fx: VecDeque::new(),
            post_fx: VecDeque::new(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    /// Veto the action; nothing else scheduled on this context will run
    pub fn interrupt_flow(&mut self) {
        self.cancelled = true;
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Replace the default action
    ///
    /// Only the first override is kept. Later calls are rejected and
    /// return `false`.
    pub fn override_with<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Match, &mut Context) + 'static,
    {
        if self.override_fx.is_some() {
            tracing::warn!(event = self.event.name(), "Rejected second override");
            return false;
        }
        self.override_fx = Some(Box::new(f));
        true
    }

    pub fn has_override(&self) -> bool {
        self.override_fx.is_some()
    }

    /// Run `f` before the main action
    pub fn schedule_before<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Match, &mut Context) + 'static,
    {
        self.pre_fx.push_back(Box::new(f));
    }

    /// Run `f` after the main action, only if it was not cancelled
    pub fn schedule_after<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Match, &mut Context) + 'static,
    {
        self.post_fx.push_back(Box::new(f));
    }

    pub(crate) fn take_override(&mut self) -> Option<Effect> {
        self.override_fx.take()
    }

    pub(crate) fn next_before(&mut self) -> Option<Effect> {
        self.pre_fx.pop_front()
    }

    pub(crate) fn next_after(&mut self) -> Option<Effect> {
        self.post_fx.pop_front()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("event", &self.event)
            .field("cancelled", &self.cancelled)
            .field("override", &self.override_fx.is_some())
            .field("pre_fx", &self.pre_fx.len())
            .field("post_fx", &self.post_fx.len())
            .finish()
    }
}
