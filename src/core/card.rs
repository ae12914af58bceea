//! Card instances, ability handlers and temporary conditions

use crate::core::{CardId, CardKind, CardName, Civilisation, ConditionId, Family, Seat, TemplateId};
use crate::game::{Context, Match};
use crate::zones::Zone;
use std::fmt;
use std::sync::Arc;

/// An ability: a function invoked for every event with the card that carries it
///
/// Handlers are shared (`Arc`) so the pipeline can snapshot the handler lists
/// of the whole board before invoking any of them.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&mut Match, CardId, &mut Context) + Send + Sync>);

impl Handler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Match, CardId, &mut Context) + Send + Sync + 'static,
    {
        Handler(Arc::new(f))
    }

    pub fn call(&self, m: &mut Match, card: CardId, ctx: &mut Context) {
        (self.0)(m, card, ctx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// A temporary handler attached to a card at runtime, addressed by handle
#[derive(Debug, Clone)]
pub struct Condition {
    pub id: ConditionId,
    pub handler: Handler,
}

/// Represents a card in a match
///
/// The static template fields are fixed when the card is constructed; zone,
/// tap state, attachment and conditions change during play.
#[derive(Debug, Clone)]
pub struct Card {
    /// Runtime identity (swapped on evolution, see `Match::swap_identity`)
    pub id: CardId,

    /// Template this card was built from
    pub template_id: TemplateId,

    pub name: CardName,
    pub rank: i32,
    pub civilisation: Civilisation,
    pub family: Family,
    pub attack: i32,
    pub defence: i32,

    /// Permanent abilities from the template, in declaration order
    pub handlers: Vec<Handler>,

    pub owner: Seat,
    pub zone: Zone,
    pub tapped: bool,

    /// Card this one is attached to; only meaningful while in `Zone::Soul`
    pub attached_to: Option<CardId>,

    /// Temporary abilities, in the order they were added
    pub conditions: Vec<Condition>,
}

impl Card {
    pub fn kind(&self) -> CardKind {
        CardKind::from(self.family)
    }

    pub fn is_creature(&self) -> bool {
        self.kind() == CardKind::Creature
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Permanent handlers followed by conditions, the order the pipeline uses
    pub fn all_handlers(&self) -> Vec<Handler> {
        self.handlers
            .iter()
            .cloned()
            .chain(self.conditions.iter().map(|c| c.handler.clone()))
            .collect()
    }

    pub fn has_condition(&self, id: ConditionId) -> bool {
        self.conditions.iter().any(|c| c.id == id)
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }
}

/// Builder for card templates
///
/// Constructors registered in the `CardRegistry` return `builder.build()`;
/// the match then stamps the runtime id, template id and owner.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    name: CardName,
    rank: i32,
    civilisation: Civilisation,
    family: Family,
    attack: i32,
    defence: i32,
    handlers: Vec<Handler>,
}

impl CardBuilder {
    pub fn new(name: impl Into<CardName>, civilisation: Civilisation, family: Family) -> Self {
        CardBuilder {
            name: name.into(),
            rank: 0,
            civilisation,
            family,
            attack: 0,
            defence: 0,
            handlers: Vec::new(),
        }
    }

    pub fn rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    pub fn stats(mut self, attack: i32, defence: i32) -> Self {
        self.attack = attack;
        self.defence = defence;
        self
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn ability<F>(self, f: F) -> Self
    where
        F: Fn(&mut Match, CardId, &mut Context) + Send + Sync + 'static,
    {
        self.handler(Handler::new(f))
    }

    pub fn build(self) -> Card {
        Card {
            id: CardId::new(0),
            template_id: TemplateId::new(0),
            name: self.name,
            rank: self.rank,
            civilisation: self.civilisation,
            family: self.family,
            attack: self.attack,
            defence: self.defence,
            handlers: self.handlers,
            owner: Seat::One,
            zone: Zone::Deck,
            tapped: false,
            attached_to: None,
            conditions: Vec::new(),
        }
    }
}
