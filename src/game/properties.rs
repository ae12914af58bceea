//! Computed card properties
//!
//! Effective values are never stored. Each getter seeds a query event with
//! the card's base value and lets every ability on the board adjust it.
//! A handler that queries the same property of the same card from inside
//! that query recurses forever; avoiding that is up to the ability.

use crate::core::{CardId, Civilisation, Family};
use crate::game::{Event, Match};
use smallvec::{smallvec, SmallVec};

impl Match {
    pub fn get_attack(&mut self, id: CardId) -> i32 {
        let base = match self.card(id) {
            Ok(card) => card.attack,
            Err(err) => {
                tracing::debug!("get_attack: {err}");
                return 0;
            }
        };
        match self.fire(Event::GetAttack { card: id, attack: base }).into_event() {
            Event::GetAttack { attack, .. } => attack,
            _ => base,
        }
    }

    pub fn get_defence(&mut self, id: CardId) -> i32 {
        let base = match self.card(id) {
            Ok(card) => card.defence,
            Err(err) => {
                tracing::debug!("get_defence: {err}");
                return 0;
            }
        };
        match self
            .fire(Event::GetDefence {
                card: id,
                defence: base,
            })
            .into_event()
        {
            Event::GetDefence { defence, .. } => defence,
            _ => base,
        }
    }

    pub fn get_rank(&mut self, id: CardId) -> i32 {
        let base = match self.card(id) {
            Ok(card) => card.rank,
            Err(err) => {
                tracing::debug!("get_rank: {err}");
                return 0;
            }
        };
        match self.fire(Event::GetRank { card: id, rank: base }).into_event() {
            Event::GetRank { rank, .. } => rank,
            _ => base,
        }
    }

    pub fn get_family(&mut self, id: CardId) -> SmallVec<[Family; 2]> {
        let base: SmallVec<[Family; 2]> = match self.card(id) {
            Ok(card) => smallvec![card.family],
            Err(err) => {
                tracing::debug!("get_family: {err}");
                return SmallVec::new();
            }
        };
        match self
            .fire(Event::GetFamily {
                card: id,
                families: base.clone(),
            })
            .into_event()
        {
            Event::GetFamily { families, .. } => families,
            _ => base,
        }
    }

    pub fn get_civilisation(&mut self, id: CardId) -> SmallVec<[Civilisation; 2]> {
        let base: SmallVec<[Civilisation; 2]> = match self.card(id) {
            Ok(card) => smallvec![card.civilisation],
            Err(err) => {
                tracing::debug!("get_civilisation: {err}");
                return SmallVec::new();
            }
        };
        match self
            .fire(Event::GetCivilisation {
                card: id,
                civilisations: base.clone(),
            })
            .into_event()
        {
            Event::GetCivilisation { civilisations, .. } => civilisations,
            _ => base,
        }
    }

    pub fn has_family(&mut self, id: CardId, family: Family) -> bool {
        self.get_family(id).contains(&family)
    }

    pub fn has_civilisation(&mut self, id: CardId, civilisation: Civilisation) -> bool {
        self.get_civilisation(id).contains(&civilisation)
    }

    /// Do the two cards share at least one family?
    pub fn shares_family(&mut self, a: CardId, b: CardId) -> bool {
        let families = self.get_family(a);
        let other = self.get_family(b);
        families.iter().any(|f| other.contains(f))
    }
}
