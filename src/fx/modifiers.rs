//! Stat modifiers and equipment

use crate::core::{CardId, Handler};
use crate::game::{Event, Match};
use crate::zones::Zone;

pub fn attack_modifier(n: i32) -> Handler {
    Handler::new(move |_, card, ctx| {
        if let Event::GetAttack { card: c, attack } = ctx.event_mut() {
            if *c == card {
                *attack += n;
            }
        }
    })
}

pub fn defence_modifier(n: i32) -> Handler {
    Handler::new(move |_, card, ctx| {
        if let Event::GetDefence { card: c, defence } = ctx.event_mut() {
            if *c == card {
                *defence += n;
            }
        }
    })
}

/// Creature this card is attached to, if it is in the soul
fn host(m: &Match, card: CardId) -> Option<CardId> {
    m.card(card)
        .ok()
        .filter(|c| c.zone == Zone::Soul)
        .and_then(|c| c.attached_to)
}

/// An equipment adds its printed attack and defence to the creature it is attached to
pub fn equipment() -> Handler {
    Handler::new(|m, card, ctx| {
        let Some(host) = host(m, card) else {
            return;
        };
        let Ok((attack, defence)) = m.card(card).map(|c| (c.attack, c.defence)) else {
            return;
        };
        match ctx.event_mut() {
            Event::GetAttack { card: c, attack: a } if *c == host => *a += attack,
            Event::GetDefence { card: c, defence: d } if *c == host => *d += defence,
            _ => {}
        }
    })
}

/// Run `inner` on behalf of the creature this card is attached to
///
/// Lets an equipment give its host an ability for as long as it stays
/// attached.
pub fn granted(inner: Handler) -> Handler {
    Handler::new(move |m, card, ctx| {
        if let Some(host) = host(m, card) {
            inner.call(m, host, ctx);
        }
    })
}
