//! Abilities that veto an action

use super::owner_and_name;
use crate::core::Handler;
use crate::game::Event;

/// The card cannot evolve further (added to every freshly summoned creature)
pub fn cant_evolve() -> Handler {
    Handler::new(|_, card, ctx| {
        if matches!(ctx.event(), Event::Evolve { creature, .. } if *creature == card) {
            ctx.interrupt_flow();
        }
    })
}

pub fn cant_attack_players() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Attack { attacker, target: None } if *attacker == card) {
            if let Some((owner, name)) = owner_and_name(m, card) {
                m.warn(owner, format!("{name} can't attack players"));
            }
            ctx.interrupt_flow();
        }
    })
}

pub fn cant_attack_creatures() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Attack { attacker, target: Some(_) } if *attacker == card)
        {
            if let Some((owner, name)) = owner_and_name(m, card) {
                m.warn(owner, format!("{name} can't attack creatures"));
            }
            ctx.interrupt_flow();
        }
    })
}

/// Attacks that target this card are refused
pub fn cant_be_attacked() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Attack { target: Some(t), .. } if *t == card) {
            if let Some((owner, name)) = owner_and_name(m, card) {
                m.warn(owner.opponent(), format!("Can't attack {name}"));
            }
            ctx.interrupt_flow();
        }
    })
}

pub fn cant_block() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Block { blocker, .. } if *blocker == card) {
            if let Some((owner, name)) = owner_and_name(m, card) {
                m.warn(owner, format!("{name} can't block"));
            }
            ctx.interrupt_flow();
        }
    })
}

/// Blocks against this card as attacker are refused
pub fn cant_be_blocked() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Block { attacker, .. } if *attacker == card) {
            if let Some((owner, name)) = owner_and_name(m, card) {
                m.warn(owner.opponent(), format!("Can't block {name}"));
            }
            ctx.interrupt_flow();
        }
    })
}
