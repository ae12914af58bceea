use crate::core::{CardId, Handler, Seat};
use crate::game::{Context, Event, Match};
use crate::zones::Zone;

/// A set-down creature that, when sprung as a trap, enters the battlezone
/// and may immediately fight the attacker
///
/// An evolution ambusher asks its owner for a creature to evolve from.
pub fn ambush() -> Handler {
    Handler::new(|_, card, ctx| {
        if let Event::Trap {
            card: trap,
            attacker,
            ..
        } = *ctx.event()
        {
            if trap == card {
                ctx.override_with(move |m, ctx| spring(m, card, ctx));
                ctx.schedule_after(move |m, _| strike(m, card, attacker));
            }
        }
    })
}

fn spring(m: &mut Match, card: CardId, ctx: &mut Context) {
    let Ok((seat, name)) = m.card(card).map(|c| (c.owner, c.name.clone())) else {
        ctx.interrupt_flow();
        return;
    };
    if m.zone_of(card) != Some(Zone::Trapzone) {
        ctx.interrupt_flow();
        return;
    }

    let target = if m.get_rank(card) > 0 {
        match evolution_base(m, seat, card, &format!("choose a creature to evolve to {name}")) {
            Some(t) => Some(t),
            None => {
                ctx.interrupt_flow();
                return;
            }
        }
    } else {
        None
    };

    if !m.play_card(seat, card, target) {
        ctx.interrupt_flow();
    }
}

fn evolution_base(m: &mut Match, seat: Seat, card: CardId, text: &str) -> Option<CardId> {
    let creatures = m.player(seat).creatures();
    m.filter(seat, &creatures, text, 1, 1, true, |m, c| {
        m.can_evolve_from(seat, card, c)
    })
    .first()
    .copied()
}

fn strike(m: &mut Match, card: CardId, attacker: CardId) {
    // An evolved ambusher stands on the board under its base's id
    let card = match m.card(card) {
        Ok(c) if c.zone == Zone::Soul => c.attached_to.unwrap_or(card),
        _ => card,
    };
    let Ok((seat, name, tapped)) = m.card(card).map(|c| (c.owner, c.name.clone(), c.tapped)) else {
        return;
    };
    if tapped || m.zone_of(card) != Some(Zone::Battlezone) {
        return;
    }

    let confirmed = !m
        .search(seat, &[card], &format!("Should {name} ambush?"), 1, 1, true)
        .is_empty();

    if let Ok(c) = m.card_mut(card) {
        c.tap();
    }
    if confirmed {
        m.battle(card, attacker, false);
    }
}
