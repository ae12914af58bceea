use crate::core::{CardId, Handler};
use crate::game::state::SERVER;
use crate::game::{Event, Match, Step};
use crate::zones::Zone;

/// Destroy the card at the end of the turn
pub fn destroy_end_of_turn() -> Handler {
    Handler::new(|m, card, ctx| {
        if matches!(ctx.event(), Event::Step(Step::End))
            && m.zone_of(card) == Some(Zone::Battlezone)
        {
            m.destroy(card, None);
        }
    })
}

fn poison(m: &mut Match, victim: CardId, source: CardId) {
    if let Err(err) = m.add_condition(victim, destroy_end_of_turn()) {
        tracing::debug!("Couldn't poison: {err}");
        return;
    }
    let (Ok(victim), Ok(source)) = (m.card(victim), m.card(source)) else {
        return;
    };
    let msg = format!("{} is poisoned by {}", victim.name, source.name);
    m.chat(SERVER, msg);
}

/// A creature fighting this card as defender dies at the end of the turn
pub fn poisonous() -> Handler {
    Handler::new(|_, card, ctx| {
        if let Event::Battle {
            attacker, defender, ..
        } = *ctx.event()
        {
            if defender == card {
                ctx.schedule_after(move |m, _| poison(m, attacker, card));
            }
        }
    })
}

/// A creature this card attacks dies at the end of the turn
pub fn venomous() -> Handler {
    Handler::new(|_, card, ctx| {
        if let Event::Battle {
            attacker, defender, ..
        } = *ctx.event()
        {
            if attacker == card {
                ctx.schedule_after(move |m, _| poison(m, defender, card));
            }
        }
    })
}
