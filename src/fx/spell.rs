//! Spell casting

use crate::core::{CardId, Handler};
use crate::game::{Context, Event, Match};
use smallvec::SmallVec;
use std::sync::Arc;

/// Two-stage spell
///
/// Once the spell has been played, `choose` picks its targets (usually by
/// prompting the caster) and `SpellCast` is fired with them. `resolve` runs
/// after `SpellCast` resolves, with the targets as they stand on the event.
pub fn spell<C, R>(choose: C, resolve: R) -> Handler
where
    C: Fn(&mut Match, CardId) -> Vec<CardId> + Send + Sync + 'static,
    R: Fn(&mut Match, CardId, &[CardId], &mut Context) + Send + Sync + 'static,
{
    let choose = Arc::new(choose);
    let resolve = Arc::new(resolve);

    Handler::new(move |_, card, ctx| match ctx.event() {
        event if event.is_play_of(card) => {
            let choose = choose.clone();
            ctx.schedule_after(move |m, _| {
                let targets: SmallVec<[CardId; 2]> = choose(m, card).into();
                m.fire(Event::SpellCast { card, targets });
            });
        }
        Event::SpellCast { card: cast, .. } if *cast == card => {
            let resolve = resolve.clone();
            ctx.schedule_after(move |m, ctx| {
                let targets = match ctx.event() {
                    Event::SpellCast { targets, .. } => targets.clone(),
                    _ => return,
                };
                resolve(m, card, &targets, ctx);
            });
        }
        _ => {}
    })
}

/// Played as a trap, this card stops the attack it responds to
pub fn negate_attack() -> Handler {
    Handler::new(|_, card, ctx| {
        if let Event::Trap {
            card: trap,
            negate_attack,
            ..
        } = ctx.event_mut()
        {
            if *trap == card {
                *negate_attack = true;
            }
        }
    })
}
