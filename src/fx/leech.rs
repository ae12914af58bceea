use crate::core::Handler;
use crate::game::Event;

/// The owner heals for damage this card deals, or for the defence of a
/// creature it destroys
pub fn leech() -> Handler {
    Handler::new(|m, card, ctx| {
        let Ok(owner) = m.owner_of(card) else {
            return;
        };
        match *ctx.event() {
            Event::Damage {
                source: Some(s), ..
            } if s == card => {
                ctx.schedule_after(move |m, ctx| {
                    if let Event::Damage { amount, .. } = *ctx.event() {
                        m.heal(owner, Some(card), amount);
                    }
                });
            }
            Event::CreatureDestroyed {
                card: victim,
                source: Some(s),
            } if s == card => {
                ctx.schedule_after(move |m, _| {
                    let amount = m.get_defence(victim);
                    m.heal(owner, Some(card), amount);
                });
            }
            _ => {}
        }
    })
}
