use crate::core::{Card, CardBuilder, Civilisation, Family};
use crate::fx;
use crate::game::Event;

pub fn vanara() -> Card {
    CardBuilder::new("Vanara", Civilisation::Prithvi, Family::Beast)
        .stats(2, 2)
        .build()
}

/// +1/+1 for every other beast on its owner's battlezone
pub fn salavrka() -> Card {
    CardBuilder::new("Salavrka", Civilisation::Prithvi, Family::Beast)
        .stats(1, 1)
        .ability(|m, card, ctx| {
            let (is_attack, is_defence) = match ctx.event() {
                Event::GetAttack { card: c, .. } => (*c == card, false),
                Event::GetDefence { card: c, .. } => (false, *c == card),
                _ => return,
            };
            if !is_attack && !is_defence {
                return;
            }
            let Ok(owner) = m.owner_of(card) else {
                return;
            };
            let mut pack = 0;
            for id in m.player(owner).creatures() {
                if id != card && m.has_family(id, Family::Beast) {
                    pack += 1;
                }
            }

            match ctx.event_mut() {
                Event::GetAttack { attack, .. } => *attack += pack,
                Event::GetDefence { defence, .. } => *defence += pack,
                _ => {}
            }
        })
        .build()
}

pub fn dvipin() -> Card {
    CardBuilder::new("Dvipin", Civilisation::Prithvi, Family::Beast)
        .rank(1)
        .stats(4, 2)
        .handler(fx::ambush())
        .build()
}

pub fn simha() -> Card {
    CardBuilder::new("Simha", Civilisation::Prithvi, Family::Beast)
        .rank(2)
        .stats(9, 7)
        .build()
}

pub fn kukkutah() -> Card {
    CardBuilder::new("Kukkutah", Civilisation::Vayu, Family::Bird)
        .stats(2, 2)
        .build()
}

pub fn cataka() -> Card {
    CardBuilder::new("Cataka", Civilisation::Vayu, Family::Bird)
        .stats(1, 1)
        .handler(fx::cant_be_attacked())
        .build()
}

pub fn deadly_zebrafish() -> Card {
    CardBuilder::new("Deadly Zebrafish", Civilisation::Apas, Family::Fish)
        .stats(1, 1)
        .handler(fx::poisonous())
        .build()
}

pub fn torpedoing_barracuda() -> Card {
    CardBuilder::new("Torpedoing Barracuda", Civilisation::Apas, Family::Fish)
        .rank(1)
        .stats(3, 1)
        .handler(fx::cant_be_blocked())
        .build()
}

/// Attack is doubled after every other modifier
pub fn pipilika() -> Card {
    CardBuilder::new("Pipilika", Civilisation::Prithvi, Family::Insect)
        .stats(1, 1)
        .ability(|_, card, ctx| {
            if matches!(ctx.event(), Event::GetAttack { card: c, .. } if *c == card) {
                ctx.schedule_after(|_, ctx| {
                    if let Event::GetAttack { attack, .. } = ctx.event_mut() {
                        *attack *= 2;
                    }
                });
            }
        })
        .build()
}

pub fn masaka() -> Card {
    CardBuilder::new("Masaka", Civilisation::Prithvi, Family::Insect)
        .stats(1, 1)
        .handler(fx::leech())
        .build()
}

pub fn sainika() -> Card {
    CardBuilder::new("Sainika", Civilisation::Agni, Family::Human)
        .stats(2, 2)
        .build()
}
