use crate::core::{Card, CardBuilder, CardId, Civilisation, Family, Seat};
use crate::fx;
use crate::game::state::SERVER;
use crate::game::Match;
use crate::zones::Zone;

fn caster(m: &Match, card: CardId) -> Option<Seat> {
    m.owner_of(card).ok()
}

fn pick_opposing_creature(m: &mut Match, card: CardId) -> Vec<CardId> {
    let Some(seat) = caster(m, card) else {
        return Vec::new();
    };
    let targets = m.player(seat.opponent()).container(Zone::Battlezone);
    m.search(seat, &targets, "Select 1 of your opponents creatures", 1, 1, false)
}

fn no_targets(_: &mut Match, _: CardId) -> Vec<CardId> {
    Vec::new()
}

/// Destroys an opposing creature with 2 defence or less
pub fn fireball() -> Card {
    CardBuilder::new("Fireball", Civilisation::Agni, Family::Spell)
        .handler(fx::spell(pick_opposing_creature, |m, card, targets, ctx| {
            for &t in targets {
                if m.get_defence(t) <= 2 {
                    m.destroy(t, Some(card));
                } else {
                    ctx.interrupt_flow();
                }
            }
        }))
        .build()
}

/// One of your creatures gets +4 attack until your next turn
pub fn energy_surge() -> Card {
    CardBuilder::new("Energy Surge", Civilisation::Agni, Family::Spell)
        .handler(fx::spell(
            |m, card| {
                let Some(seat) = caster(m, card) else {
                    return Vec::new();
                };
                let targets = m.player(seat).container(Zone::Battlezone);
                m.search(seat, &targets, "Select 1 of your creatures", 1, 1, false)
            },
            |m, _, targets, _| {
                for &t in targets {
                    if let Err(err) = m.add_condition(t, fx::attack_modifier(4)) {
                        tracing::debug!("{err}");
                    }
                }
            },
        ))
        .build()
}

/// Destroys every creature with 1 defence or less
pub fn rain_of_arrows() -> Card {
    CardBuilder::new("Rain Of Arrows", Civilisation::Agni, Family::Spell)
        .handler(fx::spell(no_targets, |m, card, _, _| {
            let Some(seat) = caster(m, card) else {
                return;
            };
            let mut creatures = m.player(seat).container(Zone::Battlezone);
            creatures.extend(m.player(seat.opponent()).container(Zone::Battlezone));
            for c in creatures {
                if m.get_defence(c) <= 1 {
                    m.destroy(c, Some(card));
                }
            }
        }))
        .build()
}

pub fn tidal_wave() -> Card {
    CardBuilder::new("Tidal Wave", Civilisation::Apas, Family::Spell)
        .rank(1)
        .handler(fx::spell(no_targets, |m, card, _, _| {
            if let Some(seat) = caster(m, card) {
                m.draw_cards(seat, 2);
            }
        }))
        .build()
}

pub fn amrita() -> Card {
    CardBuilder::new("Amrita", Civilisation::Apas, Family::Spell)
        .rank(1)
        .handler(fx::spell(no_targets, |m, card, _, _| {
            if let Some(seat) = caster(m, card) {
                m.heal(seat, Some(card), 8);
            }
        }))
        .build()
}

/// Taps every opposing creature
pub fn blizzard() -> Card {
    CardBuilder::new("Blizzard", Civilisation::Apas, Family::Spell)
        .rank(2)
        .handler(fx::spell(no_targets, |m, card, _, _| {
            let Some(seat) = caster(m, card) else {
                return;
            };
            for c in m.player(seat.opponent()).container(Zone::Battlezone) {
                if let Ok(c) = m.card_mut(c) {
                    c.tap();
                }
            }
        }))
        .build()
}

/// Sends a set-down card of the opponent to their graveyard
pub fn whirlwind() -> Card {
    CardBuilder::new("Whirlwind", Civilisation::Vayu, Family::Spell)
        .handler(fx::spell(
            |m, card| {
                let Some(seat) = caster(m, card) else {
                    return Vec::new();
                };
                let traps = m.player(seat.opponent()).container(Zone::Trapzone);
                m.search(seat, &traps, "Select 1 of your opponents traps", 1, 1, false)
            },
            |m, card, targets, _| {
                for &t in targets {
                    if let Err(err) = m.move_card(t, Zone::Graveyard) {
                        tracing::debug!("{err}");
                        continue;
                    }
                    let (Ok(trap), Ok(spell)) = (m.card(t), m.card(card)) else {
                        continue;
                    };
                    let msg = format!(
                        "{} was moved to {} {} by {}",
                        trap.name,
                        m.player(trap.owner).name,
                        Zone::Graveyard,
                        spell.name
                    );
                    m.chat(SERVER, msg);
                }
            },
        ))
        .build()
}

/// Set down, it stops the attack it is sprung against
pub fn mirage() -> Card {
    CardBuilder::new("Mirage", Civilisation::Vayu, Family::Spell)
        .handler(fx::negate_attack())
        .build()
}
