//! Attacks, responses and battles

use crate::core::{CardId, Seat};
use crate::game::{Context, Event, Match};
use crate::zones::Zone;

impl Match {
    /// Untapped, on the battlezone and with positive effective attack
    pub fn can_attack(&mut self, card: CardId) -> bool {
        match self.card(card) {
            Ok(c) if !c.tapped && c.zone == Zone::Battlezone => self.get_attack(card) > 0,
            _ => false,
        }
    }

    /// Untapped creatures that can block plus set-down trap cards
    pub fn attack_responses(&mut self, defender: Seat) -> Vec<CardId> {
        let mut responses = Vec::new();
        for id in self.player(defender).creatures() {
            let untapped = self.card(id).map(|c| !c.tapped).unwrap_or(false);
            if untapped && self.get_defence(id) > 0 {
                responses.push(id);
            }
        }
        responses.extend(self.player(defender).container(Zone::Trapzone));
        responses
    }

    /// Declare an attack with `attacker`
    ///
    /// `target` names an opposing creature, or `None` to attack the opposing
    /// player. The attacker is tapped afterwards even if the attack was
    /// cancelled.
    pub fn attack(&mut self, seat: Seat, attacker: CardId, target: Option<CardId>) {
        if seat == Seat::One && self.player(seat).turn_no == 1 && !self.config.first_turn_attack {
            self.warn(seat, "player 1 can't attack on first turn");
            return;
        }
        if !self.player(seat).has_card(Zone::Battlezone, attacker) {
            tracing::debug!(card = %attacker, "Attacker is not on the battlezone");
            return;
        }
        if let Some(t) = target {
            if !self.player(seat.opponent()).has_card(Zone::Battlezone, t) {
                tracing::debug!(card = %t, "Attack target is not on the opposing battlezone");
                return;
            }
        }
        if !self.can_attack(attacker) {
            if let Ok(c) = self.card(attacker) {
                self.warn(seat, format!("{} can't attack", c.name));
            }
            return;
        }

        self.fire(Event::Attack { attacker, target });

        if let Ok(c) = self.card_mut(attacker) {
            if c.zone == Zone::Battlezone {
                c.tap();
            }
        }
        self.broadcast_state();
    }

    /// Default attack: let the defender respond, then land the attack
    pub(crate) fn attack_action(
        &mut self,
        attacker: CardId,
        target: Option<CardId>,
        ctx: &mut Context,
    ) {
        let Ok((seat, attacker_name)) = self.card(attacker).map(|c| (c.owner, c.name.clone()))
        else {
            ctx.interrupt_flow();
            return;
        };
        let defender = seat.opponent();

        if !self.can_attack(attacker) {
            ctx.interrupt_flow();
            return;
        }
        let target_name = match target {
            Some(t) => match self.card(t) {
                Ok(c) if c.zone == Zone::Battlezone && c.owner == defender => c.name.to_string(),
                _ => {
                    ctx.interrupt_flow();
                    return;
                }
            },
            None => self.player(defender).name.to_string(),
        };

        let text = format!(
            "{attacker_name} is attacking {target_name}, you may play a set down card or block with a creature"
        );

        loop {
            let responses = self.attack_responses(defender);
            if responses.is_empty() {
                break;
            }

            self.broadcast_state();
            let chosen = self.search(defender, &responses, &text, 1, 1, true);
            let Some(&response) = chosen.first() else {
                break;
            };

            if self.zone_of(response) == Some(Zone::Trapzone) {
                let trap = self.fire(Event::Trap {
                    card: response,
                    attacker,
                    negate_attack: false,
                });
                let negated = matches!(
                    trap.event(),
                    Event::Trap {
                        negate_attack: true,
                        ..
                    }
                );
                if negated && !trap.cancelled() {
                    ctx.interrupt_flow();
                    return;
                }
            } else {
                let block = self.fire(Event::Block {
                    blocker: response,
                    attacker,
                });
                if !block.cancelled() {
                    // The battle already happened
                    ctx.interrupt_flow();
                    return;
                }
            }

            if self.is_over() || !self.can_attack(attacker) {
                ctx.interrupt_flow();
                return;
            }
        }

        match target {
            None => {
                let amount = self.get_attack(attacker);
                self.damage(defender, Some(attacker), amount);
            }
            Some(t) => {
                if self.zone_of(t) == Some(Zone::Battlezone) {
                    self.battle(attacker, t, false);
                }
            }
        }
    }

    /// Default trap: play the set-down card reactively
    pub(crate) fn trap_action(&mut self, card: CardId, ctx: &mut Context) {
        let Ok(seat) = self.owner_of(card) else {
            ctx.interrupt_flow();
            return;
        };
        if self.zone_of(card) != Some(Zone::Trapzone) || !self.play_card(seat, card, None) {
            ctx.interrupt_flow();
        }
    }

    /// Default block: tap the blocker and fight the attacker
    pub(crate) fn block_action(&mut self, blocker: CardId, attacker: CardId, ctx: &mut Context) {
        let can_block = match self.card(blocker) {
            Ok(c) => !c.tapped && c.zone == Zone::Battlezone,
            Err(_) => false,
        };
        if !can_block || self.get_defence(blocker) <= 0 {
            ctx.interrupt_flow();
            return;
        }

        if let Ok(c) = self.card_mut(blocker) {
            c.tap();
        }
        self.battle(attacker, blocker, true);
    }

    /// Fight between two creatures on the battlezone
    pub fn battle(&mut self, attacker: CardId, defender: CardId, blocked: bool) {
        if self.zone_of(attacker) != Some(Zone::Battlezone)
            || self.zone_of(defender) != Some(Zone::Battlezone)
        {
            return;
        }
        self.fire(Event::Battle {
            attacker,
            defender,
            blocked,
        });
    }

    /// Default battle: higher attack than the defender's defence destroys it
    pub(crate) fn battle_action(&mut self, attacker: CardId, defender: CardId) {
        if self.get_attack(attacker) > self.get_defence(defender) {
            self.destroy(defender, Some(attacker));
        }
    }
}
