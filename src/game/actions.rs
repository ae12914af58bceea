//! Card and player actions
//!
//! Zone moves, attachment, evolution, and the built-in behaviour behind
//! `PlayCard`, `Equip`, `CreatureDestroyed`, `Damage` and `Heal`.

use crate::core::{CardId, CardKind, Condition, ConditionId, Handler, Seat};
use crate::fx;
use crate::game::state::SERVER;
use crate::game::{Context, Event, Match};
use crate::loader::DeckList;
use crate::zones::Zone;
use crate::{MatchError, Result};

impl Match {
    /// Attach a temporary ability to a card
    pub fn add_condition(&mut self, card: CardId, handler: Handler) -> Result<ConditionId> {
        let id = ConditionId::new(self.next_condition_id);
        self.next_condition_id += 1;
        self.card_mut(card)?.conditions.push(Condition { id, handler });
        Ok(id)
    }

    /// Remove a condition by handle; returns false if it was already gone
    pub fn remove_condition(&mut self, card: CardId, condition: ConditionId) -> bool {
        match self.card_mut(card) {
            Ok(c) => {
                let before = c.conditions.len();
                c.conditions.retain(|x| x.id != condition);
                c.conditions.len() != before
            }
            Err(_) => false,
        }
    }

    /// Cards attached to `card`, in soul order
    pub fn attachments(&self, card: CardId) -> Vec<CardId> {
        let Ok(seat) = self.owner_of(card) else {
            return Vec::new();
        };
        let player = self.player(seat);
        player
            .zones
            .soul
            .cards
            .iter()
            .copied()
            .filter(|id| {
                player
                    .card(*id)
                    .map(|c| c.attached_to == Some(card))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Move a card to another of its owner's zones
    ///
    /// Fires `CardMoved` after the move is committed, then moves every
    /// attached card along with it (unless the destination is the soul).
    pub fn move_card(&mut self, card: CardId, to: Zone) -> Result<()> {
        let seat = self.owner_of(card)?;
        let attached = self.attachments(card);

        let player = self.player_mut(seat);
        let from = player.card(card)?.zone;
        player.container_mut(from).remove(card);
        player.container_mut(to).add(card);

        let c = player.card_mut(card)?;
        c.zone = to;
        if from == Zone::Soul && to != Zone::Soul {
            c.attached_to = None;
        }

        self.fire(Event::CardMoved { card, from, to });

        if to != Zone::Soul {
            for a in attached {
                if self.zone_of(a) == Some(Zone::Soul) {
                    self.move_card(a, to)?;
                }
            }
        }
        Ok(())
    }

    /// Put `card` in its owner's soul, attached to `target`
    ///
    /// Anything that was attached to `card` is re-attached to `target`.
    pub fn attach_to(&mut self, card: CardId, target: CardId) -> Result<()> {
        if card == target {
            return Err(MatchError::InvalidAttachment(format!(
                "card {card} cannot attach to itself"
            )));
        }
        let seat = self.owner_of(card)?;
        if self.owner_of(target)? != seat {
            return Err(MatchError::InvalidAttachment(format!(
                "card {card} and {target} have different owners"
            )));
        }
        if self.zone_of(target) != Some(Zone::Battlezone) {
            return Err(MatchError::CardNotInZone {
                card: target,
                zone: Zone::Battlezone,
            });
        }

        let former = self.attachments(card);
        self.move_card(card, Zone::Soul)?;
        self.card_mut(card)?.attached_to = Some(target);
        for a in former {
            self.card_mut(a)?.attached_to = Some(target);
        }
        Ok(())
    }

    /// Send every equipment attached to `creature` to the graveyard
    pub fn remove_equipments(&mut self, creature: CardId) -> Result<()> {
        for a in self.attachments(creature) {
            if self.card(a)?.kind() == CardKind::Equipment {
                self.move_card(a, Zone::Graveyard)?;
            }
        }
        Ok(())
    }

    /// Exchange the runtime identities of two cards of the same owner
    ///
    /// The card objects trade ids and conditions; zone lists and attachment
    /// references are rewritten so every place that named `a` now names `b`
    /// and vice versa. Anything still holding the old board id keeps
    /// resolving to whichever card now stands on the board.
    pub fn swap_identity(&mut self, a: CardId, b: CardId) -> Result<()> {
        if a == b {
            return Ok(());
        }
        let seat = self.owner_of(a)?;
        if self.owner_of(b)? != seat {
            return Err(MatchError::InvalidAction(format!(
                "cannot swap identity of {a} and {b} across players"
            )));
        }

        let player = self.player_mut(seat);
        let (Some(mut card_a), Some(mut card_b)) = (player.cards.remove(a), player.cards.remove(b))
        else {
            return Err(MatchError::CardNotFound(a));
        };

        std::mem::swap(&mut card_a.conditions, &mut card_b.conditions);
        card_a.id = b;
        card_b.id = a;
        player.cards.insert(b, card_a);
        player.cards.insert(a, card_b);

        for zone in player.zones.iter_mut() {
            zone.swap_ids(a, b);
        }
        for (_, card) in player.cards.iter_mut() {
            if card.attached_to == Some(a) {
                card.attached_to = Some(b);
            } else if card.attached_to == Some(b) {
                card.attached_to = Some(a);
            }
        }
        Ok(())
    }

    /// Evolve `creature` (on the battlezone) into `card`
    ///
    /// `card` takes the board, the tap state and the identity of `creature`;
    /// the old form is kept attached underneath it.
    pub fn evolve(&mut self, creature: CardId, card: CardId) {
        if let Err(err) = self.try_evolve(creature, card) {
            tracing::debug!("Couldn't evolve: {err}");
        }
    }

    fn try_evolve(&mut self, creature: CardId, card: CardId) -> Result<()> {
        let seat = self.owner_of(creature)?;
        let old_name = self.card(creature)?.name.clone();
        let new_name = self.card(card)?.name.clone();
        let tapped = self.card(creature)?.tapped;

        self.move_card(card, Zone::Battlezone)?;
        self.card_mut(card)?.tapped = tapped;
        self.attach_to(creature, card)?;
        self.swap_identity(creature, card)?;

        // `creature` now names the evolved card on the board
        self.add_condition(creature, fx::cant_evolve())?;

        self.chat(
            SERVER,
            format!(
                "{} evolved {} to {}",
                self.player(seat).name,
                old_name,
                new_name
            ),
        );
        Ok(())
    }

    /// Revert `card` to a previous form chosen by its owner
    ///
    /// With no previous form (or if the owner declines) the card is destroyed.
    pub fn devolve(&mut self, card: CardId, source: Option<CardId>) {
        let Ok(seat) = self.owner_of(card) else {
            return;
        };

        let candidates: Vec<CardId> = self
            .attachments(card)
            .into_iter()
            .filter(|id| {
                self.card(*id)
                    .map(|c| c.kind() != CardKind::Equipment)
                    .unwrap_or(false)
            })
            .collect();
        let chosen = self.search(seat, &candidates, "Select a card", 1, 1, true);

        let Some(&previous) = chosen.first() else {
            self.destroy(card, source);
            return;
        };

        if let Err(err) = self.try_devolve(card, previous) {
            tracing::debug!("Couldn't devolve: {err}");
            return;
        }

        // After the swap `previous` names the outgoing form
        self.destroy(previous, source);
    }

    fn try_devolve(&mut self, card: CardId, previous: CardId) -> Result<()> {
        let tapped = self.card(card)?.tapped;
        self.move_card(previous, Zone::Battlezone)?;
        self.card_mut(previous)?.tapped = tapped;

        for a in self.attachments(card) {
            self.attach_to(a, previous)?;
        }
        self.swap_identity(card, previous)
    }

    /// Fire `CreatureDestroyed` for `card`
    pub fn destroy(&mut self, card: CardId, source: Option<CardId>) {
        self.fire(Event::CreatureDestroyed { card, source });
    }

    pub(crate) fn destroy_action(&mut self, card: CardId) {
        let Ok(name) = self.card(card).map(|c| c.name.clone()) else {
            return;
        };
        if self.zone_of(card) != Some(Zone::Battlezone) {
            tracing::debug!(%card, "Destroyed card is not on the battlezone");
            return;
        }
        if let Err(err) = self.move_card(card, Zone::Graveyard) {
            tracing::debug!("{err}");
            return;
        }
        self.chat(SERVER, format!("{name} was destroyed"));
    }

    /// Move up to `n` cards from the top of the deck to the hand
    ///
    /// A player whose deck is empty afterwards loses the match.
    pub fn draw_cards(&mut self, seat: Seat, n: usize) {
        let n = n.min(self.player(seat).zones.deck.len());
        for _ in 0..n {
            let Some(top) = self.player(seat).zones.deck.peek_top() else {
                break;
            };
            if let Err(err) = self.move_card(top, Zone::Hand) {
                tracing::debug!("{err}");
                break;
            }
        }

        let name = self.player(seat).name.clone();
        if n == 1 {
            self.chat(SERVER, format!("{name} drew 1 card"));
        } else {
            self.chat(SERVER, format!("{name} drew {n} cards"));
        }

        if self.player(seat).zones.deck.is_empty() {
            self.end(
                seat.opponent(),
                format!("{name} has no cards left in their deck"),
            );
        }
    }

    /// Deal damage to a player; at zero life or below the player loses
    pub fn damage(&mut self, seat: Seat, source: Option<CardId>, amount: i32) {
        if amount <= 0 {
            return;
        }

        let mut ctx = Context::new(Event::Damage {
            player: seat,
            source,
            amount,
        });
        ctx.schedule_after(|m, ctx| {
            if let Event::Damage {
                player,
                source,
                amount,
            } = *ctx.event()
            {
                let from = m.source_name(source);
                let name = m.player(player).name.clone();
                m.chat(SERVER, format!("{from} did {amount} damage to {name}"));
            }
        });
        self.handle_fx(&mut ctx);

        if self.player(seat).life <= 0 {
            let name = self.player(seat).name.clone();
            self.end(seat.opponent(), format!("{name} has no life left"));
        }
    }

    pub fn heal(&mut self, seat: Seat, source: Option<CardId>, amount: i32) {
        if amount <= 0 {
            return;
        }

        let mut ctx = Context::new(Event::Heal {
            player: seat,
            source,
            amount,
        });
        ctx.schedule_after(|m, ctx| {
            if let Event::Heal {
                player,
                source,
                amount,
            } = *ctx.event()
            {
                let from = m.source_name(source);
                let name = m.player(player).name.clone();
                m.chat(SERVER, format!("{from} healed {amount} life for {name}"));
            }
        });
        self.handle_fx(&mut ctx);
    }

    fn source_name(&self, source: Option<CardId>) -> String {
        source
            .and_then(|id| self.card(id).ok())
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| SERVER.to_string())
    }

    /// Play a card from hand (or trapzone) after checking the play is legal
    ///
    /// Illegal plays are warned about and leave the match untouched.
    /// Returns true if the play resolved without being cancelled.
    pub fn play_card(&mut self, seat: Seat, card: CardId, target: Option<CardId>) -> bool {
        let (kind, name, civilisation) = match self.card(card) {
            Ok(c) => (c.kind(), c.name.clone(), c.civilisation),
            Err(err) => {
                tracing::debug!("play_card: {err}");
                return false;
            }
        };

        match kind {
            CardKind::Creature if self.get_rank(card) > 0 => {
                let legal = target.is_some_and(|t| self.can_evolve_from(seat, card, t));
                if !legal {
                    self.warn(seat, format!("{name} cannot evolve from that creature"));
                    return false;
                }
            }
            CardKind::Creature => {}
            CardKind::Spell => {
                let rank = self.get_rank(card);
                let creatures = self.player(seat).creatures();
                let castable = creatures
                    .into_iter()
                    .any(|c| self.has_civilisation(c, civilisation) && self.get_rank(c) >= rank);
                if !castable {
                    self.warn(seat, format!("{name} cannot be cast, conditions unsatisfied"));
                    return false;
                }
            }
            CardKind::Equipment => {
                if let Some(t) = target {
                    if !self.can_equip(seat, card, t) {
                        self.warn(seat, format!("{name} cannot be equipped on that creature"));
                        return false;
                    }
                }
            }
        }

        !self.fire(Event::PlayCard { card, target }).cancelled()
    }

    /// Is `target` a creature of `seat` that `card` may evolve from?
    pub fn can_evolve_from(&mut self, seat: Seat, card: CardId, target: CardId) -> bool {
        if !self.player(seat).creatures().contains(&target) {
            return false;
        }
        self.shares_family(card, target) && self.get_rank(card) - self.get_rank(target) == 1
    }

    /// Is `target` a creature of `seat` that `card` may be equipped on?
    pub fn can_equip(&mut self, seat: Seat, card: CardId, target: CardId) -> bool {
        if !self.player(seat).creatures().contains(&target) {
            return false;
        }
        let Ok(civilisation) = self.card(card).map(|c| c.civilisation) else {
            return false;
        };
        self.has_civilisation(target, civilisation) && self.get_rank(target) >= self.get_rank(card)
    }

    pub(crate) fn play_card_action(
        &mut self,
        card: CardId,
        target: Option<CardId>,
        ctx: &mut Context,
    ) {
        let Ok((seat, kind, name)) = self
            .card(card)
            .map(|c| (c.owner, c.kind(), c.name.clone()))
        else {
            ctx.interrupt_flow();
            return;
        };
        let player_name = self.player(seat).name.clone();

        match kind {
            CardKind::Creature => {
                if self.get_rank(card) == 0 {
                    if let Err(err) = self.move_card(card, Zone::Battlezone) {
                        tracing::debug!("{err}");
                        ctx.interrupt_flow();
                        return;
                    }
                    self.chat(SERVER, format!("{player_name} summoned creature {name}"));
                    if let Err(err) = self.add_condition(card, fx::cant_evolve()) {
                        tracing::debug!("{err}");
                    }
                } else if let Some(creature) = target {
                    if self.fire(Event::Evolve { card, creature }).cancelled() {
                        ctx.interrupt_flow();
                    }
                } else {
                    ctx.interrupt_flow();
                }
            }
            CardKind::Spell => {
                if let Err(err) = self.move_card(card, Zone::Graveyard) {
                    tracing::debug!("{err}");
                    ctx.interrupt_flow();
                    return;
                }
                self.chat(SERVER, format!("{player_name} cast {name}"));
            }
            CardKind::Equipment => {
                let creature = match target {
                    Some(t) => Some(t),
                    None => {
                        let candidates = self.player(seat).creatures();
                        let text =
                            format!("choose a creature to equip {name} from your battlezone");
                        self.filter(seat, &candidates, &text, 1, 1, true, |m, c| {
                            m.can_equip(seat, card, c)
                        })
                        .first()
                        .copied()
                    }
                };
                match creature {
                    Some(creature) => {
                        if self.fire(Event::Equip { card, creature }).cancelled() {
                            ctx.interrupt_flow();
                        }
                    }
                    None => ctx.interrupt_flow(),
                }
            }
        }
    }

    pub(crate) fn equip_action(&mut self, card: CardId, creature: CardId) {
        let result = self
            .remove_equipments(creature)
            .and_then(|_| self.attach_to(card, creature));
        if let Err(err) = result {
            tracing::debug!("Couldn't equip: {err}");
            return;
        }

        if let (Ok(c), Ok(t)) = (self.card(card), self.card(creature)) {
            let msg = format!(
                "{} equipped {} on {}",
                self.player(c.owner).name,
                c.name,
                t.name
            );
            self.chat(SERVER, msg);
        }
    }

    /// Set a card from hand face down in the trapzone
    pub fn set_card(&mut self, seat: Seat, card: CardId) -> Result<()> {
        if !self.player(seat).has_card(Zone::Hand, card) {
            return Err(MatchError::CardNotInZone {
                card,
                zone: Zone::Hand,
            });
        }
        self.move_card(card, Zone::Trapzone)
    }

    /// Build `seat`'s deck from template ids, replacing any previous choice
    pub fn choose_deck(&mut self, seat: Seat, templates: &[u32]) -> Result<()> {
        let deck = DeckList::from_ids(templates);
        deck.validate(&self.config, &self.registry)?;

        let mut cards = Vec::with_capacity(deck.len());
        for template in deck.cards.iter().copied() {
            let mut card = self.registry.construct(template)?;
            card.id = self.next_card_id();
            card.template_id = template;
            card.owner = seat;
            card.zone = Zone::Deck;
            cards.push(card);
        }

        let player = self.player_mut(seat);
        player.cards = Default::default();
        player.zones = Default::default();
        for card in cards {
            player.zones.deck.add(card.id);
            player.cards.insert(card.id, card);
        }
        player.ready = true;
        Ok(())
    }

    pub fn shuffle_deck(&mut self, seat: Seat) {
        self.shuffle_zone(seat, Zone::Deck);

        let name = self.player(seat).name.clone();
        self.chat(SERVER, format!("{name}'s deck was shuffled"));
    }
}
