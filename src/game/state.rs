//! Match state and the effect pipeline

use crate::config::MatchConfig;
use crate::core::{Card, CardId, Handler, Player, PlayerName, Seat};
use crate::game::phase::TurnStructure;
use crate::game::{Context, Event};
use crate::loader::CardRegistry;
use crate::protocol::{ServerMessage, Writer};
use crate::zones::Zone;
use crate::{MatchError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::sync::Arc;

/// Sender name used for engine narration
pub const SERVER: &str = "Server";

/// How a finished match ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Seat,
    pub reason: String,
}

/// Seats players before a match can be created
pub struct MatchSetup {
    config: MatchConfig,
    registry: Arc<CardRegistry>,
    seats: Vec<(PlayerName, Arc<dyn Writer>)>,
}

impl MatchSetup {
    pub fn new(config: MatchConfig, registry: Arc<CardRegistry>) -> Self {
        MatchSetup {
            config,
            registry,
            seats: Vec::with_capacity(2),
        }
    }

    /// Take the next free seat
    pub fn add_player(
        &mut self,
        name: impl Into<PlayerName>,
        writer: Arc<dyn Writer>,
    ) -> Result<Seat> {
        let seat = match self.seats.len() {
            0 => Seat::One,
            1 => Seat::Two,
            _ => return Err(MatchError::SeatsFull),
        };
        self.seats.push((name.into(), writer));
        Ok(seat)
    }

    pub fn build(self) -> Result<Match> {
        let mut seats = self.seats.into_iter();
        let (name1, writer1) = seats.next().ok_or(MatchError::SeatsNotFilled(Seat::One))?;
        let (name2, writer2) = seats.next().ok_or(MatchError::SeatsNotFilled(Seat::Two))?;
        let life = self.config.starting_life;

        let seed = self.config.seed.unwrap_or_else(rand::random);
        tracing::debug!(seed, "Creating match");

        Ok(Match {
            players: [
                Player::new(Seat::One, name1, life, writer1),
                Player::new(Seat::Two, name2, life, writer2),
            ],
            config: self.config,
            registry: self.registry,
            rng: ChaCha12Rng::seed_from_u64(seed),
            turn: TurnStructure::new(Seat::One),
            started: false,
            outcome: None,
            next_card_id: 1,
            next_condition_id: 1,
            depth: 0,
        })
    }
}

/// A two-player match
///
/// Owns both players (and through them every card). All mutation happens on
/// whichever thread owns the `Match`; see `MatchHandle` for the threaded
/// runner.
pub struct Match {
    players: [Player; 2],

    pub config: MatchConfig,

    pub(crate) registry: Arc<CardRegistry>,

    rng: ChaCha12Rng,

    pub turn: TurnStructure,

    pub(crate) started: bool,

    outcome: Option<MatchOutcome>,

    next_card_id: u32,
    pub(crate) next_condition_id: u32,

    /// Nesting level of `handle_fx`
    depth: u32,
}

impl Match {
    /// Create a match with both seats filled
    pub fn new_two_player(
        config: MatchConfig,
        registry: Arc<CardRegistry>,
        player1: (&str, Arc<dyn Writer>),
        player2: (&str, Arc<dyn Writer>),
    ) -> Result<Self> {
        let mut setup = MatchSetup::new(config, registry);
        setup.add_player(player1.0, player1.1)?;
        setup.add_player(player2.0, player2.1)?;
        setup.build()
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn active_seat(&self) -> Seat {
        self.turn.active_player
    }

    pub fn is_turn_of(&self, seat: Seat) -> bool {
        self.started && self.turn.active_player == seat
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.outcome.as_ref().map(|o| o.winner)
    }

    pub(crate) fn next_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// Seat of the player owning `id`
    pub fn owner_of(&self, id: CardId) -> Result<Seat> {
        Seat::BOTH
            .into_iter()
            .find(|seat| self.player(*seat).cards.contains(id))
            .ok_or(MatchError::CardNotFound(id))
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        let seat = self.owner_of(id)?;
        self.player(seat).card(id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        let seat = self.owner_of(id)?;
        self.player_mut(seat).card_mut(id)
    }

    /// Current zone of `id`, if the card exists
    pub fn zone_of(&self, id: CardId) -> Option<Zone> {
        self.card(id).ok().map(|c| c.zone)
    }

    /// Every card in pipeline order: active player first, then by zone
    pub fn collect_cards(&self) -> Vec<CardId> {
        let active = self.turn.active_player;
        let mut cards = Vec::new();
        for seat in [active, active.opponent()] {
            let player = self.player(seat);
            for zone in Zone::ALL {
                cards.extend_from_slice(&player.zones.get(zone).cards);
            }
        }
        cards
    }

    /// Run `event` through the pipeline and hand back its context
    pub fn fire(&mut self, event: Event) -> Context {
        let mut ctx = Context::new(event);
        self.handle_fx(&mut ctx);
        ctx
    }

    /// Resolve one event
    ///
    /// 1. every handler of every card sees the event, until one cancels it
    /// 2. effects scheduled to run before the main action
    /// 3. the override if one was registered, else the built-in default
    /// 4. effects scheduled to run after
    ///
    /// A cancelled context skips everything that has not run yet.
    pub fn handle_fx(&mut self, ctx: &mut Context) {
        if self.is_over() {
            return;
        }

        self.depth += 1;
        self.run_pipeline(ctx);
        self.depth -= 1;

        if self.depth == 0 && !ctx.event().is_query() {
            self.broadcast_state();
        }
    }

    fn run_pipeline(&mut self, ctx: &mut Context) {
        let snapshot: Vec<(CardId, Vec<Handler>)> = self
            .collect_cards()
            .into_iter()
            .filter_map(|id| self.card(id).ok().map(|c| (id, c.all_handlers())))
            .collect();

        'resolve: for (id, handlers) in snapshot {
            for handler in handlers {
                if ctx.cancelled() {
                    break 'resolve;
                }
                handler.call(self, id, ctx);
            }
        }

        while let Some(fx) = ctx.next_before() {
            if ctx.cancelled() {
                return;
            }
            fx(self, ctx);
        }

        if ctx.cancelled() {
            return;
        }
        match ctx.take_override() {
            Some(fx) => fx(self, ctx),
            None => self.default_action(ctx),
        }

        while let Some(fx) = ctx.next_after() {
            if ctx.cancelled() {
                return;
            }
            fx(self, ctx);
        }
    }

    /// Built-in behaviour of each event kind
    fn default_action(&mut self, ctx: &mut Context) {
        match ctx.event().clone() {
            Event::Step(step) => self.step_action(step, ctx),
            Event::EndTurn => self.end_turn_action(),
            Event::PlayCard { card, target } => self.play_card_action(card, target, ctx),
            Event::Attack { attacker, target } => self.attack_action(attacker, target, ctx),
            Event::Trap { card, .. } => self.trap_action(card, ctx),
            Event::Block { blocker, attacker } => self.block_action(blocker, attacker, ctx),
            Event::Battle {
                attacker, defender, ..
            } => self.battle_action(attacker, defender),
            Event::Evolve { card, creature } => self.evolve(creature, card),
            Event::Equip { card, creature } => self.equip_action(card, creature),
            Event::CreatureDestroyed { card, .. } => self.destroy_action(card),
            Event::Damage { player, amount, .. } => self.player_mut(player).life -= amount,
            Event::Heal { player, amount, .. } => self.player_mut(player).life += amount,
            Event::CardMoved { .. }
            | Event::SpellCast { .. }
            | Event::GetAttack { .. }
            | Event::GetDefence { .. }
            | Event::GetRank { .. }
            | Event::GetFamily { .. }
            | Event::GetCivilisation { .. } => {}
        }
    }

    /// Shuffle one of `seat`'s zones with the match RNG
    pub(crate) fn shuffle_zone(&mut self, seat: Seat, zone: Zone) {
        self.players[seat.index()]
            .zones
            .get_mut(zone)
            .shuffle(&mut self.rng);
    }

    /// Recover after a panic unwound out of the pipeline
    pub(crate) fn reset_depth(&mut self) {
        self.depth = 0;
    }

    pub fn write_to(&self, seat: Seat, msg: &ServerMessage) {
        self.player(seat).write(msg);
    }

    /// Chat line to both players
    pub fn chat(&self, sender: &str, message: impl Into<String>) {
        let msg = ServerMessage::Chat {
            sender: sender.to_string(),
            message: message.into(),
        };
        for seat in Seat::BOTH {
            self.write_to(seat, &msg);
        }
    }

    pub fn warn(&self, seat: Seat, message: impl Into<String>) {
        self.write_to(
            seat,
            &ServerMessage::Warn {
                message: message.into(),
            },
        );
    }

    /// End the match; only the first call has an effect
    pub fn end(&mut self, winner: Seat, reason: impl Into<String>) {
        if self.is_over() {
            return;
        }
        let reason = reason.into();
        tracing::info!(%winner, %reason, "Match ended");
        self.chat(
            SERVER,
            format!("{} won the match, {}", self.player(winner).name, reason),
        );
        self.outcome = Some(MatchOutcome { winner, reason });
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("players", &self.players)
            .field("turn", &self.turn)
            .field("started", &self.started)
            .field("outcome", &self.outcome)
            .finish()
    }
}
