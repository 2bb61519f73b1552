use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::betting::{self, Rejection};
use crate::deck::Deck;
use crate::errors::{ActionError, GameError};
use crate::game::{GameSnapshot, GameState, TableConfig, Winner};
use crate::logger::{format_hand_id, ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Action, ActionKind, PlayerAction};
use crate::pot::{distribute_all_pots, PotAward};
use crate::round::{self, Round};

/// Upper bound keeping 2 hole cards per seat, 5 board cards and 3 burns inside one deck.
pub const MAX_PLAYERS: usize = 10;

/// Outcome of one engine call, ready to hand to a transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    pub state: GameSnapshot,
    /// Human-readable entries produced by this call only
    pub log: Vec<String>,
    /// Legal actions of the rejected player, empty on success
    pub allowed_actions: Vec<ActionKind>,
    /// Pots paid out during this call
    pub awards: Vec<PotAward>,
    pub hand_complete: bool,
}

/// Game orchestrator: owns one table and runs hands end to end.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::TableConfig;
/// use holdem_engine::player::{Action, PlayerAction};
///
/// let mut engine = Engine::with_seed(&["alice", "bob"], TableConfig::default(), 42).unwrap();
/// engine.start_new_hand().unwrap();
///
/// // heads-up: the dealer (seat 0) acts first preflop
/// let result = engine.process_action(Action::new(0, PlayerAction::Fold)).unwrap();
/// assert!(result.success);
/// assert!(result.hand_complete);
/// assert_eq!(engine.game_state().players[1].chips, 1010);
/// ```
#[derive(Debug)]
pub struct Engine {
    state: GameState,
    hand_count: u32,
    rng: ChaCha20Rng,
    original_players: usize,
    record: Option<HandRecord>,
}

impl Engine {
    /// Table with an unpredictable shuffle source.
    pub fn new<S: AsRef<str>>(names: &[S], config: TableConfig) -> Result<Self, GameError> {
        Self::build(names, config, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Table whose every shuffle is reproducible from `seed`.
    pub fn with_seed<S: AsRef<str>>(
        names: &[S],
        config: TableConfig,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::build(names, config, ChaCha20Rng::seed_from_u64(seed))
    }

    fn build<S: AsRef<str>>(
        names: &[S],
        config: TableConfig,
        rng: ChaCha20Rng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if names.len() > MAX_PLAYERS {
            return Err(GameError::InvalidConfig(format!(
                "at most {MAX_PLAYERS} players, got {}",
                names.len()
            )));
        }
        Ok(Self {
            state: GameState::new(names, config),
            hand_count: 0,
            rng,
            original_players: names.len(),
            record: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Immutable snapshot for persistence and polling.
    pub fn game_state(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn hand_count(&self) -> u32 {
        self.hand_count
    }

    /// Record of the current (or last finished) hand.
    pub fn hand_record(&self) -> Option<&HandRecord> {
        self.record.as_ref()
    }

    /// Seat expected to act, if a betting round is open.
    pub fn current_player(&self) -> Option<usize> {
        if self.state.round.is_betting() && !self.state.game_ended {
            Some(self.state.current_player_index)
        } else {
            None
        }
    }

    pub fn allowed_actions(&self, player_id: usize) -> Result<Vec<ActionKind>, ActionError> {
        betting::allowed_actions(&self.state, player_id)
    }

    pub fn is_hand_complete(&self) -> bool {
        matches!(self.state.round, Round::Showdown | Round::PreRoundBetting)
    }

    /// Exactly one seat with chips left out of a table that started with two or more.
    pub fn tournament_winner(&self) -> Option<usize> {
        if self.original_players < 2 {
            return None;
        }
        let mut alive = self
            .state
            .players
            .iter()
            .filter(|p| !p.is_eliminated() && p.chips > 0);
        let first = alive.next()?;
        match alive.next() {
            None => Some(first.id),
            Some(_) => None,
        }
    }

    /// Deals the next hand: eliminates busted seats, moves the button, posts
    /// blinds and deals hole cards. Ends the tournament instead when only one
    /// player has chips left.
    pub fn start_new_hand(&mut self) -> Result<ActionResult, GameError> {
        if self.state.round.is_betting() || self.state.round == Round::CardReveal {
            return Err(GameError::HandInProgress);
        }
        if let Some(winner) = self.tournament_winner() {
            return Ok(self.end_tournament(winner));
        }

        let busted: Vec<usize> = self
            .state
            .players
            .iter()
            .filter(|p| !p.is_eliminated() && p.chips == 0)
            .map(|p| p.id)
            .collect();
        let seated = self.state.seated_count() - busted.len();
        if seated < 2 {
            return Err(GameError::NotEnoughPlayers(seated));
        }

        let mut log = Vec::new();
        for id in busted {
            self.state.players[id].eliminate();
            log.push(format!("{} is eliminated", self.state.players[id].name));
        }
        for p in self.state.players.iter_mut().filter(|p| !p.is_eliminated()) {
            p.reset_for_hand();
        }
        let seed: u64 = self.rng.random();
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        self.state.deck = deck;
        self.state.community_cards.clear();
        self.state.pot = 0;
        self.state.winners = None;

        round::rotate_dealer_button(&mut self.state)?;
        let (sb, bb) = match (self.state.small_blind_index, self.state.big_blind_index) {
            (Some(sb), Some(bb)) => (sb, bb),
            _ => return Err(GameError::NotEnoughPlayers(seated)),
        };
        let small_blind = self.state.small_blind;
        let big_blind = self.state.big_blind;
        for (seat, blind) in [(sb, small_blind), (bb, big_blind)] {
            let posted = self.state.players[seat].commit(blind);
            self.state.pot += posted;
            log.push(format!(
                "{} posts blind {}{}",
                self.state.players[seat].name,
                posted,
                if self.state.players[seat].is_all_in {
                    " and is all-in"
                } else {
                    ""
                }
            ));
        }

        self.state.deck.deal_to_players(&mut self.state.players)?;
        self.state.round = Round::Preflop;
        self.state.min_bet = big_blind;
        self.state.last_raise = big_blind;
        self.state.current_player_index = self
            .state
            .next_seat_after(bb, |p| p.can_act())
            .unwrap_or(bb);

        self.hand_count += 1;
        let date = Utc::now().format("%Y%m%d").to_string();
        self.record = Some(HandRecord::new(
            format_hand_id(&date, self.hand_count),
            Some(seed),
        ));
        tracing::info!(
            hand = self.hand_count,
            dealer = ?self.state.dealer_index,
            pot = self.state.pot,
            "hand started"
        );

        self.state.message = format!("Hand #{} started", self.hand_count);
        let awards = self.progress(&mut log)?;
        Ok(self.completed(log, awards))
    }

    /// Validates and applies one action, then advances the hand as far as the
    /// betting allows. A rejected action is reported with `success == false`
    /// and leaves the table untouched.
    pub fn process_action(&mut self, action: Action) -> Result<ActionResult, GameError> {
        if self.state.game_ended || !self.state.round.is_betting() {
            return Ok(self.rejected(Rejection::new(ActionError::NoHandInProgress, Vec::new())));
        }
        if let Some(winner) = round::check_automatic_win(&self.state) {
            let mut log = Vec::new();
            let awards = self.award_uncontested(winner, &mut log);
            return Ok(self.completed(log, awards));
        }
        if action.player_id >= self.state.players.len() {
            return Ok(self.rejected(Rejection::new(
                ActionError::UnknownPlayer(action.player_id),
                Vec::new(),
            )));
        }
        let expected = self.state.current_player_index;
        if action.player_id != expected {
            let allowed = betting::allowed_actions(&self.state, action.player_id).unwrap_or_default();
            return Ok(self.rejected(Rejection::new(
                ActionError::NotPlayersTurn {
                    expected,
                    actual: action.player_id,
                },
                allowed,
            )));
        }
        let validated = match betting::validate_action(&self.state, &action) {
            Ok(v) => v,
            Err(rejection) => return Ok(self.rejected(rejection)),
        };

        let round = self.state.round;
        let mut log = betting::apply_action(&mut self.state, action.player_id, validated);
        if let Some(record) = self.record.as_mut() {
            record.actions.push(ActionRecord {
                player_id: action.player_id,
                round,
                action: action.action,
            });
        }

        let mut awards = Vec::new();
        if action.action == PlayerAction::Fold {
            if let Some(winner) = round::check_automatic_win(&self.state) {
                awards = self.award_uncontested(winner, &mut log);
            }
        }
        if awards.is_empty() {
            awards = self.progress(&mut log)?;
        }
        Ok(self.completed(log, awards))
    }

    /// Resolves the hand once betting is over: the sole contender takes the pot
    /// without evaluation, otherwise pots go to showdown. Idempotent: once the
    /// pot is paid out further calls distribute nothing.
    pub fn determine_winner(&mut self) -> Result<Vec<PotAward>, GameError> {
        if self.state.pot == 0 {
            return Ok(Vec::new());
        }
        if let Some(winner) = round::check_automatic_win(&self.state) {
            let mut log = Vec::new();
            return Ok(self.award_uncontested(winner, &mut log));
        }
        if self.state.round == Round::River {
            round::advance_to_next_round(&mut self.state)?;
        }
        match self.state.round {
            Round::CardReveal | Round::Showdown => self.distribute_pot(),
            _ => Err(GameError::BettingNotComplete),
        }
    }

    /// Pays out every pot built from this hand's contributions. Idempotent.
    pub fn distribute_pot(&mut self) -> Result<Vec<PotAward>, GameError> {
        let awards = distribute_all_pots(&mut self.state).inspect_err(|e| {
            tracing::warn!(error = %e, "pot distribution failed");
        })?;
        if !awards.is_empty() {
            self.conclude(&awards, false);
        }
        Ok(awards)
    }

    /// Advances through every street that needs no decision, resolving the hand
    /// when betting is over. Returns pots paid out along the way.
    fn progress(&mut self, log: &mut Vec<String>) -> Result<Vec<PotAward>, GameError> {
        loop {
            if let Some(winner) = round::check_automatic_win(&self.state) {
                return Ok(self.award_uncontested(winner, log));
            }
            match self.state.round {
                Round::CardReveal => {
                    log.push("Cards revealed".to_string());
                    return self.distribute_pot();
                }
                r if r.is_betting() => {
                    if round::is_betting_round_complete(&self.state) {
                        log.extend(round::advance_to_next_round(&mut self.state)?);
                        continue;
                    }
                    self.state.current_player_index = self.next_to_act();
                    return Ok(Vec::new());
                }
                _ => return Ok(Vec::new()),
            }
        }
    }

    /// First seat, starting from the current one, that still owes a decision.
    fn next_to_act(&self) -> usize {
        let highest = self.state.highest_bet();
        let from = self.state.current_player_index;
        let n = self.state.players.len();
        (0..n)
            .map(|offset| (from + offset) % n)
            .find(|&i| {
                let p = &self.state.players[i];
                p.can_act() && (!p.has_acted || p.current_bet < highest)
            })
            .unwrap_or(from)
    }

    fn award_uncontested(&mut self, winner: usize, log: &mut Vec<String>) -> Vec<PotAward> {
        let amount = self.state.pot;
        if amount == 0 {
            return Vec::new();
        }
        self.state.players[winner].add_chips(amount);
        self.state.pot = 0;
        log.push(format!(
            "{} wins {} uncontested",
            self.state.players[winner].name, amount
        ));
        let awards = vec![PotAward {
            pot_index: 0,
            amount,
            winners: vec![Winner {
                player_id: winner,
                amount,
                category: None,
            }],
        }];
        self.conclude(&awards, true);
        awards
    }

    /// Bookkeeping shared by every way a hand can end.
    fn conclude(&mut self, awards: &[PotAward], uncontested: bool) {
        let mut winners: Vec<Winner> = Vec::new();
        for w in awards.iter().flat_map(|a| a.winners.iter()) {
            match winners.iter_mut().find(|x| x.player_id == w.player_id) {
                Some(existing) => {
                    existing.amount += w.amount;
                    existing.category = existing.category.or(w.category);
                }
                None => winners.push(w.clone()),
            }
        }
        let summary: Vec<String> = winners
            .iter()
            .map(|w| {
                let name = &self.state.players[w.player_id].name;
                match w.category {
                    Some(c) => format!("{name} wins {} with {c}", w.amount),
                    None => format!("{name} wins {}", w.amount),
                }
            })
            .collect();

        self.state.round = Round::Showdown;
        self.state.message = summary.join(", ");
        if let Some(record) = self.record.as_mut() {
            record.board = self.state.community_cards.clone();
            record.result = Some(self.state.message.clone());
            if !uncontested {
                record.showdown = Some(ShowdownInfo {
                    winners: winners.iter().map(|w| w.player_id).collect(),
                    notes: winners
                        .iter()
                        .find_map(|w| w.category)
                        .map(|c| c.to_string()),
                });
            }
        }
        tracing::info!(
            hand = self.hand_count,
            uncontested,
            result = %self.state.message,
            "hand finished"
        );
        self.state.winners = Some(winners);
        if let Some(champion) = self.tournament_winner() {
            self.state.tournament_winner = Some(champion);
        }
    }

    fn end_tournament(&mut self, winner: usize) -> ActionResult {
        for p in self
            .state
            .players
            .iter_mut()
            .filter(|p| !p.is_eliminated() && p.chips == 0)
        {
            p.eliminate();
        }
        self.state.tournament_winner = Some(winner);
        self.state.game_ended = true;
        self.state.round = Round::Showdown;
        self.state.message = format!(
            "{} wins the tournament",
            self.state.players[winner].name
        );
        tracing::info!(winner, "tournament ended");
        ActionResult {
            success: true,
            message: self.state.message.clone(),
            state: self.state.snapshot(),
            log: vec![self.state.message.clone()],
            allowed_actions: Vec::new(),
            awards: Vec::new(),
            hand_complete: true,
        }
    }

    fn rejected(&self, rejection: Rejection) -> ActionResult {
        tracing::debug!(reason = %rejection.reason, "action rejected");
        ActionResult {
            success: false,
            message: rejection.reason,
            state: self.state.snapshot(),
            log: Vec::new(),
            allowed_actions: rejection.allowed_actions,
            awards: Vec::new(),
            hand_complete: self.is_hand_complete(),
        }
    }

    fn completed(&self, log: Vec<String>, awards: Vec<PotAward>) -> ActionResult {
        let message = log.last().cloned().unwrap_or_else(|| self.state.message.clone());
        ActionResult {
            success: true,
            message,
            state: self.state.snapshot(),
            log,
            allowed_actions: Vec::new(),
            awards,
            hand_complete: self.is_hand_complete(),
        }
    }
}
