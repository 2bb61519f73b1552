use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Category;
use crate::player::{Player, SeatRole, STARTING_STACK};
use crate::round::Round;

/// Stakes and starting stacks for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_chips: STARTING_STACK,
            small_blind: 10,
            big_blind: 20,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_chips == 0 {
            return Err(GameError::InvalidConfig(
                "starting_chips must be >0".into(),
            ));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::InvalidConfig("blinds must be >0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        Ok(())
    }
}

/// Chips awarded to one player out of one pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: usize,
    pub amount: u32,
    /// Winning category, absent when the pot was uncontested
    pub category: Option<Category>,
}

/// Whole-table state for one room. Created once and mutated in place across hands.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seat order is fixed at creation
    pub players: Vec<Player>,
    pub deck: Deck,
    pub pot: u32,
    pub community_cards: Vec<Card>,
    pub current_player_index: usize,
    pub round: Round,
    pub big_blind: u32,
    pub small_blind: u32,
    /// Current street bet level a raise must build on
    pub min_bet: u32,
    /// Size of the last full increment, the minimum next increment
    pub last_raise: u32,
    pub message: String,
    pub winners: Option<Vec<Winner>>,
    pub tournament_winner: Option<usize>,
    pub game_ended: bool,
    pub dealer_index: Option<usize>,
    pub small_blind_index: Option<usize>,
    pub big_blind_index: Option<usize>,
}

impl GameState {
    pub fn new<S: AsRef<str>>(names: &[S], config: TableConfig) -> Self {
        let players = names
            .iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name.as_ref(), config.starting_chips))
            .collect();
        Self {
            players,
            deck: Deck::new(),
            pot: 0,
            community_cards: Vec::with_capacity(5),
            current_player_index: 0,
            round: Round::PreRoundBetting,
            big_blind: config.big_blind,
            small_blind: config.small_blind,
            min_bet: config.big_blind,
            last_raise: config.big_blind,
            message: String::new(),
            winners: None,
            tournament_winner: None,
            game_ended: false,
            dealer_index: None,
            small_blind_index: None,
            big_blind_index: None,
        }
    }

    pub fn player(&self, id: usize) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::UnknownPlayer(id))
    }

    /// Highest street bet among non-folded players.
    pub fn highest_bet(&self) -> u32 {
        self.players
            .iter()
            .filter(|p| p.is_contender())
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(0)
    }

    /// Non-folded, non-eliminated seats.
    pub fn contenders(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_contender())
    }

    pub fn contender_count(&self) -> usize {
        self.contenders().count()
    }

    pub fn seated_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_eliminated()).count()
    }

    /// First seat strictly after `from` (wrapping) that satisfies `pred`.
    pub fn next_seat_after(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&i| pred(&self.players[i]))
    }

    /// Chips on the table plus in stacks. Constant within a hand.
    pub fn total_chips(&self) -> u64 {
        self.pot as u64 + self.players.iter().map(|p| p.chips as u64).sum::<u64>()
    }

    /// Immutable copy for persistence and transport. The deck is never exposed.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.iter().map(PlayerSnapshot::from).collect(),
            pot: self.pot,
            community_cards: self.community_cards.clone(),
            current_player_index: self.current_player_index,
            round: self.round,
            big_blind: self.big_blind,
            small_blind: self.small_blind,
            min_bet: self.min_bet,
            last_raise: self.last_raise,
            message: self.message.clone(),
            winners: self.winners.clone(),
            tournament_winner: self.tournament_winner,
            game_ended: self.game_ended,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: usize,
    pub name: String,
    pub hand: Vec<Card>,
    pub chips: u32,
    pub current_bet: u32,
    pub total_bet: u32,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub has_acted: bool,
    pub seat_role: SeatRole,
    pub eliminated: bool,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            hand: p.hand.clone(),
            chips: p.chips,
            current_bet: p.current_bet,
            total_bet: p.total_bet,
            is_folded: p.is_folded,
            is_all_in: p.is_all_in,
            has_acted: p.has_acted,
            seat_role: p.seat_role,
            eliminated: p.is_eliminated(),
        }
    }
}

/// Serializable view of [`GameState`] handed to persistence and transport layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub pot: u32,
    pub community_cards: Vec<Card>,
    pub current_player_index: usize,
    pub round: Round,
    pub big_blind: u32,
    pub small_blind: u32,
    pub min_bet: u32,
    pub last_raise: u32,
    pub message: String,
    pub winners: Option<Vec<Winner>>,
    pub tournament_winner: Option<usize>,
    pub game_ended: bool,
}
