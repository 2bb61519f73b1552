//! Betting-round progression: completion detection, street advancement,
//! button rotation and the uncontested-win short-circuit.

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::GameState;
use crate::player::SeatRole;

/// Hand phases, strictly ordered. [`Round::Showdown`] is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Round {
    /// Before the first hand has been dealt
    PreRoundBetting,
    /// Hole cards dealt
    Preflop,
    /// 3 community cards
    Flop,
    /// 4th community card
    Turn,
    /// 5th community card
    River,
    /// Betting closed, hands are revealed
    CardReveal,
    Showdown,
}

impl Round {
    pub fn next(self) -> Round {
        match self {
            Round::PreRoundBetting => Round::Preflop,
            Round::Preflop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River => Round::CardReveal,
            Round::CardReveal | Round::Showdown => Round::Showdown,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Round::Preflop | Round::Flop | Round::Turn | Round::River
        )
    }
}

/// True when no further betting decision is pending on this street.
///
/// Either at most one player can still put chips in and they have acted, or
/// every player who can still act has acted and matched the highest bet.
/// All-in players never hold a street open.
pub fn is_betting_round_complete(state: &GameState) -> bool {
    if state.contender_count() <= 1 {
        return true;
    }
    let highest = state.highest_bet();
    let actors: Vec<_> = state.players.iter().filter(|p| p.can_act()).collect();
    match actors.as_slice() {
        [] => true,
        [only] => only.has_acted,
        _ => actors
            .iter()
            .all(|p| p.has_acted && p.current_bet == highest),
    }
}

/// Closes the current street and opens the next one, dealing community cards
/// for the flop, turn and river. Jumps straight to showdown when at most one
/// contender is left.
///
/// # Errors
///
/// [`GameError::BettingNotComplete`] while a decision is still pending;
/// [`GameError::HandNotInProgress`] outside of a hand. State is untouched on error.
pub fn advance_to_next_round(state: &mut GameState) -> Result<Vec<String>, GameError> {
    if matches!(state.round, Round::PreRoundBetting | Round::Showdown) {
        return Err(GameError::HandNotInProgress);
    }
    if !is_betting_round_complete(state) {
        return Err(GameError::BettingNotComplete);
    }

    let mut log = Vec::new();
    let next = if state.contender_count() <= 1 {
        Round::Showdown
    } else {
        state.round.next()
    };

    let dealt = match next {
        Round::Flop => state.deck.deal_flop()?.to_vec(),
        Round::Turn => vec![state.deck.deal_turn()?],
        Round::River => vec![state.deck.deal_river()?],
        _ => Vec::new(),
    };

    for p in state.players.iter_mut() {
        p.current_bet = 0;
        p.has_acted = false;
    }
    state.min_bet = state.big_blind;
    state.last_raise = state.big_blind;
    state.community_cards.extend_from_slice(&dealt);
    state.round = next;

    if next.is_betting() {
        let button = state
            .dealer_index
            .unwrap_or(state.players.len().saturating_sub(1));
        state.current_player_index = state
            .next_seat_after(button, |p| p.can_act())
            .or_else(|| state.next_seat_after(button, |p| p.is_contender()))
            .unwrap_or(state.current_player_index);
    }

    if dealt.is_empty() {
        log.push(format!("{next:?}"));
    } else {
        let cards: Vec<String> = dealt.iter().map(|c| c.to_string()).collect();
        log.push(format!("{next:?}: {}", cards.join(" ")));
    }
    state.message = log.join("; ");
    tracing::debug!(round = ?next, pot = state.pot, "round advanced");
    Ok(log)
}

/// Moves the button to the next seated player and assigns the blinds.
///
/// The first hand puts the button on the first seated player. Heads-up the
/// dealer posts the small blind; otherwise the two seats after the dealer post
/// small and big blind. Eliminated seats are skipped.
pub fn rotate_dealer_button(state: &mut GameState) -> Result<(), GameError> {
    let seated = state.seated_count();
    if seated < 2 {
        return Err(GameError::NotEnoughPlayers(seated));
    }
    let dealer = match state.dealer_index {
        Some(prev) => state.next_seat_after(prev, |p| !p.is_eliminated()),
        None => state.players.iter().position(|p| !p.is_eliminated()),
    }
    .ok_or(GameError::NotEnoughPlayers(seated))?;

    let small = if seated == 2 {
        dealer
    } else {
        state
            .next_seat_after(dealer, |p| !p.is_eliminated())
            .ok_or(GameError::NotEnoughPlayers(seated))?
    };
    let big = state
        .next_seat_after(small, |p| !p.is_eliminated())
        .ok_or(GameError::NotEnoughPlayers(seated))?;

    for p in state.players.iter_mut() {
        p.seat_role = SeatRole::None;
    }
    state.players[dealer].seat_role = SeatRole::Dealer;
    if small != dealer {
        state.players[small].seat_role = SeatRole::SmallBlind;
    }
    state.players[big].seat_role = SeatRole::BigBlind;
    state.dealer_index = Some(dealer);
    state.small_blind_index = Some(small);
    state.big_blind_index = Some(big);
    Ok(())
}

/// The sole remaining contender, if every other seat has folded or is eliminated.
pub fn check_automatic_win(state: &GameState) -> Option<usize> {
    let mut contenders = state.contenders();
    let first = contenders.next()?;
    match contenders.next() {
        None => Some(first.id),
        Some(_) => None,
    }
}
