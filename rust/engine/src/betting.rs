use serde::Serialize;

use crate::errors::ActionError;
use crate::game::GameState;
use crate::player::{Action, ActionKind, PlayerAction as A};

/// An action that passed validation, with chip amounts resolved against the
/// acting player's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips to move, capped at the stack
    Call(u32),
    /// New street bet total
    Raise(u32),
    /// New street bet total after shoving the whole stack
    AllIn(u32),
}

/// Structured rejection relayed to the acting player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub valid: bool,
    pub reason: String,
    pub allowed_actions: Vec<ActionKind>,
    #[serde(skip)]
    pub error: ActionError,
}

impl Rejection {
    pub fn new(error: ActionError, allowed_actions: Vec<ActionKind>) -> Self {
        Self {
            valid: false,
            reason: error.to_string(),
            allowed_actions,
            error,
        }
    }
}

/// Chips the player still has to put in to match the highest bet.
pub fn call_amount(state: &GameState, player_id: usize) -> u32 {
    let current = state
        .players
        .get(player_id)
        .map(|p| p.current_bet)
        .unwrap_or(0);
    state.highest_bet().saturating_sub(current)
}

/// Smallest legal raise-to total: highest bet plus the last raise increment.
pub fn minimum_raise(state: &GameState) -> u32 {
    state.highest_bet() + state.last_raise
}

/// Legal action kinds for a seat right now.
///
/// # Errors
///
/// [`ActionError::PlayerAlreadyFolded`] for a folded player; eliminated seats get
/// an empty set instead.
pub fn allowed_actions(state: &GameState, player_id: usize) -> Result<Vec<ActionKind>, ActionError> {
    let p = state
        .players
        .get(player_id)
        .ok_or(ActionError::UnknownPlayer(player_id))?;
    if p.is_eliminated() {
        return Ok(Vec::new());
    }
    if p.is_folded {
        return Err(ActionError::PlayerAlreadyFolded);
    }
    if p.is_all_in {
        return Ok(vec![ActionKind::Fold, ActionKind::Check]);
    }
    if p.chips == 0 {
        return Ok(vec![ActionKind::Fold]);
    }
    let mut kinds = vec![ActionKind::Fold];
    if call_amount(state, player_id) == 0 {
        kinds.push(ActionKind::Check);
    } else {
        kinds.push(ActionKind::Call);
    }
    if p.chips + p.current_bet >= minimum_raise(state) {
        kinds.push(ActionKind::Raise);
    }
    kinds.push(ActionKind::AllIn);
    Ok(kinds)
}

/// Validates an action against the betting rules without touching state.
///
/// # Examples
///
/// ```
/// use holdem_engine::betting::{validate_action, ValidatedAction};
/// use holdem_engine::game::{GameState, TableConfig};
/// use holdem_engine::player::{Action, PlayerAction};
///
/// let mut state = GameState::new(&["a", "b"], TableConfig::default());
/// state.players[1].commit(20);
/// state.pot = 20;
///
/// // facing 20, player 0 may call but not check
/// assert_eq!(
///     validate_action(&state, &Action::new(0, PlayerAction::Call)),
///     Ok(ValidatedAction::Call(20))
/// );
/// assert!(validate_action(&state, &Action::new(0, PlayerAction::Check)).is_err());
/// ```
pub fn validate_action(state: &GameState, action: &Action) -> Result<ValidatedAction, Rejection> {
    let id = action.player_id;
    let allowed = match allowed_actions(state, id) {
        Ok(kinds) => kinds,
        Err(e) => return Err(Rejection::new(e, Vec::new())),
    };
    let reject = |e: ActionError| Err(Rejection::new(e, allowed.clone()));
    // index is valid: allowed_actions checked it
    let p = &state.players[id];
    if p.is_eliminated() {
        return reject(ActionError::PlayerEliminated(id));
    }
    let to_call = call_amount(state, id);

    match action.action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if p.is_all_in || to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                reject(ActionError::CheckFacingBet { to_call })
            }
        }
        A::Call => {
            if !allowed.contains(&ActionKind::Call) {
                if to_call == 0 {
                    return reject(ActionError::NothingToCall);
                }
                return reject(ActionError::NotAllowed(ActionKind::Call.name()));
            }
            Ok(ValidatedAction::Call(to_call.min(p.chips)))
        }
        A::Raise(amount) => {
            let maximum = p.chips + p.current_bet;
            let minimum = minimum_raise(state);
            if p.is_all_in || p.chips == 0 {
                return reject(ActionError::NotAllowed(ActionKind::Raise.name()));
            }
            if amount > maximum {
                return reject(ActionError::RaiseExceedsStack { amount, maximum });
            }
            if amount < minimum {
                return reject(ActionError::RaiseBelowMinimum { amount, minimum });
            }
            Ok(ValidatedAction::Raise(amount))
        }
        A::AllIn => {
            if !allowed.contains(&ActionKind::AllIn) {
                return reject(ActionError::NotAllowed(ActionKind::AllIn.name()));
            }
            Ok(ValidatedAction::AllIn(p.chips + p.current_bet))
        }
    }
}

/// Applies a validated action and returns log lines describing its effects.
///
/// A raise or all-in above the previous highest bet reopens the action: every
/// other player who can still act must respond again.
pub fn apply_action(state: &mut GameState, player_id: usize, action: ValidatedAction) -> Vec<String> {
    let highest = state.highest_bet();
    let mut log = Vec::new();
    let Some(p) = state.players.get_mut(player_id) else {
        return log;
    };
    let name = p.name.clone();
    match action {
        ValidatedAction::Fold => {
            p.is_folded = true;
            p.has_acted = true;
            log.push(format!("{name} folds"));
        }
        ValidatedAction::Check => {
            p.has_acted = true;
            log.push(format!("{name} checks"));
        }
        ValidatedAction::Call(amount) => {
            let paid = p.commit(amount);
            p.has_acted = true;
            state.pot += paid;
            log.push(format!("{name} calls {paid}"));
        }
        ValidatedAction::Raise(to) | ValidatedAction::AllIn(to) => {
            let paid = p.commit(to.saturating_sub(p.current_bet));
            let new_bet = p.current_bet;
            p.has_acted = true;
            state.pot += paid;
            if matches!(action, ValidatedAction::AllIn(_)) {
                log.push(format!("{name} goes all-in for {new_bet}"));
            } else {
                log.push(format!("{name} raises to {new_bet}"));
            }
            if new_bet > highest {
                state.min_bet = new_bet;
                state.last_raise = new_bet - highest;
                for other in state.players.iter_mut() {
                    if other.id != player_id && other.can_act() {
                        other.has_acted = false;
                    }
                }
            }
        }
    }
    if let Some(line) = log.last() {
        state.message = line.clone();
    }
    tracing::debug!(player_id, pot = state.pot, ?action, "action applied");
    log
}
