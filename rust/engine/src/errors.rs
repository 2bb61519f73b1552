use thiserror::Error;

use crate::cards::Card;

/// Contract violations and resource exhaustion inside the engine.
///
/// These are never meant to be relayed to a player: they signal that the caller
/// misused the API (or, for [`GameError::EmptyDeck`], a bug). The operation that
/// returned one has not mutated any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Duplicate card in evaluation: {0}")]
    DuplicateCard(Card),
    #[error("Insufficient cards to evaluate: {0} (need at least 5)")]
    InsufficientCards(usize),
    #[error("Too many cards to evaluate: {0} (at most 7)")]
    TooManyCards(usize),
    #[error("Invalid community card count: {0} (expected 3 to 5)")]
    InvalidCommunityCards(usize),
    #[error("No contenders left for showdown")]
    NoContenders,
    #[error("Player {player_id} does not hold exactly 2 hole cards")]
    MissingHoleCards { player_id: usize },
    #[error("Betting round is not complete")]
    BettingNotComplete,
    #[error("At least 2 players with chips are required, found {0}")]
    NotEnoughPlayers(usize),
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
    #[error("No hand in progress")]
    HandNotInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

/// Reasons an action is rejected. Recoverable: relayed verbatim to the acting
/// player so they can retry with a legal action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("Player {0} is eliminated and cannot act")]
    PlayerEliminated(usize),
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Cannot check, {to_call} to call")]
    CheckFacingBet { to_call: u32 },
    #[error("Nothing to call")]
    NothingToCall,
    #[error("Invalid raise amount: {amount}, minimum: {minimum}")]
    RaiseBelowMinimum { amount: u32, minimum: u32 },
    #[error("Invalid raise amount: {amount}, maximum: {maximum}")]
    RaiseExceedsStack { amount: u32, maximum: u32 },
    #[error("{0} is not allowed right now")]
    NotAllowed(&'static str),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Unknown player {0}")]
    UnknownPlayer(usize),
}

/// Input validation failures of the equity simulator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EquityError {
    #[error("Exactly 2 hole cards required, got {0}")]
    HoleCards(usize),
    #[error("Between 3 and 5 community cards required, got {0}")]
    CommunityCards(usize),
    #[error("Duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("Too many opponents for one deck: {0}")]
    TooManyOpponents(usize),
}
