use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Positional marker for the current hand.
/// In heads-up play the dealer also posts the small blind and no seat holds
/// [`SeatRole::SmallBlind`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum SeatRole {
    #[default]
    None,
    Dealer,
    SmallBlind,
    BigBlind,
}

/// Cross-hand status. Elimination is permanent: an eliminated player watches,
/// never receives cards and never acts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    Active,
    Eliminated,
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Raise the street bet to the given total
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// Action type without its amount, as listed in allowed-action sets.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Fold => "Fold",
            ActionKind::Check => "Check",
            ActionKind::Call => "Call",
            ActionKind::Raise => "Raise",
            ActionKind::AllIn => "AllIn",
        }
    }
}

/// An action submitted on behalf of a seat.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub player_id: usize,
    pub action: PlayerAction,
}

impl Action {
    pub fn new(player_id: usize, action: PlayerAction) -> Self {
        Self { player_id, action }
    }
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// A seat at the table: chips, hole cards and the per-street/per-hand betting flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat index, fixed at table creation
    pub id: usize,
    pub name: String,
    /// Hole cards (0 or 2)
    pub hand: Vec<Card>,
    pub chips: u32,
    /// Chips committed on the current street
    pub current_bet: u32,
    /// Chips committed over the whole hand
    pub total_bet: u32,
    pub is_folded: bool,
    pub is_all_in: bool,
    pub has_acted: bool,
    pub seat_role: SeatRole,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(id: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::with_capacity(2),
            chips,
            current_bet: 0,
            total_bet: 0,
            is_folded: false,
            is_all_in: false,
            has_acted: false,
            seat_role: SeatRole::None,
            status: PlayerStatus::Active,
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.status == PlayerStatus::Eliminated
    }

    /// Still contesting the pot: seated, not eliminated, not folded.
    pub fn is_contender(&self) -> bool {
        !self.is_eliminated() && !self.is_folded
    }

    /// Contender who can still put chips in.
    pub fn can_act(&self) -> bool {
        self.is_contender() && !self.is_all_in
    }

    /// Permanently converts the seat into a spectator.
    pub fn eliminate(&mut self) {
        self.status = PlayerStatus::Eliminated;
        self.seat_role = SeatRole::None;
        self.hand.clear();
        self.current_bet = 0;
        self.total_bet = 0;
        self.is_folded = true;
        self.is_all_in = false;
        self.has_acted = false;
    }

    pub fn reset_for_hand(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
        self.total_bet = 0;
        self.is_folded = false;
        self.is_all_in = false;
        self.has_acted = false;
        self.seat_role = SeatRole::None;
    }

    /// Moves up to `amount` chips from the stack onto the table and returns how
    /// many were actually committed. Marks the player all-in when the stack empties.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.chips == 0 && paid > 0 {
            self.is_all_in = true;
        }
        paid
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }
}
