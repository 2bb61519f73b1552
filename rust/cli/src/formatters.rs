//! Card, board, seat and action formatters for terminal display.
//!
//! Pure functions over engine types. Suits render as ♥ ♦ ♣ ♠ where the
//! terminal is known to handle Unicode, and as h d c s otherwise.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert!(format_board(&[ace]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::player::{PlayerAction, SeatRole};

/// Windows consoles only get symbols inside terminals known to render them.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single-character rank, with `T` for ten so columns stay aligned.
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ten => "T".to_string(),
        other => other.symbol().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Bracketed, space separated: `[A♠ K♥ Q♦]`, or `[]` for no cards.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Seat marker shown next to a player; heads-up the dealer also posts the
/// small blind, so the big blind index decides nothing here.
pub fn format_role(role: SeatRole, heads_up: bool) -> &'static str {
    match role {
        SeatRole::Dealer if heads_up => "D/SB",
        SeatRole::Dealer => "D",
        SeatRole::SmallBlind => "SB",
        SeatRole::BigBlind => "BB",
        SeatRole::None => "",
    }
}

pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Raise(to) => format!("raise to {}", to),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}
