//! Parsing and validation of card codes given on the command line.
//!
//! Codes follow the engine's canonical form, rank symbol then suit name
//! (`AHEARTS`, `10SPADES`, `TCLUBS`), case-insensitive.

use holdem_engine::cards::Card;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Parses every code, rejecting malformed codes and repeated cards.
///
/// ```rust
/// # use holdem_cli::validation::parse_cards;
/// let cards = parse_cards(&["AHEARTS", "kspades"]).unwrap();
/// assert_eq!(cards.len(), 2);
///
/// assert!(parse_cards(&["AH"]).unwrap_err().contains("AH"));
/// assert!(parse_cards(&["AHEARTS", "ahearts"]).unwrap_err().contains("Duplicate"));
/// ```
pub fn parse_cards<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Card>, String> {
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.as_ref();
        let card = Card::from_code(code).ok_or_else(|| {
            format!(
                "Unrecognized card '{}'. Expected rank then suit, e.g. AHEARTS or 10SPADES",
                code
            )
        })?;
        if !seen.insert(card) {
            return Err(format!("Duplicate card: {}", card.code()));
        }
        cards.push(card);
    }
    Ok(cards)
}

/// Checks a card count against an inclusive range, naming the group in the error.
pub fn validate_card_count(
    count: usize,
    allowed: RangeInclusive<usize>,
    what: &str,
) -> Result<(), String> {
    if allowed.contains(&count) {
        return Ok(());
    }
    Err(format!(
        "{} needs {} to {} cards, got {}",
        what,
        allowed.start(),
        allowed.end(),
        count
    ))
}

/// Rejects cards shared between two groups, e.g. hole cards repeated on the board.
pub fn ensure_disjoint(a: &[Card], b: &[Card]) -> Result<(), String> {
    match a.iter().find(|c| b.contains(c)) {
        Some(card) => Err(format!("Duplicate card: {}", card.code())),
        None => Ok(()),
    }
}
