//! Eval command: best five-card hand among 5 to 7 cards.

use crate::error::CliError;
use crate::formatters::format_board;
use crate::validation::{parse_cards, validate_card_count};
use holdem_engine::hand::evaluate_best_hand;
use std::io::Write;

pub fn handle_eval_command(codes: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(codes).map_err(CliError::InvalidInput)?;
    validate_card_count(cards.len(), 5..=7, "eval").map_err(CliError::InvalidInput)?;
    let hand = evaluate_best_hand(&cards)?;

    writeln!(out, "Cards: {}", format_board(&cards))?;
    writeln!(out, "Category: {}", hand.category)?;
    let tiebreaker: Vec<String> = hand.tiebreaker.iter().map(u8::to_string).collect();
    writeln!(out, "Tiebreaker: [{}]", tiebreaker.join(", "))?;
    Ok(())
}
