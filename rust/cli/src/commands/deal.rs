//! Deal command: starts one hand and shows the table as dealt.
//!
//! The seed is always printed so a hand can be dealt again exactly.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_role};
use holdem_engine::engine::{Engine, MAX_PLAYERS};
use std::io::Write;

/// Seat names `P1..Pn`, shared by every command that builds a table.
pub(crate) fn seat_names(seats: usize) -> Vec<String> {
    (1..=seats).map(|i| format!("P{}", i)).collect()
}

pub(crate) fn check_seats(seats: usize) -> Result<(), CliError> {
    if (2..=MAX_PLAYERS).contains(&seats) {
        Ok(())
    } else {
        Err(CliError::InvalidInput(format!(
            "seats must be between 2 and {}, got {}",
            MAX_PLAYERS, seats
        )))
    }
}

/// Deals a single hand. `seed` and `seats` fall back to the configuration.
pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<usize>,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(cfg.seats);
    check_seats(seats)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut engine = Engine::with_seed(&seat_names(seats), cfg.table(), seed)?;
    engine.start_new_hand()?;
    let state = engine.state();
    let heads_up = state.seated_count() == 2;

    writeln!(out, "Hand #{} (seed {})", engine.hand_count(), seed)?;
    for p in &state.players {
        writeln!(
            out,
            "Seat {}: {:<4} {:<5} stack {:>6}  bet {:>5}  {}",
            p.id,
            p.name,
            format_role(p.seat_role, heads_up),
            p.chips,
            p.current_bet,
            format_board(&p.hand)
        )?;
    }
    writeln!(out, "Pot: {}", state.pot)?;
    match engine.current_player() {
        Some(seat) => writeln!(out, "To act: {}", state.players[seat].name)?,
        None => writeln!(out, "Board: {}", format_board(&state.community_cards))?,
    }
    Ok(())
}
