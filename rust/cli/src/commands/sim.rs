//! Simulation command: plays hands with a random legal-action policy.
//!
//! Every hand is checked for chip conservation once it completes. With
//! `--output` the engine's hand record is appended to a JSONL journal.
//!
//! ## Environment Variables
//!
//! - `HOLDEM_SIM_BREAK_AFTER`: stop after N hands as if interrupted (exit 130)

use crate::commands::deal::{check_seats, seat_names};
use crate::config::Config;
use crate::error::{BatchValidationError, CliError};
use crate::formatters::format_action;
use crate::ui;
use holdem_engine::betting::minimum_raise;
use holdem_engine::engine::Engine;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::{Action, ActionKind, PlayerAction};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;

/// Picks uniformly among the allowed kinds; raises pick a uniform legal size.
fn choose_action(
    engine: &Engine,
    seat: usize,
    rng: &mut ChaCha20Rng,
) -> Result<PlayerAction, CliError> {
    let allowed = engine
        .allowed_actions(seat)
        .map_err(|e| CliError::Engine(e.to_string()))?;
    if allowed.is_empty() {
        return Err(CliError::Engine(format!("seat {} has no legal action", seat)));
    }
    let action = match allowed[rng.random_range(0..allowed.len())] {
        ActionKind::Fold => PlayerAction::Fold,
        ActionKind::Check => PlayerAction::Check,
        ActionKind::Call => PlayerAction::Call,
        ActionKind::AllIn => PlayerAction::AllIn,
        ActionKind::Raise => {
            let state = engine.state();
            let p = &state.players[seat];
            let min = minimum_raise(state);
            let max = p.chips + p.current_bet;
            PlayerAction::Raise(rng.random_range(min..=max.max(min)))
        }
    };
    Ok(action)
}

/// Runs `hands` hands on one table. Stops early when a single player holds
/// every chip.
pub fn handle_sim_command(
    hands: u64,
    seed: Option<u64>,
    seats: Option<usize>,
    output: Option<String>,
    cfg: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        ui::write_error(err, "hands must be >= 1")?;
        return Err(CliError::InvalidInput("hands must be >= 1".into()));
    }
    let seats = seats.unwrap_or(cfg.seats);
    check_seats(seats)?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut engine = Engine::with_seed(&seat_names(seats), cfg.table(), seed)?;
    let mut policy = ChaCha20Rng::seed_from_u64(seed.wrapping_add(1));
    let mut journal = match output.as_deref().map(HandLogger::create).transpose() {
        Ok(journal) => journal,
        Err(e) => {
            ui::write_error(err, &format!("Failed to open output file: {}", e))?;
            return Err(CliError::Io(e));
        }
    };
    let break_after = std::env::var("HOLDEM_SIM_BREAK_AFTER")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let expected = engine.state().total_chips();
    let mut violations: Vec<BatchValidationError<String>> = Vec::new();
    let mut played = 0u64;

    writeln!(out, "Seed: {}", seed)?;
    while played < hands {
        let started = engine.start_new_hand()?;
        if engine.state().game_ended {
            writeln!(out, "{}", started.message)?;
            ui::display_warning(
                err,
                &format!("tournament ended after {} of {} hands", played, hands),
            )?;
            break;
        }
        while let Some(seat) = engine.current_player() {
            let action = choose_action(&engine, seat, &mut policy)?;
            tracing::trace!(seat, action = %format_action(&action), "policy chose");
            let res = engine.process_action(Action::new(seat, action))?;
            if !res.success {
                return Err(CliError::Engine(res.message));
            }
        }
        played += 1;

        let hand_id = engine
            .hand_record()
            .map(|r| r.hand_id.clone())
            .unwrap_or_else(|| played.to_string());
        let state = engine.state();
        if state.pot != 0 || state.total_chips() != expected {
            tracing::warn!(hand = %hand_id, pot = state.pot, "chip conservation violated");
            violations.push(BatchValidationError {
                item_context: hand_id,
                message: format!(
                    "chips {} with {} left in the pot, expected {}",
                    state.total_chips(),
                    state.pot,
                    expected
                ),
            });
        }
        if let (Some(journal), Some(record)) = (journal.as_mut(), engine.hand_record()) {
            journal.write(record)?;
        }

        if break_after == Some(played) {
            writeln!(err, "Interrupted after {} hands", played)?;
            return Err(CliError::Interrupted(format!(
                "stopped after {} of {} hands",
                played, hands
            )));
        }
    }

    tracing::info!(played, seed, seats, "simulation finished");
    writeln!(out, "Hands played: {}", played)?;
    for p in &engine.state().players {
        writeln!(out, "{}: {}", p.name, p.chips)?;
    }
    if let Some(winner) = engine.tournament_winner() {
        writeln!(out, "Winner: {}", engine.state().players[winner].name)?;
    }
    if let (Some(journal), Some(path)) = (&journal, &output) {
        writeln!(out, "Journal: {} hands written to {}", journal.written(), path)?;
    }

    if violations.is_empty() {
        writeln!(out, "Chip conservation: ok")?;
        return Ok(());
    }
    for v in &violations {
        ui::write_error(err, &v.to_string())?;
    }
    Err(CliError::Engine(format!(
        "chip conservation violated in {} hands",
        violations.len()
    )))
}
