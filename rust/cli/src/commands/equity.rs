//! Equity command: Monte Carlo estimate printed as a JSON report.

use crate::config::Config;
use crate::error::CliError;
use crate::validation::{ensure_disjoint, parse_cards};
use holdem_engine::equity::EquitySimulator;
use std::io::Write;

pub fn handle_equity_command(
    hole: &[String],
    board: &[String],
    opponents: usize,
    trials: Option<u32>,
    seed: Option<u64>,
    cfg: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hole = parse_cards(hole).map_err(CliError::InvalidInput)?;
    let board = parse_cards(board).map_err(CliError::InvalidInput)?;
    ensure_disjoint(&hole, &board).map_err(CliError::InvalidInput)?;

    let trials = trials.unwrap_or(cfg.trials);
    if trials == 0 {
        return Err(CliError::InvalidInput("trials must be >= 1".into()));
    }
    let mut simulator = match seed.or(cfg.seed) {
        Some(seed) => EquitySimulator::with_seed(seed),
        None => EquitySimulator::new(),
    }
    .with_trials(trials);
    let report = simulator.estimate(&hole, &board, opponents)?;

    let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
