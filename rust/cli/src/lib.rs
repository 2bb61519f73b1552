//! # Holdem CLI Library
//!
//! Command-line front end for the `holdem_engine` crate: deal a hand, run
//! seeded simulations, evaluate hands and estimate equity.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, resolves configuration and dispatches to a
//! command handler. Output streams are injected so tests can capture them.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--hands", "100", "--seed", "7"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one hand for inspection
//! - `sim`: Play hands with a random policy and check chip conservation
//! - `eval`: Evaluate 5 to 7 cards
//! - `equity`: Monte Carlo equity of two hole cards on a board
//! - `cfg`: Display resolved configuration settings
//!
//! ## Configuration
//!
//! Defaults, then a TOML file named by `HOLDEM_CONFIG`, then `HOLDEM_SEED`,
//! `HOLDEM_SEATS`, `HOLDEM_STARTING_CHIPS`, `HOLDEM_SMALL_BLIND`,
//! `HOLDEM_BIG_BLIND` and `HOLDEM_TRIALS`. Command-line flags win over all.

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_equity_command, handle_eval_command,
    handle_sim_command,
};

pub use error::{BatchValidationError, CliError};
pub use logging::init_logging;

const COMMANDS: &[&str] = &["deal", "sim", "eval", "equity", "cfg"];

fn load_config() -> Result<config::Config, CliError> {
    config::load().map_err(CliError::from)
}

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` for interruptions
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = holdem_cli::run(["holdem", "deal", "--seed", "42"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Pot: "));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            let _ = writeln!(err, "{}", e).and_then(|_| ui::write_usage(err, COMMANDS));
            return exit_code::ERROR;
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Deal { seed, seats } => {
            load_config().and_then(|cfg| handle_deal_command(seed, seats, &cfg, out))
        }
        Commands::Sim {
            hands,
            seed,
            seats,
            output,
        } => load_config()
            .and_then(|cfg| handle_sim_command(hands, seed, seats, output, &cfg, out, err)),
        Commands::Equity {
            hole,
            board,
            opponents,
            trials,
            seed,
        } => load_config().and_then(|cfg| {
            handle_equity_command(&hole, &board, opponents, trials, seed, &cfg, out)
        }),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e @ CliError::Interrupted(_)) => exit_code::for_error(&e),
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::for_error(&e)
        }
    }
}
