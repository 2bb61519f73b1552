//! Command handlers, one module per subcommand.
//!
//! Each handler writes results to `out`, diagnostics to `err`, and returns
//! `Result<(), CliError>` for `run` to turn into an exit code.

pub mod cfg;
pub mod deal;
pub mod equity;
pub mod eval;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use equity::handle_equity_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;
