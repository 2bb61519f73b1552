//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    author,
    version,
    about = "Texas Hold'em engine: deal, simulate, evaluate and estimate equity"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand and show seats, blinds and hole cards
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of seats (2-10)
        #[arg(long)]
        seats: Option<usize>,
    },
    /// Play hands with a random legal-action policy and check chip conservation
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        seats: Option<usize>,
        /// Append one JSON hand record per line to this file
        #[arg(long)]
        output: Option<String>,
    },
    /// Evaluate the best five-card hand among 5 to 7 cards
    Eval {
        /// Card codes such as AHEARTS or 10SPADES
        #[arg(required = true)]
        cards: Vec<String>,
    },
    /// Monte Carlo win/tie/lose estimate for two hole cards on a board
    Equity {
        #[arg(long, num_args = 2, required = true)]
        hole: Vec<String>,
        #[arg(long, num_args = 3..=5, required = true)]
        board: Vec<String>,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long)]
        trials: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
