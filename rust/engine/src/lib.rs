//! # holdem-engine: Texas Hold'em Table Engine
//!
//! Server-side No-Limit Texas Hold'em for 2 to 10 seats. Owns the deck, the
//! betting rules, side pots and showdown, and runs a table from the first deal
//! until one player holds every chip. A Monte Carlo equity simulator answers
//! "how likely am I to win" queries without touching table state.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text codes
//! - [`deck`] - Seedable shuffling and street dealing with burns
//! - [`hand`] - 5-card evaluation, best-of-7 search and showdown
//! - [`player`] - Seat state, actions and chip commitment
//! - [`betting`] - Action validation and application
//! - [`round`] - Street progression, button rotation, uncontested wins
//! - [`pot`] - Main/side pot construction and exact distribution
//! - [`game`] - Table state and serializable snapshots
//! - [`engine`] - Hand orchestration and tournament lifecycle
//! - [`equity`] - Monte Carlo win/tie/lose estimation
//! - [`room`] - Thread-safe rooms with staleness-checked equity jobs
//! - [`logger`] - HandRecord JSONL journal
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{evaluate_best_hand, Category};
//!
//! let cards: Vec<Card> = ["AHEARTS", "KHEARTS", "QHEARTS", "JHEARTS", "10HEARTS", "2CLUBS", "3DIAMONDS"]
//!     .iter()
//!     .filter_map(|c| Card::from_code(c))
//!     .collect();
//!
//! let best = evaluate_best_hand(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Tables
//!
//! Every shuffle of a seeded table is reproducible:
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::TableConfig;
//!
//! let mut a = Engine::with_seed(&["p0", "p1", "p2"], TableConfig::default(), 7).unwrap();
//! let mut b = Engine::with_seed(&["p0", "p1", "p2"], TableConfig::default(), 7).unwrap();
//! a.start_new_hand().unwrap();
//! b.start_new_hand().unwrap();
//! assert_eq!(a.game_state(), b.game_state());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod room;
pub mod round;
