//! holdem-engine: deterministic no-limit Texas Hold'em hand engine
//!
//! Goals:
//! - Reproducible hands: a seeded generator shuffles, so seed + actions fix every card
//! - Exact side-pot accounting and showdown tie-breaks
//! - No panics for invalid input; rejected actions leave the table untouched
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::table::{PhaseTag, PlayerAction, Table};
//!
//! let mut table = Table::new(TableConfig::new(3, 1000, 5, 10).with_seed(42)).unwrap();
//! table.start_hand().unwrap();
//! table.deal_cards().unwrap();
//! while let Some(seat) = table.action_on() {
//!     let legal = table.legal_actions(seat);
//!     let action = if legal.can_check { PlayerAction::Check } else { PlayerAction::Call };
//!     table.act(seat, action).unwrap();
//! }
//! table.to_showdown().unwrap();
//! assert_eq!(table.phase_tag(), PhaseTag::Complete);
//! assert_eq!(table.board().len(), 5);
//! assert_eq!(table.total_chips(), 3000);
//! ```
//!
//! ## Evaluate a Hold'em hand
//! ```
//! use holdem_engine::evaluator::{evaluate_holdem, Category};
//! use holdem_engine::hand::{Board, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Simulation
//! Play seeded hands between random agents with:
//! ```sh
//! cargo run --bin holdem-sim -- table.json
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod pot;
pub mod rng;
pub mod showdown;
pub mod snapshot;
pub mod table;
pub mod variants;

pub use error::{EngineError, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
