//! # Hand Cricket
//!
//! Match engine for two-innings hand cricket: a coin toss, a bat/bowl choice,
//! then balls resolved from two numbers in 1..=6 until each innings ends.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HAND CRICKET                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── rng.rs       - Injectable random source, Xorshift128+   │
//! │  └── hash.rs      - State hashing for verification           │
//! │                                                              │
//! │  game/            - Match logic (deterministic)              │
//! │  ├── team.rs      - Team catalog and lineups                 │
//! │  ├── setup.rs     - Mode, sides, match configuration         │
//! │  ├── toss.rs      - Coin toss and batting order              │
//! │  ├── innings.rs   - Ball resolution and scoring              │
//! │  ├── state.rs     - Phase, match state, outcome              │
//! │  ├── controller.rs- Phase-checked match operations           │
//! │  ├── events.rs    - Match events                             │
//! │  └── replay.rs    - Input recording and replay               │
//! │                                                              │
//! │  config.rs        - Binary configuration                     │
//! │  error.rs         - Error types                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules never touch the clock or thread-local
//! randomness. The coin toss and every computer-drawn number come from the
//! [`RandomSource`] handed to [`MatchController`], so a recorded match
//! replays to the same state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod error;
pub mod config;

// Re-export commonly used types
pub use core::rng::{DeterministicRng, RandomSource, ScriptedRandom};
pub use error::{MatchError, MatchResult, TeamError};
pub use game::controller::MatchController;
pub use game::setup::{GameMode, PlayerNames, Side};
pub use game::state::{MatchPhase, MatchState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Players per lineup
pub const SQUAD_SIZE: usize = 11;

/// Wickets that close an innings
pub const MAX_WICKETS: u8 = 10;

/// Lowest legal ball number
pub const MIN_SHOT: u8 = 1;

/// Highest legal ball number
pub const MAX_SHOT: u8 = 6;
