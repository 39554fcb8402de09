//! Match Logic Module
//!
//! Everything that decides a match. Deterministic given the random source.
//!
//! ## Module Structure
//!
//! - `team`: Team catalog and lineups
//! - `setup`: Game mode, sides, match configuration
//! - `toss`: Coin toss and batting-order choice
//! - `innings`: Ball resolution and per-innings scoring
//! - `state`: Match phase, aggregate state, outcome
//! - `controller`: Phase-checked operations over the state
//! - `events`: Match events for presentation and replay
//! - `replay`: Input recording and deterministic replay

pub mod team;
pub mod setup;
pub mod toss;
pub mod innings;
pub mod state;
pub mod controller;
pub mod events;
pub mod replay;

// Re-export key types
pub use team::{Lineup, Team, TeamCatalog};
pub use setup::{GameMode, MatchConfig, PlayerNames, Side};
pub use toss::{BattingChoice, CoinFace, InningsChoice, TossOutcome};
pub use innings::{BallOutcome, BallResult, Innings, InningsState, Scoreboard, Shot};
pub use state::{Margin, MatchOutcome, MatchPhase, MatchState, Winner};
pub use controller::MatchController;
pub use events::{GameEvent, GameEventData};
pub use replay::{replay_match, MatchRecord, RecordedStep};
