//! Match engine errors.
//!
//! Every error is recoverable: the caller surfaces it and re-invokes the
//! failed step with corrected input.

use crate::game::setup::Side;

/// Team selection errors raised at configure time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    /// No team selected for a side.
    #[error("no team selected for {0}")]
    Unset(Side),

    /// Both sides picked the same team.
    #[error("both sides selected {0}")]
    Duplicate(String),

    /// Team is not in the catalog.
    #[error("unknown team: {0}")]
    Unknown(String),

    /// Lineup does not hold exactly eleven players.
    #[error("lineup for {team} has {count} players, expected {expected}")]
    BadLineup {
        /// Team name.
        team: String,
        /// Players supplied.
        count: usize,
        /// Required lineup size.
        expected: usize,
    },

    /// Catalog holds fewer than two teams.
    #[error("catalog needs at least two teams, found {0}")]
    CatalogTooSmall(usize),
}

/// Match controller errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Unset, duplicate or unknown team selection.
    #[error("invalid teams: {0}")]
    InvalidTeams(#[from] TeamError),

    /// Ball number outside 1..=6.
    #[error("invalid input: {value} is not between 1 and 6")]
    InvalidInput {
        /// Rejected value.
        value: i32,
    },

    /// Operation called before its required predecessor.
    #[error("illegal transition: {operation} not allowed while {phase}")]
    IllegalTransition {
        /// Operation the caller attempted.
        operation: &'static str,
        /// Phase the match was in.
        phase: String,
    },

    /// Recorded match could not be encoded or decoded.
    #[error("replay error: {0}")]
    Replay(String),
}

/// Result alias for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
