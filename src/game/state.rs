//! Match State Definitions
//!
//! The whole mutable state of one match, owned by the controller.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::game::innings::{Innings, InningsState};
use crate::game::setup::{GameMode, MatchConfig, Side};
use crate::game::toss::{BattingChoice, CoinFace, InningsChoice, TossOutcome};
use crate::MAX_WICKETS;

// =============================================================================
// MATCH PHASE
// =============================================================================

/// Where the match is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum MatchPhase {
    /// No teams selected yet
    #[default]
    Unconfigured,
    /// Configured, waiting for player 1's call
    TossPending,
    /// Toss decided, waiting for the winner's bat/bowl choice
    BattingOrderPending,
    /// Balls being bowled
    InningsInProgress(Innings),
    /// Both innings closed, winner decided
    Complete,
}

impl MatchPhase {
    fn code(self) -> u8 {
        match self {
            MatchPhase::Unconfigured => 0,
            MatchPhase::TossPending => 1,
            MatchPhase::BattingOrderPending => 2,
            MatchPhase::InningsInProgress(Innings::First) => 3,
            MatchPhase::InningsInProgress(Innings::Second) => 4,
            MatchPhase::Complete => 5,
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPhase::Unconfigured => write!(f, "unconfigured"),
            MatchPhase::TossPending => write!(f, "waiting for toss"),
            MatchPhase::BattingOrderPending => write!(f, "waiting for batting order"),
            MatchPhase::InningsInProgress(innings) => write!(f, "{} in progress", innings),
            MatchPhase::Complete => write!(f, "match complete"),
        }
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Final result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// One side has the higher total.
    Side(Side),
    /// Equal totals.
    Tie,
}

/// How decisively the match was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Margin {
    /// Side batting first defended its total.
    Runs(u32),
    /// Side batting second chased with wickets in hand.
    Wickets(u8),
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Runs(1) => write!(f, "by 1 run"),
            Margin::Runs(n) => write!(f, "by {} runs", n),
            Margin::Wickets(1) => write!(f, "by 1 wicket"),
            Margin::Wickets(n) => write!(f, "by {} wickets", n),
        }
    }
}

/// Outcome recorded when the match turns terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Winner by aggregate comparison.
    pub winner: Winner,
    /// Margin, absent on a tie.
    pub margin: Option<Margin>,
    /// Player 1's total.
    pub player1_score: u32,
    /// Player 2's total.
    pub player2_score: u32,
}

impl MatchOutcome {
    /// Decide the winner by comparing the two sides' totals.
    ///
    /// Strictly greater wins; equal is a tie. The second innings closes the
    /// moment the chaser passes the first-innings total, so a higher
    /// aggregate for the chaser always coincides with a successful chase.
    pub fn decide(first: &InningsState, second: &InningsState) -> Self {
        let (player1_score, player2_score) = match first.batting {
            Side::Player1 => (first.runs, second.runs),
            Side::Player2 => (second.runs, first.runs),
        };

        let (winner, margin) = if first.runs > second.runs {
            (Winner::Side(first.batting), Some(Margin::Runs(first.runs - second.runs)))
        } else if second.runs > first.runs {
            let in_hand = MAX_WICKETS.saturating_sub(second.wickets);
            (Winner::Side(second.batting), Some(Margin::Wickets(in_hand)))
        } else {
            (Winner::Tie, None)
        };

        Self { winner, margin, player1_score, player2_score }
    }
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Current match phase
    pub phase: MatchPhase,

    /// Setup, once configured
    pub config: Option<MatchConfig>,

    /// Toss result, once performed
    pub toss: Option<TossOutcome>,

    /// Batting order, once chosen
    pub batting_order: Option<InningsChoice>,

    /// Innings 1
    pub first_innings: Option<InningsState>,

    /// Innings 2
    pub second_innings: Option<InningsState>,

    /// Result, once terminal
    pub outcome: Option<MatchOutcome>,

    /// Balls bowled across both innings
    pub deliveries: u32,
}

impl MatchState {
    /// Innings currently being played, if any.
    pub fn current_innings(&self) -> Option<Innings> {
        match self.phase {
            MatchPhase::InningsInProgress(innings) => Some(innings),
            _ => None,
        }
    }

    /// State of the given innings.
    pub fn innings(&self, innings: Innings) -> Option<&InningsState> {
        match innings {
            Innings::First => self.first_innings.as_ref(),
            Innings::Second => self.second_innings.as_ref(),
        }
    }

    pub(crate) fn innings_mut(&mut self, innings: Innings) -> Option<&mut InningsState> {
        match innings {
            Innings::First => self.first_innings.as_mut(),
            Innings::Second => self.second_innings.as_mut(),
        }
    }

    /// State of the innings in progress.
    pub fn current(&self) -> Option<&InningsState> {
        self.current_innings().and_then(|i| self.innings(i))
    }

    /// Innings a side batted in.
    pub fn innings_of(&self, side: Side) -> Option<&InningsState> {
        [self.first_innings.as_ref(), self.second_innings.as_ref()]
            .into_iter()
            .flatten()
            .find(|i| i.batting == side)
    }

    /// Runs scored by a side (0 before it bats).
    pub fn score(&self, side: Side) -> u32 {
        self.innings_of(side).map(|i| i.runs).unwrap_or(0)
    }

    /// Wickets lost by a side (0 before it bats).
    pub fn wickets(&self, side: Side) -> u8 {
        self.innings_of(side).map(|i| i.wickets).unwrap_or(0)
    }

    /// Target for innings 2 (first-innings total, without the +1).
    pub fn target(&self) -> Option<u32> {
        self.second_innings.as_ref().and_then(|i| i.target)
    }

    /// Whether the match has finished.
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, MatchPhase::Complete)
    }

    /// Winner, once terminal.
    pub fn winner(&self) -> Option<Winner> {
        self.outcome.map(|o| o.winner)
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.deliveries, |hasher| {
            hasher.update_u8(self.phase.code());

            hasher.update_bool(self.config.is_some());
            if let Some(config) = &self.config {
                hasher.update_u8(match config.mode() {
                    GameMode::VsComputer => 0,
                    GameMode::VsPlayer => 1,
                });
                for side in [Side::Player1, Side::Player2] {
                    hasher.update_str(config.team(side).name());
                    hasher.update_str(config.name(side));
                }
            }

            hasher.update_bool(self.toss.is_some());
            if let Some(toss) = &self.toss {
                hasher.update_bool(toss.call == CoinFace::Heads);
                hasher.update_bool(toss.coin == CoinFace::Heads);
                hasher.update_u8(toss.winner as u8);
            }

            hasher.update_bool(self.batting_order.is_some());
            if let Some(order) = &self.batting_order {
                hasher.update_bool(order.choice == BattingChoice::Bat);
                hasher.update_u8(order.batting_first as u8);
            }

            for innings in [&self.first_innings, &self.second_innings] {
                hasher.update_bool(innings.is_some());
                if let Some(innings) = innings {
                    hash_innings(hasher, innings);
                }
            }

            hasher.update_bool(self.outcome.is_some());
            if let Some(outcome) = &self.outcome {
                hasher.update_u8(match outcome.winner {
                    Winner::Side(side) => side as u8,
                    Winner::Tie => 2,
                });
                hasher.update_u32(outcome.player1_score);
                hasher.update_u32(outcome.player2_score);
            }
        })
    }
}

fn hash_innings(hasher: &mut StateHasher, innings: &InningsState) {
    hasher.update_u8(innings.batting as u8);
    hasher.update_u32(innings.runs);
    hasher.update_u8(innings.wickets);
    hasher.update_u32(innings.current_batsman() as u32);
    for runs in innings.batting_card() {
        hasher.update_u32(*runs);
    }
    hasher.update_u32(innings.target.unwrap_or(u32::MAX));
    hasher.update_u32(innings.balls);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::innings::Shot;

    fn play(innings: &mut InningsState, balls: &[(i32, i32)]) {
        for (o, d) in balls {
            innings.apply(Shot::new(*o).unwrap(), Shot::new(*d).unwrap());
        }
    }

    fn all_out(innings: &mut InningsState) {
        while !innings.is_all_out() {
            play(innings, &[(2, 2)]);
        }
    }

    #[test]
    fn test_defending_side_wins_by_runs() {
        let mut first = InningsState::new(Side::Player1, None);
        play(&mut first, &[(6, 1), (4, 2)]);
        all_out(&mut first);

        let mut second = InningsState::new(Side::Player2, Some(first.runs));
        play(&mut second, &[(3, 1)]);
        all_out(&mut second);

        let outcome = MatchOutcome::decide(&first, &second);
        assert_eq!(outcome.winner, Winner::Side(Side::Player1));
        assert_eq!(outcome.margin, Some(Margin::Runs(7)));
        assert_eq!(outcome.player1_score, 10);
        assert_eq!(outcome.player2_score, 3);
    }

    #[test]
    fn test_chasing_side_wins_by_wickets() {
        let mut first = InningsState::new(Side::Player2, None);
        play(&mut first, &[(5, 1)]);
        all_out(&mut first);

        let mut second = InningsState::new(Side::Player1, Some(first.runs));
        play(&mut second, &[(1, 1), (6, 2)]);
        assert!(second.is_over());

        let outcome = MatchOutcome::decide(&first, &second);
        assert_eq!(outcome.winner, Winner::Side(Side::Player1));
        assert_eq!(outcome.margin, Some(Margin::Wickets(9)));
        assert_eq!(outcome.player1_score, 6);
        assert_eq!(outcome.player2_score, 5);
    }

    #[test]
    fn test_equal_totals_tie() {
        let mut first = InningsState::new(Side::Player1, None);
        play(&mut first, &[(3, 1)]);
        all_out(&mut first);

        let mut second = InningsState::new(Side::Player2, Some(3));
        play(&mut second, &[(3, 2)]);
        all_out(&mut second);

        let outcome = MatchOutcome::decide(&first, &second);
        assert_eq!(outcome.winner, Winner::Tie);
        assert_eq!(outcome.margin, None);
    }

    #[test]
    fn test_margin_display() {
        assert_eq!(Margin::Runs(1).to_string(), "by 1 run");
        assert_eq!(Margin::Runs(12).to_string(), "by 12 runs");
        assert_eq!(Margin::Wickets(1).to_string(), "by 1 wicket");
        assert_eq!(Margin::Wickets(4).to_string(), "by 4 wickets");
    }

    #[test]
    fn test_side_lookups_before_batting() {
        let mut state = MatchState::default();
        assert_eq!(state.score(Side::Player1), 0);
        assert_eq!(state.target(), None);

        let mut first = InningsState::new(Side::Player2, None);
        play(&mut first, &[(4, 1)]);
        state.first_innings = Some(first);

        assert_eq!(state.score(Side::Player2), 4);
        assert_eq!(state.score(Side::Player1), 0);
        assert_eq!(state.wickets(Side::Player2), 0);
    }

    #[test]
    fn test_hash_tracks_state() {
        let empty = MatchState::default();
        assert_eq!(empty.compute_hash(), MatchState::default().compute_hash());

        let mut played = MatchState::default();
        let mut first = InningsState::new(Side::Player1, None);
        play(&mut first, &[(4, 1)]);
        played.first_innings = Some(first);
        played.deliveries = 1;

        assert_ne!(empty.compute_hash(), played.compute_hash());
    }
}
