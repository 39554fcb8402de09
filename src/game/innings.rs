//! Innings state and ball resolution.
//!
//! A ball is two numbers in 1..=6: the batting side's (offense) and the
//! bowling side's (defense). Equal numbers dismiss the batsman; otherwise
//! the batting side scores the offense number.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::MatchError;
use crate::game::setup::Side;
use crate::game::team::Team;
use crate::{MAX_SHOT, MAX_WICKETS, MIN_SHOT, SQUAD_SIZE};

// =============================================================================
// SHOT
// =============================================================================

/// A validated hand number in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Shot(u8);

impl Shot {
    /// Validate a raw number.
    pub fn new(value: i32) -> Result<Self, MatchError> {
        if (MIN_SHOT as i32..=MAX_SHOT as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(MatchError::InvalidInput { value })
        }
    }

    /// Clamp any integer into 1..=6.
    pub fn saturating(value: i32) -> Self {
        Self(value.clamp(MIN_SHOT as i32, MAX_SHOT as i32) as u8)
    }

    /// The number.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Shot {
    type Error = MatchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Shot::new(value as i32)
    }
}

impl From<Shot> for u8 {
    fn from(shot: Shot) -> u8 {
        shot.0
    }
}

impl fmt::Display for Shot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// BALL OUTCOME
// =============================================================================

/// Classification of a single ball.
///
/// `Four` and `Six` score exactly like `Runs`; the tag is for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallOutcome {
    /// Numbers matched, batsman dismissed.
    Wicket,
    /// Four runs.
    Four,
    /// Six runs.
    Six,
    /// 1, 2, 3 or 5 runs.
    Runs(u8),
}

impl BallOutcome {
    /// Classify a ball.
    pub fn classify(offense: Shot, defense: Shot) -> Self {
        if offense == defense {
            return BallOutcome::Wicket;
        }
        match offense.get() {
            4 => BallOutcome::Four,
            6 => BallOutcome::Six,
            n => BallOutcome::Runs(n),
        }
    }

    /// Runs credited by this ball.
    pub fn runs(self) -> u32 {
        match self {
            BallOutcome::Wicket => 0,
            BallOutcome::Four => 4,
            BallOutcome::Six => 6,
            BallOutcome::Runs(n) => n as u32,
        }
    }

    /// Whether the ball took a wicket.
    pub fn is_wicket(self) -> bool {
        matches!(self, BallOutcome::Wicket)
    }
}

impl fmt::Display for BallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallOutcome::Wicket => write!(f, "OUT!"),
            BallOutcome::Four => write!(f, "FOUR! +4 runs"),
            BallOutcome::Six => write!(f, "SIX! +6 runs"),
            BallOutcome::Runs(n) => write!(f, "+{} runs", n),
        }
    }
}

// =============================================================================
// INNINGS
// =============================================================================

/// Which innings of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Innings {
    /// Innings 1: no target.
    First,
    /// Innings 2: chasing the first-innings total.
    Second,
}

impl Innings {
    /// 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
        }
    }
}

impl fmt::Display for Innings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "innings {}", self.number())
    }
}

/// One side's batting turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsState {
    /// Batting side.
    pub batting: Side,

    /// Running total.
    pub runs: u32,

    /// Wickets fallen (0-10).
    pub wickets: u8,

    /// Index of the current batsman (0-10).
    batsman: usize,

    /// Runs per batsman, parallel to the lineup.
    batsman_runs: Vec<u32>,

    /// First-innings total to exceed (innings 2 only).
    pub target: Option<u32>,

    /// Balls bowled.
    pub balls: u32,
}

impl InningsState {
    /// Fresh innings: zero runs, zero wickets, opening batsman on strike.
    pub fn new(batting: Side, target: Option<u32>) -> Self {
        Self {
            batting,
            runs: 0,
            wickets: 0,
            batsman: 0,
            batsman_runs: vec![0; SQUAD_SIZE],
            target,
            balls: 0,
        }
    }

    /// Index of the batsman on strike.
    #[inline]
    pub fn current_batsman(&self) -> usize {
        self.batsman
    }

    /// Runs scored by the batsman at `index`.
    pub fn batsman_runs(&self, index: usize) -> Option<u32> {
        self.batsman_runs.get(index).copied()
    }

    /// Runs per batsman in lineup order.
    pub fn batting_card(&self) -> &[u32] {
        &self.batsman_runs
    }

    /// Ten wickets down.
    #[inline]
    pub fn is_all_out(&self) -> bool {
        self.wickets >= MAX_WICKETS
    }

    /// Score strictly above the target (innings 2 only).
    #[inline]
    pub fn target_exceeded(&self) -> bool {
        self.target.is_some_and(|t| self.runs > t)
    }

    /// The innings-end condition.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.is_all_out() || self.target_exceeded()
    }

    /// Target as shown to players (stored target + 1).
    pub fn display_target(&self) -> Option<u32> {
        self.target.map(|t| t + 1)
    }

    /// Runs still needed to win the chase.
    pub fn runs_needed(&self) -> Option<u32> {
        self.display_target().map(|t| t.saturating_sub(self.runs))
    }

    /// Apply one ball. The caller guarantees the innings is not over.
    pub(crate) fn apply(&mut self, offense: Shot, defense: Shot) -> BallOutcome {
        let outcome = BallOutcome::classify(offense, defense);
        self.balls += 1;

        if outcome.is_wicket() {
            self.wickets = (self.wickets + 1).min(MAX_WICKETS);
            // The last man stays at index 10 once all out
            self.batsman = (self.batsman + 1).min(MAX_WICKETS as usize);
        } else {
            let runs = outcome.runs();
            self.runs += runs;
            if let Some(slot) = self.batsman_runs.get_mut(self.batsman) {
                *slot += runs;
            }
        }

        outcome
    }
}

// =============================================================================
// SCOREBOARD
// =============================================================================

/// Read-only snapshot handed to the presentation layer after each mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Current innings.
    pub innings: Innings,
    /// Batting side.
    pub batting: Side,
    /// Batting team name.
    pub batting_team: String,
    /// Team total.
    pub runs: u32,
    /// Wickets fallen.
    pub wickets: u8,
    /// Current batsman index.
    pub batsman_index: usize,
    /// Current batsman name.
    pub batsman: String,
    /// Current batsman's runs.
    pub batsman_runs: u32,
    /// Stored target (innings 2).
    pub target: Option<u32>,
    /// Target as displayed (stored + 1).
    pub display_target: Option<u32>,
    /// Balls bowled this innings.
    pub balls: u32,
}

impl Scoreboard {
    /// Snapshot an innings against the batting team's lineup.
    pub fn capture(innings: Innings, state: &InningsState, batting_team: &Team) -> Self {
        let index = state.current_batsman();
        Self {
            innings,
            batting: state.batting,
            batting_team: batting_team.name().to_string(),
            runs: state.runs,
            wickets: state.wickets,
            batsman_index: index,
            batsman: batting_team.lineup().get(index).unwrap_or_default().to_string(),
            batsman_runs: state.batsman_runs(index).unwrap_or(0),
            target: state.target,
            display_target: state.display_target(),
            balls: state.balls,
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{}", self.batting_team, self.runs, self.wickets)?;
        if let Some(target) = self.display_target {
            write!(f, " (target {})", target)?;
        }
        write!(f, " | {} {}*", self.batsman, self.batsman_runs)
    }
}

/// Result of `resolve_ball`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallResult {
    /// Batting side's number.
    pub offense: Shot,
    /// Bowling side's number.
    pub defense: Shot,
    /// What happened.
    pub outcome: BallOutcome,
    /// Scoreboard after the ball.
    pub scoreboard: Scoreboard,
    /// Whether this ball closed the innings.
    pub innings_over: bool,
}
