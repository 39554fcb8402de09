//! Match configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::game::team::Team;

/// Who player 2 is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Player 2 is the computer.
    VsComputer,
    /// Player 2 is a second human.
    VsPlayer,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "computer" | "vscomputer" | "cpu" => Ok(GameMode::VsComputer),
            "player" | "vsplayer" | "pvp" => Ok(GameMode::VsPlayer),
            other => Err(format!("unknown game mode: {}", other)),
        }
    }
}

/// One of the two sides in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    /// The side that calls the toss.
    Player1 = 0,
    /// The opponent (human or computer).
    Player2 = 1,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// 0 for player 1, 1 for player 2.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player1 => write!(f, "player 1"),
            Side::Player2 => write!(f, "player 2"),
        }
    }
}

/// Display names for the two sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames {
    /// Player 1 display name.
    pub player1: String,
    /// Player 2 display name.
    pub player2: String,
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
        }
    }
}

impl PlayerNames {
    /// Default names for a mode; the computer is always called "Computer".
    pub fn for_mode(mode: GameMode) -> Self {
        let mut names = Self::default();
        if mode == GameMode::VsComputer {
            names.player2 = "Computer".to_string();
        }
        names
    }
}

/// Match setup. Created once by `configure`, immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    mode: GameMode,
    teams: [Team; 2],
    names: PlayerNames,
}

impl MatchConfig {
    pub(crate) fn new(mode: GameMode, player1_team: Team, player2_team: Team, names: PlayerNames) -> Self {
        Self {
            mode,
            teams: [player1_team, player2_team],
            names,
        }
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Team assigned to a side.
    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    /// Display name of a side.
    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Player1 => &self.names.player1,
            Side::Player2 => &self.names.player2,
        }
    }

    /// Display names.
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Whether a human supplies this side's numbers.
    pub fn is_human(&self, side: Side) -> bool {
        match side {
            Side::Player1 => true,
            Side::Player2 => self.mode == GameMode::VsPlayer,
        }
    }
}
