//! Coin toss and batting-order choice.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::game::setup::Side;

/// Face of the coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinFace {
    /// Heads.
    Heads,
    /// Tails.
    Tails,
}

impl CoinFace {
    /// Map a random bit onto a face (`true` is heads).
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit { CoinFace::Heads } else { CoinFace::Tails }
    }
}

impl FromStr for CoinFace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(CoinFace::Heads),
            "tails" | "t" => Ok(CoinFace::Tails),
            other => Err(format!("expected heads or tails, got {:?}", other)),
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinFace::Heads => write!(f, "heads"),
            CoinFace::Tails => write!(f, "tails"),
        }
    }
}

/// Result of the toss. Player 1 always makes the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossOutcome {
    /// Player 1's call.
    pub call: CoinFace,
    /// What the coin showed.
    pub coin: CoinFace,
    /// Player 1 if the call matched, otherwise player 2.
    pub winner: Side,
}

impl TossOutcome {
    /// Resolve a call against the coin.
    pub fn resolve(call: CoinFace, coin: CoinFace) -> Self {
        let winner = if call == coin { Side::Player1 } else { Side::Player2 };
        Self { call, coin, winner }
    }
}

/// Toss winner's decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattingChoice {
    /// Bat first.
    Bat,
    /// Bowl first.
    Bowl,
}

impl FromStr for BattingChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bat" | "b" => Ok(BattingChoice::Bat),
            "bowl" | "field" => Ok(BattingChoice::Bowl),
            other => Err(format!("expected bat or bowl, got {:?}", other)),
        }
    }
}

/// Resolved batting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsChoice {
    /// Side that won the toss.
    pub toss_winner: Side,
    /// What the winner chose.
    pub choice: BattingChoice,
    /// Side batting in innings 1.
    pub batting_first: Side,
}

impl InningsChoice {
    /// The winner bats first on `Bat`, the opponent bats first on `Bowl`.
    pub fn resolve(toss_winner: Side, choice: BattingChoice) -> Self {
        let batting_first = match choice {
            BattingChoice::Bat => toss_winner,
            BattingChoice::Bowl => toss_winner.opponent(),
        };
        Self { toss_winner, choice, batting_first }
    }
}
