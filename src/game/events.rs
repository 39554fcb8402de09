//! Match Events
//!
//! Events emitted by the controller for replay and for the presentation
//! layer to animate between renders.

use serde::{Serialize, Deserialize};

use crate::game::innings::{BallOutcome, Innings, Shot};
use crate::game::setup::Side;
use crate::game::state::{MatchOutcome, MatchPhase};
use crate::game::toss::{CoinFace, InningsChoice};

/// Match event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Match phase changed
    PhaseChanged {
        old_phase: MatchPhase,
        new_phase: MatchPhase,
    },

    /// Toss decided
    TossDecided {
        call: CoinFace,
        coin: CoinFace,
        winner: Side,
    },

    /// Batting order chosen
    BattingOrderChosen(InningsChoice),

    /// One ball bowled
    BallBowled {
        innings: Innings,
        batting: Side,
        offense: Shot,
        defense: Shot,
        outcome: BallOutcome,
        runs: u32,
        wickets: u8,
    },

    /// Innings closed
    InningsClosed {
        innings: Innings,
        batting: Side,
        runs: u32,
        wickets: u8,
    },

    /// Match ended
    MatchEnded(MatchOutcome),
}

/// An event tagged with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Monotonic sequence number within the match
    pub seq: u32,

    /// Balls bowled when the event fired
    pub delivery: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(seq: u32, delivery: u32, data: GameEventData) -> Self {
        Self { seq, delivery, data }
    }

    /// Side the event concerns, if any.
    pub fn side(&self) -> Option<Side> {
        match &self.data {
            GameEventData::TossDecided { winner, .. } => Some(*winner),
            GameEventData::BattingOrderChosen(choice) => Some(choice.batting_first),
            GameEventData::BallBowled { batting, .. } => Some(*batting),
            GameEventData::InningsClosed { batting, .. } => Some(*batting),
            _ => None,
        }
    }
}

/// Ordered event sink owned by the controller.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    next_seq: u32,
    pending: Vec<GameEvent>,
}

impl EventLog {
    /// Append an event.
    pub fn push(&mut self, delivery: u32, data: GameEventData) {
        let event = GameEvent::new(self.next_seq, delivery, data);
        self.next_seq += 1;
        self.pending.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Pending events without consuming them.
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    /// Forget everything, restarting the sequence.
    pub fn clear(&mut self) {
        self.next_seq = 0;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::toss::BattingChoice;

    #[test]
    fn test_sequence_numbers_survive_take() {
        let mut log = EventLog::default();
        log.push(0, GameEventData::PhaseChanged {
            old_phase: MatchPhase::Unconfigured,
            new_phase: MatchPhase::TossPending,
        });
        log.push(0, GameEventData::TossDecided {
            call: CoinFace::Heads,
            coin: CoinFace::Tails,
            winner: Side::Player2,
        });

        let first = log.take();
        assert_eq!(first.iter().map(|e| e.seq).collect::<Vec<_>>(), vec![0, 1]);
        assert!(log.pending().is_empty());

        log.push(3, GameEventData::BattingOrderChosen(
            InningsChoice::resolve(Side::Player2, BattingChoice::Bowl),
        ));
        let second = log.take();
        assert_eq!(second[0].seq, 2);
        assert_eq!(second[0].delivery, 3);
        assert_eq!(second[0].side(), Some(Side::Player1));
    }

    #[test]
    fn test_clear_restarts_sequence() {
        let mut log = EventLog::default();
        log.push(0, GameEventData::PhaseChanged {
            old_phase: MatchPhase::Complete,
            new_phase: MatchPhase::Unconfigured,
        });
        log.clear();
        log.push(0, GameEventData::PhaseChanged {
            old_phase: MatchPhase::Unconfigured,
            new_phase: MatchPhase::TossPending,
        });

        assert_eq!(log.take()[0].seq, 0);
    }
}
