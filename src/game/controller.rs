//! Match Controller
//!
//! Owns the match state and exposes the operations the presentation layer
//! calls, in order:
//!
//! ```text
//! configure -> perform_toss -> choose_batting_order
//!     -> resolve_ball* -> check_innings_end -> advance_innings   (innings 1)
//!     -> resolve_ball* -> check_innings_end -> advance_innings   (innings 2)
//!     -> Complete
//! ```
//!
//! `reset` returns to `Unconfigured` from any phase. Every rejected call
//! leaves the state untouched.

use tracing::{debug, info, warn};

use crate::core::rng::{DeterministicRng, RandomSource};
use crate::error::{MatchError, MatchResult, TeamError};
use crate::game::events::{EventLog, GameEvent, GameEventData};
use crate::game::innings::{BallResult, Innings, InningsState, Scoreboard, Shot};
use crate::game::replay::{MatchRecord, RecordedStep};
use crate::game::setup::{GameMode, MatchConfig, PlayerNames, Side};
use crate::game::state::{MatchOutcome, MatchPhase, MatchState};
use crate::game::team::TeamCatalog;
use crate::game::toss::{BattingChoice, CoinFace, InningsChoice, TossOutcome};
use crate::{MAX_SHOT, MIN_SHOT};

/// Drives one match at a time through its lifecycle.
pub struct MatchController<R: RandomSource = DeterministicRng> {
    catalog: TeamCatalog,
    rng: R,
    state: MatchState,
    events: EventLog,
    record: Option<MatchRecord>,
}

impl MatchController<DeterministicRng> {
    /// Controller over the default catalog with a seeded RNG.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(TeamCatalog::default(), DeterministicRng::new(seed))
    }
}

impl<R: RandomSource> MatchController<R> {
    /// Create a controller with an injected random source.
    pub fn new(catalog: TeamCatalog, rng: R) -> Self {
        Self {
            catalog,
            rng,
            state: MatchState::default(),
            events: EventLog::default(),
            record: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Team catalog (read-only).
    pub fn catalog(&self) -> &TeamCatalog {
        &self.catalog
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    /// Match setup, once configured.
    pub fn config(&self) -> Option<&MatchConfig> {
        self.state.config.as_ref()
    }

    /// Inputs recorded so far, for replay.
    pub fn record(&self) -> Option<&MatchRecord> {
        self.record.as_ref()
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take()
    }

    /// Side batting in the innings in progress.
    pub fn batting_side(&self) -> Option<Side> {
        self.state.current().map(|i| i.batting)
    }

    /// Side bowling in the innings in progress.
    pub fn bowling_side(&self) -> Option<Side> {
        self.batting_side().map(Side::opponent)
    }

    /// Scoreboard for the innings in progress.
    pub fn scoreboard(&self) -> Option<Scoreboard> {
        let innings = self.state.current_innings()?;
        let current = self.state.innings(innings)?;
        let config = self.state.config.as_ref()?;
        Some(Scoreboard::capture(innings, current, config.team(current.batting)))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Select teams and mode.
    ///
    /// Both teams must be set, distinct, and present in the catalog.
    pub fn configure(
        &mut self,
        mode: GameMode,
        player1_team: Option<&str>,
        player2_team: Option<&str>,
        names: PlayerNames,
    ) -> MatchResult<MatchConfig> {
        self.expect_phase("configure", |p| p == MatchPhase::Unconfigured)?;

        let team1 = player1_team.ok_or(TeamError::Unset(Side::Player1));
        let team2 = player2_team.ok_or(TeamError::Unset(Side::Player2));
        let (team1, team2) = match (team1, team2) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => return Err(self.rejected("configure", e.into())),
        };
        if team1 == team2 {
            return Err(self.rejected("configure", TeamError::Duplicate(team1.to_string()).into()));
        }

        let lookup = |name: &str| {
            self.catalog
                .get(name)
                .cloned()
                .ok_or_else(|| TeamError::Unknown(name.to_string()))
        };
        let (team1, team2) = match (lookup(team1), lookup(team2)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => return Err(self.rejected("configure", e.into())),
        };

        info!("Match configured: {} vs {} ({:?})", team1.name(), team2.name(), mode);

        let config = MatchConfig::new(mode, team1, team2, names);
        self.record = Some(MatchRecord::new(&config));
        self.state.config = Some(config.clone());
        self.set_phase(MatchPhase::TossPending);

        Ok(config)
    }

    /// Player 1 calls the toss; one random bit decides the coin.
    pub fn perform_toss(&mut self, call: CoinFace) -> MatchResult<TossOutcome> {
        self.expect_phase("perform_toss", |p| p == MatchPhase::TossPending)?;

        let coin = CoinFace::from_bit(self.rng.coin_flip());
        let outcome = TossOutcome::resolve(call, coin);

        info!("Toss: called {}, coin shows {}, {} wins", call, coin, outcome.winner);

        self.state.toss = Some(outcome);
        if let Some(record) = self.record.as_mut() {
            record.toss = Some(outcome);
        }
        self.events.push(self.state.deliveries, GameEventData::TossDecided {
            call,
            coin,
            winner: outcome.winner,
        });
        self.set_phase(MatchPhase::BattingOrderPending);

        Ok(outcome)
    }

    /// Toss winner chooses to bat or bowl; opens innings 1.
    pub fn choose_batting_order(&mut self, choice: BattingChoice) -> MatchResult<InningsChoice> {
        self.expect_phase("choose_batting_order", |p| p == MatchPhase::BattingOrderPending)?;

        let toss_winner = match self.state.toss {
            Some(toss) => toss.winner,
            None => return Err(self.illegal("choose_batting_order")),
        };
        let order = InningsChoice::resolve(toss_winner, choice);

        info!("{} chose to {:?}; {} bats first", toss_winner, choice, order.batting_first);

        self.state.batting_order = Some(order);
        self.state.first_innings = Some(InningsState::new(order.batting_first, None));
        if let Some(record) = self.record.as_mut() {
            record.choice = Some(choice);
        }
        self.events.push(self.state.deliveries, GameEventData::BattingOrderChosen(order));
        self.set_phase(MatchPhase::InningsInProgress(Innings::First));

        Ok(order)
    }

    /// Resolve one ball from the batting (offense) and bowling (defense) numbers.
    pub fn resolve_ball(&mut self, offense: i32, defense: i32) -> MatchResult<BallResult> {
        let innings = self.open_innings("resolve_ball")?;

        let offense = Shot::new(offense).map_err(|e| self.rejected("resolve_ball", e))?;
        let defense = Shot::new(defense).map_err(|e| self.rejected("resolve_ball", e))?;

        let current = match self.state.innings_mut(innings) {
            Some(current) => current,
            None => return Err(self.illegal("resolve_ball")),
        };
        let outcome = current.apply(offense, defense);
        let batting = current.batting;
        let (runs, wickets) = (current.runs, current.wickets);
        let innings_over = current.is_over();

        self.state.deliveries += 1;
        if let Some(record) = self.record.as_mut() {
            record.steps.push(RecordedStep::Ball { offense, defense });
        }

        debug!(
            "Ball {}: bat {} bowl {} -> {:?} ({}/{})",
            self.state.deliveries, offense, defense, outcome, runs, wickets
        );
        #[cfg(feature = "debug-tracing")]
        tracing::trace!(card = ?self.state.innings(innings).map(|i| i.batting_card()), "batting card");

        self.events.push(self.state.deliveries, GameEventData::BallBowled {
            innings,
            batting,
            offense,
            defense,
            outcome,
            runs,
            wickets,
        });

        let scoreboard = match self.scoreboard() {
            Some(board) => board,
            None => return Err(self.illegal("resolve_ball")),
        };

        Ok(BallResult {
            offense,
            defense,
            outcome,
            scoreboard,
            innings_over,
        })
    }

    /// Uniform draw in 1..=6 for the side no human controls.
    pub fn draw_opponent_number(&mut self) -> Shot {
        // Clamped: a foreign source may ignore the requested range
        Shot::saturating(self.rng.next_int_range(MIN_SHOT as i32, MAX_SHOT as i32))
    }

    /// Play one ball where a human supplies `number`.
    ///
    /// The human number goes to the batting side when a human controls it,
    /// otherwise to the bowling side; the other number is drawn.
    pub fn play_turn(&mut self, number: i32) -> MatchResult<BallResult> {
        // Nothing is drawn for a call that would be rejected
        self.open_innings("play_turn")?;
        let (batting, config) = match (self.batting_side(), self.state.config.as_ref()) {
            (Some(batting), Some(config)) => (batting, config),
            _ => return Err(self.illegal("play_turn")),
        };
        let human_bats = config.is_human(batting);

        if let Err(e) = Shot::new(number) {
            return Err(self.rejected("play_turn", e));
        }
        let drawn = self.draw_opponent_number().get() as i32;

        if human_bats {
            self.resolve_ball(number, drawn)
        } else {
            self.resolve_ball(drawn, number)
        }
    }

    /// Whether the innings in progress has ended.
    ///
    /// True iff ten wickets are down or, in innings 2, the score exceeds the
    /// target. After the match completes the final innings stays ended.
    pub fn check_innings_end(&self) -> MatchResult<bool> {
        match self.state.phase {
            MatchPhase::InningsInProgress(innings) => Ok(self
                .state
                .innings(innings)
                .is_some_and(InningsState::is_over)),
            MatchPhase::Complete => Ok(true),
            phase => Err(MatchError::IllegalTransition {
                operation: "check_innings_end",
                phase: phase.to_string(),
            }),
        }
    }

    /// Close the finished innings: start innings 2, or decide the match.
    pub fn advance_innings(&mut self) -> MatchResult<&MatchState> {
        let innings = match self.state.current_innings() {
            Some(innings) => innings,
            None => return Err(self.illegal("advance_innings")),
        };
        let closed = match self.state.innings(innings) {
            Some(current) if current.is_over() => current.clone(),
            _ => return Err(self.illegal("advance_innings")),
        };

        if let Some(record) = self.record.as_mut() {
            record.steps.push(RecordedStep::AdvanceInnings);
        }
        info!(
            "{} closed: {} scored {}/{}",
            innings, closed.batting, closed.runs, closed.wickets
        );
        self.events.push(self.state.deliveries, GameEventData::InningsClosed {
            innings,
            batting: closed.batting,
            runs: closed.runs,
            wickets: closed.wickets,
        });

        match innings {
            Innings::First => {
                let target = closed.runs;
                info!("Target for {}: {} to win", closed.batting.opponent(), target + 1);
                self.state.second_innings = Some(InningsState::new(closed.batting.opponent(), Some(target)));
                self.set_phase(MatchPhase::InningsInProgress(Innings::Second));
            }
            Innings::Second => {
                let first = match self.state.first_innings.as_ref() {
                    Some(first) => first,
                    None => return Err(self.illegal("advance_innings")),
                };
                let outcome = MatchOutcome::decide(first, &closed);
                info!(
                    "Match ended: {:?} {:?} ({} - {})",
                    outcome.winner, outcome.margin, outcome.player1_score, outcome.player2_score
                );
                self.state.outcome = Some(outcome);
                self.events.push(self.state.deliveries, GameEventData::MatchEnded(outcome));
                self.set_phase(MatchPhase::Complete);
            }
        }

        Ok(&self.state)
    }

    /// Clear all match state and configuration. The catalog is kept.
    pub fn reset(&mut self) {
        info!("Match reset from {}", self.state.phase);
        self.state = MatchState::default();
        self.events.clear();
        self.record = None;
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Innings in progress that can still take a ball.
    fn open_innings(&self, operation: &'static str) -> MatchResult<Innings> {
        match self.state.current_innings() {
            Some(innings) if !self.state.innings(innings).map_or(true, InningsState::is_over) => Ok(innings),
            _ => Err(self.illegal(operation)),
        }
    }

    fn set_phase(&mut self, new_phase: MatchPhase) {
        let old_phase = self.state.phase;
        self.state.phase = new_phase;
        self.events.push(self.state.deliveries, GameEventData::PhaseChanged { old_phase, new_phase });
    }

    fn expect_phase(&self, operation: &'static str, allowed: impl Fn(MatchPhase) -> bool) -> MatchResult<()> {
        if allowed(self.state.phase) {
            Ok(())
        } else {
            Err(self.illegal(operation))
        }
    }

    fn illegal(&self, operation: &'static str) -> MatchError {
        self.rejected(operation, MatchError::IllegalTransition {
            operation,
            phase: self.state.phase.to_string(),
        })
    }

    fn rejected(&self, operation: &'static str, error: MatchError) -> MatchError {
        warn!("{} rejected: {}", operation, error);
        error
    }
}

// =============================================================================
// TESTS
// =============================================================================
