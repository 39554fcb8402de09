//! Hand Cricket
//!
//! Plays one match from the terminal. By default both sides are auto-played
//! from a seeded RNG and the result is verified by replaying the recorded
//! inputs. Set `HAND_CRICKET_INTERACTIVE=1` to type the numbers yourself.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use hand_cricket::{
    config::AppConfig,
    core::rng::{derive_match_seed, DeterministicRng},
    game::{
        replay::{replay_match, MatchRecord},
        setup::Side,
        state::Winner,
        toss::{BattingChoice, CoinFace},
    },
    MatchController, MatchError, VERSION,
};

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to read configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Hand Cricket v{}", VERSION);

    let match_id = Uuid::new_v4();
    let seed = config
        .seed
        .unwrap_or_else(|| derive_match_seed(match_id.as_bytes(), &[config.team1.as_str(), config.team2.as_str()]));

    info!("Match ID: {}", hex::encode(match_id.as_bytes()));
    info!("RNG Seed: {}", seed);

    let mut controller = MatchController::with_seed(seed);
    controller.configure(
        config.mode,
        Some(config.team1.as_str()),
        Some(config.team2.as_str()),
        config.names.clone(),
    )?;

    if config.interactive {
        play_interactive(&mut controller)?;
    } else {
        play_auto(&mut controller, seed)?;
    }

    report(&controller)
}

/// Auto-play: toss call, choice and every human number come from a second RNG.
fn play_auto(controller: &mut MatchController, seed: u64) -> Result<()> {
    info!("=== Starting Demo Match ===");
    let mut picks = DeterministicRng::new(seed.rotate_left(32));

    let call = CoinFace::from_bit(picks.next_int(2) == 0);
    controller.perform_toss(call)?;

    let choice = if picks.next_int(2) == 0 { BattingChoice::Bat } else { BattingChoice::Bowl };
    controller.choose_batting_order(choice)?;

    while !controller.state().is_complete() {
        if controller.check_innings_end()? {
            controller.advance_innings()?;
            continue;
        }
        let number = picks.next_int(6) as i32 + 1;
        let ball = controller.play_turn(number)?;
        if ball.outcome.is_wicket() || ball.innings_over {
            info!("{}  [{}]", ball.scoreboard, ball.outcome);
        }
    }

    Ok(())
}

/// Line-based match: every human input is read from stdin and re-prompted on error.
fn play_interactive(controller: &mut MatchController) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut ask = |prompt: &str| -> Result<String> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        match lines.next() {
            Some(line) => Ok(line?),
            None => bail!("input closed"),
        }
    };

    let names = controller
        .config()
        .map(|c| c.names().clone())
        .context("match is not configured")?;

    loop {
        let raw = ask(&format!("{}, call the toss (heads/tails):", names.player1))?;
        match raw.parse::<CoinFace>() {
            Ok(call) => {
                let toss = controller.perform_toss(call)?;
                println!("Coin shows {}.", toss.coin);
                break;
            }
            Err(e) => println!("{}", e),
        }
    }

    loop {
        let winner = controller
            .state()
            .toss
            .map(|t| t.winner)
            .context("toss not decided")?;
        let name = if winner == Side::Player1 { &names.player1 } else { &names.player2 };
        let raw = ask(&format!("{} won the toss. Bat or bowl?", name))?;
        match raw.parse::<BattingChoice>() {
            Ok(choice) => {
                controller.choose_batting_order(choice)?;
                break;
            }
            Err(e) => println!("{}", e),
        }
    }

    while !controller.state().is_complete() {
        if controller.check_innings_end()? {
            controller.advance_innings()?;
            if let Some(board) = controller.scoreboard() {
                println!("--- {} ---  {}", board.innings, board);
            }
            continue;
        }

        let prompt = turn_prompt(controller).context("no innings in progress")?;
        let raw = ask(&prompt)?;
        let number = match raw.trim().parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                println!("Please enter a whole number between 1 and 6.");
                continue;
            }
        };
        match controller.play_turn(number) {
            Ok(ball) => println!(
                "bat {} / bowl {}: {}  {}",
                ball.offense, ball.defense, ball.outcome, ball.scoreboard
            ),
            Err(e @ MatchError::InvalidInput { .. }) => println!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Names the human whose number the next `play_turn` takes.
fn turn_prompt(controller: &MatchController) -> Option<String> {
    let config = controller.config()?;
    let batting = controller.batting_side()?;
    let (side, role) = if config.is_human(batting) {
        (batting, "batting")
    } else {
        (batting.opponent(), "bowling")
    };
    Some(format!("{} ({}), your number (1-6):", config.name(side), role))
}

/// Log the result, print the scorecard, and verify the match by replay.
fn report(controller: &MatchController) -> Result<()> {
    let state = controller.state();
    let outcome = state.outcome.context("match did not complete")?;

    info!("=== Match Results ===");
    info!(
        "{} {} - {} {}",
        state.config.as_ref().map_or("?", |c| c.team(Side::Player1).name()),
        outcome.player1_score,
        outcome.player2_score,
        state.config.as_ref().map_or("?", |c| c.team(Side::Player2).name()),
    );
    match (outcome.winner, outcome.margin) {
        (Winner::Side(side), Some(margin)) => {
            let name = state.config.as_ref().map_or("?", |c| c.name(side));
            info!("Result: {} won {}", name, margin);
        }
        _ => info!("Result: match tied"),
    }
    info!("Deliveries: {}", state.deliveries);

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    println!("{}", serde_json::to_string_pretty(state)?);

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let record = controller.record().context("no recorded inputs")?;
    let bytes = record.to_bytes()?;
    info!("Recorded {} balls in {} bytes", record.ball_count(), bytes.len());

    let decoded = MatchRecord::from_bytes(&bytes)?;
    let (replayed, _) = replay_match(&decoded, controller.catalog())?;
    let replay_hash = replayed.compute_hash();

    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
