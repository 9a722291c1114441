use chrono::Utc;
use clap::Parser;
use elo_ladder::{
    config::RatingConfig,
    error::EngineError,
    model::{
        db_structs::MatchHistoryRecord,
        head_to_head::head_to_head,
        probability::{estimate_win_probability, expected_points, probability_level},
        rating_tracker::{RatingLedger, RatingTracker}
    }
};
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod args;

use args::{Args, Command};

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), EngineError> {
    let mut config = RatingConfig::from_env();
    if let Some(k_factor) = args.k_factor {
        config.k_factor = k_factor;
    }
    if let Some(default_rating) = args.default_rating {
        config.default_rating = default_rating;
    }

    let records = load_ledger(&args.ledger)?;
    let tracker = RatingTracker::replay(config, records)?;

    match args.command {
        Command::Leaderboard => print(&tracker.leaderboard()),
        Command::History { player } => print(&tracker.history(&player)?),
        Command::Monthly => print(&tracker.monthly_history(Utc::now())),
        Command::HeadToHead { player } => {
            if tracker.player(&player).is_none() {
                return Err(EngineError::UnknownPlayer(player));
            }
            print(&head_to_head(&tracker.records(), &player, &tracker.leaderboard()))
        }
        Command::Odds { player_a, player_b } => {
            let rating_a = tracker.rating(&player_a)?;
            let rating_b = tracker.rating(&player_b)?;
            let probability = estimate_win_probability(rating_a, rating_b);

            print(&json!({
                "playerA": { "id": player_a, "rating": rating_a, "probability": probability.probability_a,
                    "level": probability_level(probability.probability_a) },
                "playerB": { "id": player_b, "rating": rating_b, "probability": probability.probability_b,
                    "level": probability_level(probability.probability_b) },
                "pointsAtStake": expected_points(rating_a, rating_b, config.k_factor)
            }))
        }
    }
}

fn load_ledger(path: &Path) -> Result<Vec<MatchHistoryRecord>, EngineError> {
    info!("Loading ledger from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let records: Vec<MatchHistoryRecord> = serde_json::from_str(&contents)?;
    info!("Loaded {} match records", records.len());

    Ok(records)
}

fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), EngineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
