use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    display_name = "Elo Ladder",
    long_about = "Replays a match ledger and reports ratings, histories and matchup odds"
)]
pub struct Args {
    /// JSON array of completed match records, oldest or newest first
    #[arg(short = 'f', long, env = "ELO_LEDGER", help = "Path to the match ledger")]
    pub ledger: PathBuf,

    /// Overrides `ELO_K_FACTOR`
    #[arg(short, long, help = "Maximum points exchanged per match")]
    pub k_factor: Option<f64>,

    /// Overrides `ELO_DEFAULT_RATING`
    #[arg(short, long, help = "Starting rating for every player in the ledger")]
    pub default_rating: Option<i32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Current standings, highest rating first
    Leaderboard,
    /// One player's rating curve
    History {
        #[arg(short, long)]
        player: String
    },
    /// Month-end ratings for everyone in the ledger
    Monthly,
    /// One player's record against every other player
    HeadToHead {
        #[arg(short, long)]
        player: String
    },
    /// Win odds and points at stake between two players
    Odds {
        #[arg(short = 'a', long)]
        player_a: String,
        #[arg(short = 'b', long)]
        player_b: String
    }
}
