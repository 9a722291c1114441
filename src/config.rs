use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::model::constants::{DEFAULT_RATING, K_FACTOR};

/// Tunables shared by the calculator, the tracker and the reconstructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Maximum points exchanged per match (default: 32)
    pub k_factor: f64,
    /// Rating assigned to new players (default: 1200)
    pub default_rating: i32
}

impl RatingConfig {
    /// Reads `ELO_K_FACTOR` and `ELO_DEFAULT_RATING`, loading `.env` first.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();
        Self {
            k_factor: parse_var("ELO_K_FACTOR").unwrap_or(defaults.k_factor),
            default_rating: parse_var("ELO_DEFAULT_RATING").unwrap_or(defaults.default_rating)
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: K_FACTOR,
            default_rating: DEFAULT_RATING
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}={}: not a valid value", key, value);
            None
        }
    }
}
