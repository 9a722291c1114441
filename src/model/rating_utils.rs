use chrono::{DateTime, Utc};

use crate::model::{
    constants::RATING_SCALE,
    db_structs::{Player, PlayerId},
    structures::player_stats::PlayerStats
};

/// Logistic expectation of `rating` scoring against `opponent`.
///
/// `E = 1 / (1 + 10^((opponent - rating) / 400))`
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / RATING_SCALE))
}

/// Rounds halves toward positive infinity, so `-16.5` becomes `-16`.
///
/// Stored deltas were produced with this rule, so every rounding
/// step in the engine goes through here instead of [`f64::round`].
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// A freshly registered player: default rating, empty stats.
pub fn create_player(id: &str, name: &str, default_rating: i32, created_at: DateTime<Utc>) -> Player {
    Player {
        id: PlayerId::from(id),
        name: name.to_string(),
        rating: default_rating,
        stats: PlayerStats::new(default_rating),
        is_active: true,
        created_at
    }
}
