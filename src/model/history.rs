use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{CREATED_LABEL_FORMAT, CURRENT_LABEL, MATCH_LABEL_FORMAT},
    db_structs::MatchHistoryRecord
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistoryPoint {
    pub label: String,
    pub rating: i32,
    pub timestamp: Option<DateTime<Utc>>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingHistory {
    pub points: Vec<RatingHistoryPoint>,
    pub highest: i32,
    pub lowest: i32,
    pub lifetime_change: i32,
    pub current_rating: i32
}

/// Rebuilds a player's rating curve from the ledger and their current rating.
///
/// Only the current rating is stored, so the curve is anchored at the end:
/// `start = current - sum(deltas)`, then the deltas are replayed forward in
/// `played_at` order. Records that don't involve `player_id` are skipped.
///
/// The result is only right if `records` holds every rating-changing event
/// for the player with the delta that was actually applied. A missing record
/// shifts the whole curve without any error; see
/// [`RatingTracker::detect_drift`](crate::model::rating_tracker::RatingTracker::detect_drift).
pub fn reconstruct_history(
    records: &[MatchHistoryRecord],
    player_id: &str,
    current_rating: i32,
    player_created_at: Option<DateTime<Utc>>
) -> RatingHistory {
    let changes = records
        .iter()
        .filter_map(|r| r.rating_change_for(player_id).map(|delta| (r.played_at, delta)))
        .sorted_by_key(|(played_at, _)| *played_at)
        .collect_vec();

    if changes.is_empty() {
        let label = player_created_at
            .map(|t| t.format(CREATED_LABEL_FORMAT).to_string())
            .unwrap_or_else(|| CURRENT_LABEL.to_string());

        return RatingHistory {
            points: vec![RatingHistoryPoint {
                label,
                rating: current_rating,
                timestamp: player_created_at
            }],
            highest: current_rating,
            lowest: current_rating,
            lifetime_change: 0,
            current_rating
        };
    }

    let total_change: i32 = changes.iter().map(|(_, delta)| delta).sum();
    let starting_rating = current_rating - total_change;

    let mut points = Vec::with_capacity(changes.len() + 1);
    if let Some(created_at) = player_created_at {
        if created_at < changes[0].0 {
            points.push(RatingHistoryPoint {
                label: created_at.format(CREATED_LABEL_FORMAT).to_string(),
                rating: starting_rating,
                timestamp: Some(created_at)
            });
        }
    }

    let mut rating = starting_rating;
    let mut highest = starting_rating;
    let mut lowest = starting_rating;
    for (played_at, delta) in changes {
        rating += delta;
        highest = highest.max(rating);
        lowest = lowest.min(rating);

        points.push(RatingHistoryPoint {
            label: played_at.format(MATCH_LABEL_FORMAT).to_string(),
            rating,
            timestamp: Some(played_at)
        });
    }

    RatingHistory {
        points,
        highest,
        lowest,
        lifetime_change: rating - starting_rating,
        current_rating: rating
    }
}
