use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{
    constants::MONTH_LABEL_FORMAT,
    db_structs::{MatchHistoryRecord, PlayerId}
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: String,
    /// Rating at the end of the month (or so far, for the current one)
    pub rating: i32,
    pub is_current_month: bool
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMonthlySeries {
    pub player_id: PlayerId,
    pub player_name: String,
    /// Starts at the player's first active month, not the cohort's
    pub points: Vec<MonthlyPoint>
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHistory {
    pub months: Vec<String>,
    pub players: Vec<PlayerMonthlySeries>
}

struct PlayerMonths<'a> {
    player_id: &'a str,
    player_name: &'a str,
    first_month: NaiveDate,
    net_changes: BTreeMap<NaiveDate, i32>
}

/// Month-by-month ratings for everyone in the ledger.
///
/// There is no current-rating anchor here, so each player is replayed forward
/// from `default_rating` starting at their first active month. Only a month's
/// net delta matters, not the order inside it. Months run from the first
/// recorded match through the month of `now`, which is flagged as current.
/// A `now` in a month before the first record yields an empty history.
/// Players are ordered by latest rating, highest first.
pub fn reconstruct_monthly_history(
    records: &[MatchHistoryRecord],
    default_rating: i32,
    now: DateTime<Utc>
) -> MonthlyHistory {
    let Some(first_played) = records.iter().map(|r| r.played_at).min() else {
        return MonthlyHistory::default();
    };

    let current_month = month_start(now);
    if current_month < month_start(first_played) {
        return MonthlyHistory::default();
    }

    let months = month_range(month_start(first_played), current_month);

    let mut players: IndexMap<&str, PlayerMonths> = IndexMap::new();
    for record in records.iter().sorted_by_key(|r| r.played_at) {
        let month = month_start(record.played_at);
        for (id, name, delta) in [
            (&record.player1_id, &record.player1_name, record.player1_rating_change),
            (&record.player2_id, &record.player2_name, record.player2_rating_change)
        ] {
            let entry = players.entry(id.as_str()).or_insert_with(|| PlayerMonths {
                player_id: id,
                player_name: name,
                first_month: month,
                net_changes: BTreeMap::new()
            });
            *entry.net_changes.entry(month).or_default() += delta;
        }
    }

    let mut series: Vec<PlayerMonthlySeries> = players
        .into_values()
        .collect_vec()
        .into_par_iter()
        .map(|p| monthly_series(p, &months, current_month, default_rating))
        .collect();

    series.sort_by(|a, b| latest_rating(b, default_rating).cmp(&latest_rating(a, default_rating)));

    MonthlyHistory {
        months: months.iter().map(|m| m.format(MONTH_LABEL_FORMAT).to_string()).collect(),
        players: series
    }
}

fn monthly_series(
    player: PlayerMonths,
    months: &[NaiveDate],
    current_month: NaiveDate,
    default_rating: i32
) -> PlayerMonthlySeries {
    let mut rating = default_rating;
    let points = months
        .iter()
        .filter(|m| **m >= player.first_month)
        .map(|m| {
            rating += player.net_changes.get(m).copied().unwrap_or(0);
            MonthlyPoint {
                month: m.format(MONTH_LABEL_FORMAT).to_string(),
                rating,
                is_current_month: *m == current_month
            }
        })
        .collect();

    PlayerMonthlySeries {
        player_id: player.player_id.to_string(),
        player_name: player.player_name.to_string(),
        points
    }
}

fn latest_rating(series: &PlayerMonthlySeries, default_rating: i32) -> i32 {
    series.points.last().map(|p| p.rating).unwrap_or(default_rating)
}

fn month_start(timestamp: DateTime<Utc>) -> NaiveDate {
    let date = timestamp.date_naive();
    date - Duration::days(date.day0() as i64)
}

fn month_range(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(first), |m| m.checked_add_months(Months::new(1)))
        .take_while(|m| *m <= last)
        .collect()
}
