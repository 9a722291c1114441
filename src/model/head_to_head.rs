use serde::{Deserialize, Serialize};

use crate::model::{
    db_structs::{MatchHistoryRecord, Player, PlayerId},
    rating_utils::round_half_up
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadStat {
    pub opponent_id: PlayerId,
    pub opponent_name: String,
    pub wins: u32,
    pub losses: u32,
    pub total_matches: u32,
    /// Percent, `None` when the two have never played
    pub win_rate: Option<u8>
}

/// Record of `player_id` against each of `roster`, busiest rivalry first.
pub fn head_to_head(
    records: &[MatchHistoryRecord],
    player_id: &str,
    roster: &[Player]
) -> Vec<HeadToHeadStat> {
    let mut stats: Vec<HeadToHeadStat> = roster
        .iter()
        .filter(|opponent| opponent.id != player_id)
        .map(|opponent| {
            let (wins, total) = records
                .iter()
                .filter(|r| r.opponent_of(player_id) == Some(opponent.id.as_str()))
                .fold((0u32, 0u32), |(wins, total), r| {
                    (wins + u32::from(r.winner_id == player_id), total + 1)
                });

            HeadToHeadStat {
                opponent_id: opponent.id.clone(),
                opponent_name: opponent.name.clone(),
                wins,
                losses: total - wins,
                total_matches: total,
                win_rate: (total > 0).then(|| round_half_up(wins as f64 / total as f64 * 100.0) as u8)
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_matches.cmp(&a.total_matches));
    stats
}
