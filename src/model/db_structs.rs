use crate::model::structures::{match_status::MatchStatus, player_stats::PlayerStats};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Only ever the current value; history lives in the ledger
    pub rating: i32,
    pub stats: PlayerStats,
    pub is_active: bool,
    pub created_at: DateTime<Utc>
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParticipant {
    pub id: PlayerId,
    pub name: String,
    /// Snapshot taken when the match was scheduled
    pub rating_before: i32,
    pub score: Option<u32>,
    pub rating_after: Option<i32>,
    pub rating_delta: Option<i32>
}

impl MatchParticipant {
    pub fn pending(player: &Player) -> MatchParticipant {
        MatchParticipant {
            id: player.id.clone(),
            name: player.name.clone(),
            rating_before: player.rating,
            score: None,
            rating_after: None,
            rating_delta: None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub session_date: NaiveDate,
    pub player1: MatchParticipant,
    pub player2: MatchParticipant,
    pub winner_id: Option<PlayerId>,
    pub status: MatchStatus,
    pub played_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>
}

impl Match {
    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Pending
    }

    /// True when the match is between `a` and `b`, in either orientation.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player1.id == a && self.player2.id == b) || (self.player1.id == b && self.player2.id == a)
    }

    pub fn participant(&self, player_id: &str) -> Option<&MatchParticipant> {
        [&self.player1, &self.player2].into_iter().find(|p| p.id == player_id)
    }
}

/// Append-only copy of a completed [`Match`]. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryRecord {
    pub id: String,
    pub session_date: NaiveDate,
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player1_score: u32,
    pub player1_rating_change: i32,
    pub player2_id: PlayerId,
    pub player2_name: String,
    pub player2_score: u32,
    pub player2_rating_change: i32,
    pub winner_id: PlayerId,
    pub winner_name: String,
    pub played_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>
}

impl MatchHistoryRecord {
    /// Builds the ledger entry for a completed match. `None` while any
    /// result field is still unset.
    pub fn from_match(id: String, m: &Match, created_at: DateTime<Utc>) -> Option<MatchHistoryRecord> {
        if m.status != MatchStatus::Completed {
            return None;
        }

        let winner_id = m.winner_id.clone()?;
        let winner_name = m.participant(&winner_id)?.name.clone();

        Some(MatchHistoryRecord {
            id,
            session_date: m.session_date,
            player1_id: m.player1.id.clone(),
            player1_name: m.player1.name.clone(),
            player1_score: m.player1.score?,
            player1_rating_change: m.player1.rating_delta?,
            player2_id: m.player2.id.clone(),
            player2_name: m.player2.name.clone(),
            player2_score: m.player2.score?,
            player2_rating_change: m.player2.rating_delta?,
            winner_id,
            winner_name,
            played_at: m.played_at?,
            created_at
        })
    }

    /// The delta applied to `player_id` by this match.
    pub fn rating_change_for(&self, player_id: &str) -> Option<i32> {
        if self.player1_id == player_id {
            Some(self.player1_rating_change)
        } else if self.player2_id == player_id {
            Some(self.player2_rating_change)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        if self.player1_id == player_id {
            Some(&self.player2_id)
        } else if self.player2_id == player_id {
            Some(&self.player1_id)
        } else {
            None
        }
    }
}

/// Unordered pair of participants, emitted before any [`Match`] exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date: NaiveDate,
    pub players: Vec<PlayerId>,
    pub total_matches: u32,
    pub completed_matches: u32,
    pub pending_matches: u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultInput {
    pub player1_score: u32,
    pub player2_score: u32,
    pub winner_id: PlayerId
}
