use thiserror::Error;

use crate::model::db_structs::PlayerId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("At least 2 participants are required, got {0}")]
    InsufficientParticipants(usize),

    #[error("Participant {0} appears more than once in the roster")]
    DuplicateParticipant(PlayerId),

    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Scores are tied at {0}-{0}, a match needs a winner")]
    EqualScores(u32),

    #[error("Winner {winner_id} is not a participant of match {match_id}")]
    WinnerNotInMatch { match_id: String, winner_id: PlayerId },

    #[error("Winner {winner_id} does not hold the higher score in match {match_id}")]
    WinnerScoreMismatch { match_id: String, winner_id: PlayerId },

    #[error("Match {0} has already been recorded")]
    MatchNotPending(String),

    #[error("Match {0} is completed but missing result fields")]
    IncompleteMatch(String),

    #[error("Pending matches already exist for: {0}")]
    DuplicatePendingMatch(String),

    #[error("Failed to read ledger: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse ledger: {0}")]
    Json(#[from] serde_json::Error)
}
