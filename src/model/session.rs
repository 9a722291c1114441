use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::EngineError,
    model::{
        db_structs::{Match, MatchParticipant, Player, PlayerId, Session},
        round_robin::generate_round_robin,
        structures::match_status::MatchStatus
    }
};

/// The pending matches for one round-robin pass, plus the session counters.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub session: Session,
    pub matches: Vec<Match>
}

/// Schedules every pairing of `selected` as a pending match.
///
/// `existing_matches` holds the matches already on this date; if any pending
/// one covers a new pairing (in either orientation) nothing is scheduled. When
/// `existing_session` is passed its counters are extended, otherwise a fresh
/// session is opened. Each match snapshots both current ratings.
pub fn plan_session(
    date: NaiveDate,
    roster: &[Player],
    selected: &[PlayerId],
    existing_session: Option<&Session>,
    existing_matches: &[Match],
    now: DateTime<Utc>
) -> Result<SessionPlan, EngineError> {
    let pairings = generate_round_robin(selected)?;

    let players: HashMap<&str, &Player> = roster.iter().map(|p| (p.id.as_str(), p)).collect();
    if let Some(missing) = selected.iter().find(|id| !players.contains_key(id.as_str())) {
        return Err(EngineError::UnknownPlayer(missing.clone()));
    }

    let duplicates = pairings
        .iter()
        .filter(|pairing| {
            existing_matches
                .iter()
                .any(|m| m.is_pending() && m.is_between(&pairing.player1_id, &pairing.player2_id))
        })
        .map(|pairing| {
            format!(
                "{} vs {}",
                players[pairing.player1_id.as_str()].name,
                players[pairing.player2_id.as_str()].name
            )
        })
        .collect_vec();

    if !duplicates.is_empty() {
        return Err(EngineError::DuplicatePendingMatch(duplicates.join(", ")));
    }

    let matches = pairings
        .iter()
        .map(|pairing| Match {
            id: Uuid::new_v4().to_string(),
            session_date: date,
            player1: MatchParticipant::pending(players[pairing.player1_id.as_str()]),
            player2: MatchParticipant::pending(players[pairing.player2_id.as_str()]),
            winner_id: None,
            status: MatchStatus::Pending,
            played_at: None,
            created_at: now
        })
        .collect_vec();

    let added = matches.len() as u32;
    let session = match existing_session {
        Some(session) => {
            let mut session = session.clone();
            for id in selected {
                if !session.players.contains(id) {
                    session.players.push(id.clone());
                }
            }
            session.total_matches += added;
            session.pending_matches += added;
            session
        }
        None => Session {
            date,
            players: selected.to_vec(),
            total_matches: added,
            completed_matches: 0,
            pending_matches: added
        }
    };

    info!("Planned {} matches for {} players on {}", added, selected.len(), date);
    Ok(SessionPlan { session, matches })
}

/// Moves one match from pending to completed on the session counters.
pub fn record_completion(session: &mut Session) {
    session.completed_matches += 1;
    session.pending_matches = session.pending_matches.saturating_sub(1);
    debug!(
        "Session {}: {} completed, {} pending",
        session.date, session.completed_matches, session.pending_matches
    );
}
