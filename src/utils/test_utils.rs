use crate::model::{
    db_structs::{Match, MatchHistoryRecord, MatchParticipant, Player, PlayerId},
    rating_utils::create_player,
    structures::match_status::MatchStatus
};
use chrono::{DateTime, NaiveDate, Utc};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

pub const OPPONENT_ID: &str = "opponent-id";

/// Parses an RFC 3339 literal. Test fixtures only.
pub fn timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|e| panic!("Invalid timestamp literal {value}: {e}"))
        .with_timezone(&Utc)
}

pub fn generate_player(id: &str, rating: i32) -> Player {
    create_player(id, &format!("Player {id}"), rating, timestamp("2025-01-01T00:00:00Z"))
}

pub fn generate_players(n: usize, rating: i32) -> Vec<Player> {
    (1..=n).map(|i| generate_player(&format!("p{i}"), rating)).collect()
}

/// A completed record between `player_id` and [`OPPONENT_ID`].
///
/// `player_id` takes `delta`, the opponent the opposite. The positive side is
/// recorded as the 5-3 winner.
pub fn generate_history_record(
    player_id: &str,
    is_player1: bool,
    delta: i32,
    played_at: &str
) -> MatchHistoryRecord {
    if is_player1 {
        generate_match_record(player_id, OPPONENT_ID, delta, -delta, played_at)
    } else {
        generate_match_record(OPPONENT_ID, player_id, -delta, delta, played_at)
    }
}

/// A completed record between two players with explicit deltas.
pub fn generate_match_record(
    player1_id: &str,
    player2_id: &str,
    player1_delta: i32,
    player2_delta: i32,
    played_at: &str
) -> MatchHistoryRecord {
    let played_at = timestamp(played_at);
    let player1_won = player1_delta > 0;
    let (winner_id, winner_name) = if player1_won {
        (player1_id, format!("Player {player1_id}"))
    } else {
        (player2_id, format!("Player {player2_id}"))
    };

    MatchHistoryRecord {
        id: Uuid::new_v4().to_string(),
        session_date: played_at.date_naive(),
        player1_id: player1_id.to_string(),
        player1_name: format!("Player {player1_id}"),
        player1_score: if player1_won { 5 } else { 3 },
        player1_rating_change: player1_delta,
        player2_id: player2_id.to_string(),
        player2_name: format!("Player {player2_id}"),
        player2_score: if player1_won { 3 } else { 5 },
        player2_rating_change: player2_delta,
        winner_id: winner_id.to_string(),
        winner_name,
        played_at,
        created_at: played_at
    }
}

pub fn generate_pending_match(player1: &Player, player2: &Player, session_date: NaiveDate) -> Match {
    Match {
        id: Uuid::new_v4().to_string(),
        session_date,
        player1: MatchParticipant::pending(player1),
        player2: MatchParticipant::pending(player2),
        winner_id: None,
        status: MatchStatus::Pending,
        played_at: None,
        created_at: timestamp("2025-01-01T00:00:00Z")
    }
}

/// Random winner and a non-tied score line for each of `n` pairings drawn
/// from `player_ids`. Seeded so runs are reproducible.
pub fn generate_results(n: usize, player_ids: &[PlayerId], seed: u64) -> Vec<(PlayerId, PlayerId, u32, u32)> {
    if player_ids.len() < 2 {
        panic!("At least 2 players are required to generate results");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut pair: Vec<&PlayerId> = player_ids.iter().collect();
            pair.shuffle(&mut rng);
            let winner_score = rng.random_range(1..=5);
            let loser_score = rng.random_range(0..winner_score);
            (pair[0].clone(), pair[1].clone(), winner_score, loser_score)
        })
        .collect()
}
