use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError}
};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::RatingConfig,
    error::EngineError,
    model::{
        db_structs::{Match, MatchHistoryRecord, MatchParticipant, MatchResultInput, Player, PlayerId},
        elo::{compute_rating_change, format_rating_change, RatingChange},
        history::{reconstruct_history, RatingHistory},
        monthly_history::{reconstruct_monthly_history, MonthlyHistory},
        rating_utils::create_player,
        structures::{
            change_magnitude::ChangeMagnitude, match_status::MatchStatus, player_stats::MatchOutcome
        }
    },
    utils::progress_utils::progress_bar
};

/// Output of a successful resolution: the completed match, its ledger entry
/// and the calculator result it was built from.
#[derive(Debug, Clone)]
pub struct ResolvedMatch {
    pub resolved: Match,
    pub record: MatchHistoryRecord,
    pub change: RatingChange
}

/// A player whose stored rating is not explained by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDrift {
    pub player_id: PlayerId,
    pub stored: i32,
    pub replayed: i32
}

impl RatingDrift {
    pub fn offset(&self) -> i32 {
        self.stored - self.replayed
    }
}

/// Storage for current ratings plus the append-only match ledger.
///
/// Implementations must make [`RatingLedger::resolve_match`] a single
/// transaction: both ratings are read, updated and the record appended with no
/// other writer in between. [`RatingLedger::apply_delta`] is the atomic
/// increment used for anything outside a match.
pub trait RatingLedger {
    fn rating(&self, player_id: &str) -> Result<i32, EngineError>;

    fn apply_delta(&self, player_id: &str, delta: i32) -> Result<i32, EngineError>;

    fn resolve_match(
        &self,
        m: &Match,
        result: &MatchResultInput,
        played_at: DateTime<Utc>
    ) -> Result<ResolvedMatch, EngineError>;

    fn records(&self) -> Vec<MatchHistoryRecord>;
}

#[derive(Default)]
struct LedgerState {
    // Kept sorted by rating, highest first
    leaderboard: IndexMap<PlayerId, Player>,
    // Rating each player entered the ledger with, the anchor for drift checks
    initial_ratings: HashMap<PlayerId, i32>,
    records: Vec<MatchHistoryRecord>,
    resolved_match_ids: HashSet<String>
}

impl LedgerState {
    fn sort(&mut self) {
        self.leaderboard.sort_by(|_, a, _, b| b.rating.cmp(&a.rating));
    }

    fn current_rating(&self, player_id: &str) -> Result<i32, EngineError> {
        self.leaderboard
            .get(player_id)
            .map(|p| p.rating)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))
    }

    fn apply(
        &mut self,
        player_id: &str,
        delta: i32,
        outcome: Option<MatchOutcome>
    ) -> Result<i32, EngineError> {
        let player = self
            .leaderboard
            .get_mut(player_id)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;

        player.rating += delta;
        if let Some(outcome) = outcome {
            player.stats.record(outcome, player.rating);
        }

        Ok(player.rating)
    }
}

/// In-memory [`RatingLedger`]. One mutex guards the leaderboard and the ledger
/// together, so it can be shared across threads behind an `Arc`.
pub struct RatingTracker {
    config: RatingConfig,
    state: Mutex<LedgerState>
}

impl Default for RatingTracker {
    fn default() -> Self {
        Self::new(RatingConfig::default())
    }
}

impl RatingTracker {
    pub fn new(config: RatingConfig) -> RatingTracker {
        RatingTracker {
            config,
            state: Mutex::new(LedgerState::default())
        }
    }

    pub fn with_players(config: RatingConfig, players: Vec<Player>) -> RatingTracker {
        let tracker = RatingTracker::new(config);
        for player in players {
            tracker.register(player);
        }

        tracker
    }

    /// Rebuilds ratings by replaying `records` forward from the default rating.
    ///
    /// Every player seen in the ledger is registered at `config.default_rating`
    /// as of their first match, then each record's deltas are applied in
    /// `played_at` order. A record whose winner is neither participant stops
    /// the replay.
    pub fn replay(
        config: RatingConfig,
        records: Vec<MatchHistoryRecord>
    ) -> Result<RatingTracker, EngineError> {
        let tracker = RatingTracker::new(config);
        let bar = progress_bar(records.len() as u64, "Replaying match ledger");

        {
            let mut state = tracker.lock();
            for record in records.into_iter().sorted_by_key(|r| r.played_at) {
                let (p1_outcome, p2_outcome) = if record.winner_id == record.player1_id {
                    (MatchOutcome::Win, MatchOutcome::Loss)
                } else if record.winner_id == record.player2_id {
                    (MatchOutcome::Loss, MatchOutcome::Win)
                } else {
                    return Err(EngineError::WinnerNotInMatch {
                        match_id: record.id.clone(),
                        winner_id: record.winner_id.clone()
                    });
                };

                let participants = [
                    (&record.player1_id, &record.player1_name),
                    (&record.player2_id, &record.player2_name)
                ];
                for (id, name) in participants {
                    if !state.leaderboard.contains_key(id) {
                        state.leaderboard.insert(
                            id.clone(),
                            create_player(id, name, config.default_rating, record.played_at)
                        );
                        state.initial_ratings.insert(id.clone(), config.default_rating);
                    }
                }

                state.apply(&record.player1_id, record.player1_rating_change, Some(p1_outcome))?;
                state.apply(&record.player2_id, record.player2_rating_change, Some(p2_outcome))?;

                state.resolved_match_ids.insert(record.id.clone());
                state.records.push(record);

                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }

            state.sort();
            info!(
                "Replayed {} records for {} players",
                state.records.len(),
                state.leaderboard.len()
            );
        }

        if let Some(bar) = bar {
            bar.finish();
        }

        Ok(tracker)
    }

    pub fn config(&self) -> RatingConfig {
        self.config
    }

    /// Adds a player. For an id already on the leaderboard only the profile
    /// (name, active flag) is updated; rating and stats keep following the
    /// ledger.
    pub fn register(&self, player: Player) {
        let mut state = self.lock();
        if let Some(existing) = state.leaderboard.get_mut(&player.id) {
            debug!("Updating profile of player {}", player.id);
            existing.name = player.name;
            existing.is_active = player.is_active;
            return;
        }

        debug!("Registering player {} at {}", player.id, player.rating);
        state.initial_ratings.insert(player.id.clone(), player.rating);
        state.leaderboard.insert(player.id.clone(), player);
        state.sort();
    }

    pub fn player(&self, player_id: &str) -> Option<Player> {
        self.lock().leaderboard.get(player_id).cloned()
    }

    /// All players, highest rating first. Ties keep registration order.
    pub fn leaderboard(&self) -> Vec<Player> {
        self.lock().leaderboard.values().cloned().collect()
    }

    /// 1-based position on the leaderboard.
    pub fn rank(&self, player_id: &str) -> Option<usize> {
        self.lock().leaderboard.get_index_of(player_id).map(|i| i + 1)
    }

    pub fn history(&self, player_id: &str) -> Result<RatingHistory, EngineError> {
        let state = self.lock();
        let player = state
            .leaderboard
            .get(player_id)
            .ok_or_else(|| EngineError::UnknownPlayer(player_id.to_string()))?;

        Ok(reconstruct_history(
            &state.records,
            player_id,
            player.rating,
            Some(player.created_at)
        ))
    }

    pub fn monthly_history(&self, now: DateTime<Utc>) -> MonthlyHistory {
        reconstruct_monthly_history(&self.lock().records, self.config.default_rating, now)
    }

    /// Players whose stored rating differs from their initial rating plus the
    /// sum of their ledger deltas. Empty when the two are in sync.
    pub fn detect_drift(&self) -> Vec<RatingDrift> {
        let state = self.lock();

        let mut sums: HashMap<&str, i32> = HashMap::new();
        for record in &state.records {
            *sums.entry(record.player1_id.as_str()).or_default() += record.player1_rating_change;
            *sums.entry(record.player2_id.as_str()).or_default() += record.player2_rating_change;
        }

        let drift = state
            .leaderboard
            .values()
            .filter_map(|player| {
                let initial = state
                    .initial_ratings
                    .get(&player.id)
                    .copied()
                    .unwrap_or(self.config.default_rating);
                let replayed = initial + sums.get(player.id.as_str()).copied().unwrap_or(0);

                (replayed != player.rating).then(|| RatingDrift {
                    player_id: player.id.clone(),
                    stored: player.rating,
                    replayed
                })
            })
            .collect_vec();

        for d in &drift {
            warn!(
                "Rating drift for {}: stored {}, ledger replays to {}",
                d.player_id, d.stored, d.replayed
            );
        }

        drift
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate(m: &Match, result: &MatchResultInput) -> Result<(), EngineError> {
        if m.status != MatchStatus::Pending {
            return Err(EngineError::MatchNotPending(m.id.clone()));
        }

        if result.player1_score == result.player2_score {
            return Err(EngineError::EqualScores(result.player1_score));
        }

        let winner_score = if result.winner_id == m.player1.id {
            result.player1_score
        } else if result.winner_id == m.player2.id {
            result.player2_score
        } else {
            return Err(EngineError::WinnerNotInMatch {
                match_id: m.id.clone(),
                winner_id: result.winner_id.clone()
            });
        };

        if winner_score != result.player1_score.max(result.player2_score) {
            return Err(EngineError::WinnerScoreMismatch {
                match_id: m.id.clone(),
                winner_id: result.winner_id.clone()
            });
        }

        Ok(())
    }
}

impl RatingLedger for RatingTracker {
    fn rating(&self, player_id: &str) -> Result<i32, EngineError> {
        self.lock().current_rating(player_id)
    }

    fn apply_delta(&self, player_id: &str, delta: i32) -> Result<i32, EngineError> {
        let mut state = self.lock();
        let rating = state.apply(player_id, delta, None)?;
        state.sort();

        Ok(rating)
    }

    /// Validates the result, then computes the change from the ratings held
    /// right now rather than the snapshot on `m`, so matches scheduled together
    /// and resolved one after another each see the previous result.
    fn resolve_match(
        &self,
        m: &Match,
        result: &MatchResultInput,
        played_at: DateTime<Utc>
    ) -> Result<ResolvedMatch, EngineError> {
        Self::validate(m, result)?;

        let mut state = self.lock();
        if state.resolved_match_ids.contains(&m.id) {
            return Err(EngineError::MatchNotPending(m.id.clone()));
        }

        let player1_rating = state.current_rating(&m.player1.id)?;
        let player2_rating = state.current_rating(&m.player2.id)?;
        let player1_won = result.winner_id == m.player1.id;

        let (winner_rating, loser_rating, winner_score, loser_score) = if player1_won {
            (player1_rating, player2_rating, result.player1_score, result.player2_score)
        } else {
            (player2_rating, player1_rating, result.player2_score, result.player1_score)
        };

        let change = compute_rating_change(
            winner_rating,
            loser_rating,
            self.config.k_factor,
            Some(winner_score),
            Some(loser_score)
        );

        let (player1_delta, player2_delta) = if player1_won {
            (change.winner_delta, change.loser_delta)
        } else {
            (change.loser_delta, change.winner_delta)
        };

        if player1_rating != m.player1.rating_before || player2_rating != m.player2.rating_before {
            debug!(
                "Match {} scheduled at {}/{}, resolving at {}/{}",
                m.id, m.player1.rating_before, m.player2.rating_before, player1_rating, player2_rating
            );
        }

        let resolved = Match {
            player1: completed_participant(&m.player1, player1_rating, result.player1_score, player1_delta),
            player2: completed_participant(&m.player2, player2_rating, result.player2_score, player2_delta),
            winner_id: Some(result.winner_id.clone()),
            status: MatchStatus::Completed,
            played_at: Some(played_at),
            ..m.clone()
        };

        let record = MatchHistoryRecord::from_match(Uuid::new_v4().to_string(), &resolved, played_at)
            .ok_or_else(|| EngineError::IncompleteMatch(m.id.clone()))?;

        let (p1_outcome, p2_outcome) = if player1_won {
            (MatchOutcome::Win, MatchOutcome::Loss)
        } else {
            (MatchOutcome::Loss, MatchOutcome::Win)
        };
        state.apply(&m.player1.id, player1_delta, Some(p1_outcome))?;
        state.apply(&m.player2.id, player2_delta, Some(p2_outcome))?;
        state.records.push(record.clone());
        state.resolved_match_ids.insert(m.id.clone());
        state.sort();

        info!(
            "Resolved match {} [{}]: {} {} ({}), {} {} ({})",
            m.id,
            ChangeMagnitude::from_delta(change.winner_delta),
            m.player1.name,
            result.player1_score,
            format_rating_change(player1_delta),
            m.player2.name,
            result.player2_score,
            format_rating_change(player2_delta)
        );

        Ok(ResolvedMatch {
            resolved,
            record,
            change
        })
    }

    fn records(&self) -> Vec<MatchHistoryRecord> {
        self.lock().records.clone()
    }
}

fn completed_participant(
    participant: &MatchParticipant,
    rating: i32,
    score: u32,
    delta: i32
) -> MatchParticipant {
    MatchParticipant {
        rating_before: rating,
        score: Some(score),
        rating_after: Some(rating + delta),
        rating_delta: Some(delta),
        ..participant.clone()
    }
}
