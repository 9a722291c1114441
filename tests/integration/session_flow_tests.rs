use crate::common::init_test_env;
use chrono::Duration;
use elo_ladder::{
    config::RatingConfig,
    error::EngineError,
    model::{
        db_structs::{MatchResultInput, PlayerId},
        rating_tracker::{RatingLedger, RatingTracker},
        session::{plan_session, record_completion}
    },
    utils::test_utils::{generate_pending_match, generate_players, generate_results, timestamp}
};
use rayon::prelude::*;

fn ids(tracker: &RatingTracker) -> Vec<PlayerId> {
    let mut ids: Vec<PlayerId> = tracker.leaderboard().into_iter().map(|p| p.id).collect();
    ids.sort();
    ids
}

#[test]
fn test_weekly_sessions_to_history() {
    init_test_env();

    let config = RatingConfig::default();
    let tracker = RatingTracker::with_players(config, generate_players(4, config.default_rating));
    let roster_ids = ids(&tracker);
    let start = timestamp("2025-01-05T18:00:00Z");

    for week in 0..3 {
        let now = start + Duration::weeks(week);
        let plan = plan_session(now.date_naive(), &tracker.leaderboard(), &roster_ids, None, &[], now)
            .unwrap();
        let mut session = plan.session;

        for (i, m) in plan.matches.iter().enumerate() {
            let player1_wins = (i as i64 + week) % 2 == 0;
            let result = MatchResultInput {
                player1_score: if player1_wins { 5 } else { 2 },
                player2_score: if player1_wins { 3 } else { 5 },
                winner_id: if player1_wins { m.player1.id.clone() } else { m.player2.id.clone() }
            };

            tracker
                .resolve_match(m, &result, now + Duration::minutes(10 * i as i64))
                .unwrap();
            record_completion(&mut session);
        }

        assert_eq!(session.total_matches, 6);
        assert_eq!(session.completed_matches, 6);
        assert_eq!(session.pending_matches, 0);
    }

    assert_eq!(tracker.records().len(), 18);
    assert!(tracker.detect_drift().is_empty());

    for player in tracker.leaderboard() {
        let history = tracker.history(&player.id).unwrap();

        assert_eq!(history.current_rating, player.rating);
        assert_eq!(history.points.len(), 10);
        assert_eq!(history.points[0].rating, config.default_rating);
        assert_eq!(history.lifetime_change, player.rating - config.default_rating);
        assert_eq!(history.highest, player.stats.highest_rating);
        assert_eq!(history.lowest, player.stats.lowest_rating);
        assert_eq!(player.stats.total_matches, 9);
    }

    let monthly = tracker.monthly_history(timestamp("2025-01-31T00:00:00Z"));
    assert_eq!(monthly.months, vec!["01/25"]);
    for series in &monthly.players {
        assert_eq!(series.points.len(), 1);
        assert!(series.points[0].is_current_month);
        assert_eq!(series.points[0].rating, tracker.rating(&series.player_id).unwrap());
    }

    let replayed = RatingTracker::replay(config, tracker.records()).unwrap();
    for player in tracker.leaderboard() {
        assert_eq!(replayed.rating(&player.id).unwrap(), player.rating);
    }
}

#[test]
fn test_pending_pairings_block_replanning_until_resolved() {
    init_test_env();

    let config = RatingConfig::default();
    let tracker = RatingTracker::with_players(config, generate_players(3, config.default_rating));
    let roster_ids = ids(&tracker);
    let now = timestamp("2025-02-01T18:00:00Z");
    let date = now.date_naive();

    let first = plan_session(date, &tracker.leaderboard(), &roster_ids[..2], None, &[], now).unwrap();
    let blocked = plan_session(
        date,
        &tracker.leaderboard(),
        &roster_ids,
        Some(&first.session),
        &first.matches,
        now
    );
    assert!(matches!(blocked, Err(EngineError::DuplicatePendingMatch(_))));

    let m = &first.matches[0];
    let resolved = tracker
        .resolve_match(
            m,
            &MatchResultInput {
                player1_score: 5,
                player2_score: 0,
                winner_id: m.player1.id.clone()
            },
            now
        )
        .unwrap();
    let mut session = first.session.clone();
    record_completion(&mut session);

    let second = plan_session(
        date,
        &tracker.leaderboard(),
        &roster_ids,
        Some(&session),
        &[resolved.resolved],
        now
    )
    .unwrap();

    assert_eq!(second.matches.len(), 3);
    assert_eq!(second.session.players.len(), 3);
    assert_eq!(second.session.total_matches, 4);
    assert_eq!(second.session.completed_matches, 1);
    assert_eq!(second.session.pending_matches, 3);
    // The winner's new rating is what the new pairings snapshot
    assert_eq!(second.matches[0].player1.rating_before, 1224);
}

#[test]
fn test_parallel_resolution_is_serialized() {
    init_test_env();

    let config = RatingConfig::default();
    let tracker = RatingTracker::with_players(config, generate_players(10, config.default_rating));
    let roster_ids = ids(&tracker);
    let now = timestamp("2025-03-01T18:00:00Z");

    let plan = plan_session(now.date_naive(), &tracker.leaderboard(), &roster_ids, None, &[], now)
        .unwrap();
    assert_eq!(plan.matches.len(), 45);

    plan.matches.par_iter().for_each(|m| {
        let result = MatchResultInput {
            player1_score: 5,
            player2_score: 4,
            winner_id: m.player1.id.clone()
        };
        tracker.resolve_match(m, &result, now).unwrap();
    });

    assert_eq!(tracker.records().len(), 45);
    assert!(tracker.detect_drift().is_empty());
    for player in tracker.leaderboard() {
        assert_eq!(player.stats.total_matches, 9);
    }
}

#[test]
fn test_seeded_results_keep_ledger_and_history_in_sync() {
    init_test_env();

    let config = RatingConfig::default();
    let tracker = RatingTracker::with_players(config, generate_players(6, config.default_rating));
    let roster_ids = ids(&tracker);
    let start = timestamp("2025-01-03T18:00:00Z");

    // Sessions on Jan 3, Jan 23, Feb 12 and Mar 4
    for (session, seed) in [11, 12, 13, 14].into_iter().enumerate() {
        let now = start + Duration::days(20 * session as i64);
        let results = generate_results(15, &roster_ids, seed);

        for (i, (winner, loser, winner_score, loser_score)) in results.into_iter().enumerate() {
            let m = generate_pending_match(
                &tracker.player(&winner).unwrap(),
                &tracker.player(&loser).unwrap(),
                now.date_naive()
            );
            let result = MatchResultInput {
                player1_score: winner_score,
                player2_score: loser_score,
                winner_id: winner
            };

            tracker
                .resolve_match(&m, &result, now + Duration::minutes(i as i64))
                .unwrap();
        }
    }

    assert_eq!(tracker.records().len(), 60);
    assert!(tracker.detect_drift().is_empty());

    for player in tracker.leaderboard() {
        let history = tracker.history(&player.id).unwrap();

        assert_eq!(history.current_rating, player.rating);
        assert_eq!(history.points[0].rating, config.default_rating);
        assert_eq!(history.points.last().unwrap().rating, player.rating);
        assert_eq!(history.lifetime_change, player.rating - config.default_rating);
    }

    let monthly = tracker.monthly_history(timestamp("2025-03-20T00:00:00Z"));
    assert_eq!(monthly.months, vec!["01/25", "02/25", "03/25"]);
    for series in &monthly.players {
        let latest = series.points.last().unwrap();
        assert!(latest.is_current_month);
        assert_eq!(latest.rating, tracker.rating(&series.player_id).unwrap());
    }
}
