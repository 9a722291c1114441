//! Post-match rating calculator.
//!
//! Standard logistic Elo with a fixed K factor and a flat shutout bonus
//! for a `5-0` result.

use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{SHUTOUT_BONUS_RATIO, SHUTOUT_LOSER_SCORE, SHUTOUT_WINNER_SCORE},
    rating_utils::{expected_score, round_half_up}
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub winner_new_rating: i32,
    pub loser_new_rating: i32,
    pub winner_delta: i32,
    pub loser_delta: i32,
    /// The winner's pre-match expectation, in `(0, 1)`
    pub expected_win_probability: f64,
    /// `None` means "not a shutout", which is distinct from a zero bonus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutout_bonus: Option<i32>
}

/// Computes both sides' deltas for a completed match.
///
/// The two base deltas come from two separate expectations and are rounded
/// independently, so their magnitudes may differ by one point. New ratings are
/// `old + delta` per side.
///
/// Callers must have rejected tied scores already; the winner/loser split is
/// taken as given.
pub fn compute_rating_change(
    winner_rating: i32,
    loser_rating: i32,
    k_factor: f64,
    winner_score: Option<u32>,
    loser_score: Option<u32>
) -> RatingChange {
    let expected_winner = expected_score(winner_rating, loser_rating);
    let expected_loser = expected_score(loser_rating, winner_rating);

    let mut winner_delta = round_half_up(k_factor * (1.0 - expected_winner));
    let mut loser_delta = round_half_up(k_factor * (0.0 - expected_loser));

    let shutout_bonus = if is_shutout(winner_score, loser_score) {
        let bonus = round_half_up(SHUTOUT_BONUS_RATIO * winner_delta.abs() as f64);
        winner_delta += bonus;
        loser_delta -= bonus;
        Some(bonus)
    } else {
        None
    };

    RatingChange {
        winner_new_rating: winner_rating + winner_delta,
        loser_new_rating: loser_rating + loser_delta,
        winner_delta,
        loser_delta,
        expected_win_probability: expected_winner,
        shutout_bonus
    }
}

/// Only the literal race-to-5 whitewash counts.
fn is_shutout(winner_score: Option<u32>, loser_score: Option<u32>) -> bool {
    matches!(
        (winner_score, loser_score),
        (Some(SHUTOUT_WINNER_SCORE), Some(SHUTOUT_LOSER_SCORE))
    )
}

/// Renders a delta with an explicit sign, `+0` included.
pub fn format_rating_change(delta: i32) -> String {
    if delta >= 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}
