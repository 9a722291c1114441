use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{FAVORITE_THRESHOLD, UNDERDOG_THRESHOLD},
    rating_utils::{expected_score, round_half_up},
    structures::probability_level::ProbabilityLevel
};

/// Integer win percentages for an unplayed pairing.
///
/// Each side is rounded on its own, so the two may add up to 99, 100 or 101.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinProbability {
    pub probability_a: u8,
    pub probability_b: u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedPoints {
    /// Points A would gain by winning
    pub points_a: i32,
    /// Points B would gain by winning
    pub points_b: i32
}

pub fn estimate_win_probability(rating_a: i32, rating_b: i32) -> WinProbability {
    WinProbability {
        probability_a: to_percent(expected_score(rating_a, rating_b)),
        probability_b: to_percent(expected_score(rating_b, rating_a))
    }
}

/// `> 52` favorite, `< 48` underdog, otherwise even.
pub fn probability_level(probability: u8) -> ProbabilityLevel {
    if probability > FAVORITE_THRESHOLD {
        ProbabilityLevel::Favorite
    } else if probability < UNDERDOG_THRESHOLD {
        ProbabilityLevel::Underdog
    } else {
        ProbabilityLevel::Even
    }
}

/// Base (non-shutout) gain for each side should it win.
pub fn expected_points(rating_a: i32, rating_b: i32, k_factor: f64) -> ExpectedPoints {
    ExpectedPoints {
        points_a: round_half_up(k_factor * (1.0 - expected_score(rating_a, rating_b))),
        points_b: round_half_up(k_factor * (1.0 - expected_score(rating_b, rating_a)))
    }
}

fn to_percent(expectation: f64) -> u8 {
    round_half_up(100.0 * expectation).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::{estimate_win_probability, expected_points, probability_level};
    use crate::model::{constants::K_FACTOR, structures::probability_level::ProbabilityLevel};

    #[test]
    fn test_equal_ratings_even() {
        for r in [0, 100, 1200, 2400] {
            let result = estimate_win_probability(r, r);
            assert_eq!(result.probability_a, 50);
            assert_eq!(result.probability_b, 50);
        }
    }

    #[test]
    fn test_slight_advantage() {
        let result = estimate_win_probability(1216, 1184);

        assert_eq!(result.probability_a, 55);
        assert_eq!(result.probability_b, 45);
    }

    #[test]
    fn test_large_gap() {
        let result = estimate_win_probability(1300, 1100);

        assert_eq!(result.probability_a, 76);
        assert_eq!(result.probability_b, 24);
    }

    #[test]
    fn test_extreme_gap() {
        let result = estimate_win_probability(1500, 1000);

        assert!(result.probability_a > 90);
        assert!(result.probability_b < 10);
    }

    #[test]
    fn test_player_b_higher() {
        let result = estimate_win_probability(1184, 1216);

        assert!(result.probability_a < 50);
        assert!(result.probability_b > 50);
    }

    #[test]
    fn test_sum_within_rounding() {
        for (a, b) in [(1250, 1180), (1203, 1200), (1000, 1777), (1442, 1101)] {
            let result = estimate_win_probability(a, b);
            let sum = result.probability_a as u32 + result.probability_b as u32;
            assert!((99..=101).contains(&sum), "{a} vs {b} summed to {sum}");
        }
    }

    #[test]
    fn test_higher_rating_increases_probability() {
        let mut last = 50;
        for gap in (50..=400).step_by(50) {
            let p = estimate_win_probability(1200 + gap, 1200).probability_a;
            assert!(p > 50);
            assert!(p > last, "gap {gap} gave {p}, previous {last}");
            last = p;
        }
    }

    #[test]
    fn test_probability_level_boundaries() {
        assert_eq!(probability_level(52), ProbabilityLevel::Even);
        assert_eq!(probability_level(53), ProbabilityLevel::Favorite);
        assert_eq!(probability_level(48), ProbabilityLevel::Even);
        assert_eq!(probability_level(47), ProbabilityLevel::Underdog);
    }

    #[test]
    fn test_probability_level_ranges() {
        for p in [53, 55, 76, 100] {
            assert_eq!(probability_level(p), ProbabilityLevel::Favorite);
        }
        for p in [0, 24, 45, 47] {
            assert_eq!(probability_level(p), ProbabilityLevel::Underdog);
        }
        for p in 48..=52 {
            assert_eq!(probability_level(p), ProbabilityLevel::Even);
        }
    }

    #[test]
    fn test_expected_points() {
        let even = expected_points(1200, 1200, K_FACTOR);
        assert_eq!(even.points_a, 16);
        assert_eq!(even.points_b, 16);

        let upset = expected_points(1000, 1400, K_FACTOR);
        assert_eq!(upset.points_a, 29);
        assert_eq!(upset.points_b, 3);
    }
}
