use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss
}

/// Running per-player aggregates, updated once per resolved match.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    /// Fraction in `[0, 1]`
    pub win_rate: f64,
    pub highest_rating: i32,
    pub lowest_rating: i32,
    /// Positive for a win streak, negative for a losing streak
    pub current_streak: i32,
    pub longest_win_streak: u32,
    pub longest_lose_streak: u32
}

impl PlayerStats {
    pub fn new(starting_rating: i32) -> PlayerStats {
        PlayerStats {
            total_matches: 0,
            wins: 0,
            losses: 0,
            win_rate: 0.0,
            highest_rating: starting_rating,
            lowest_rating: starting_rating,
            current_streak: 0,
            longest_win_streak: 0,
            longest_lose_streak: 0
        }
    }

    /// Folds one result into the stats. `new_rating` is the rating after the match.
    pub fn record(&mut self, outcome: MatchOutcome, new_rating: i32) {
        self.total_matches += 1;
        match outcome {
            MatchOutcome::Win => {
                self.wins += 1;
                self.current_streak = if self.current_streak >= 0 {
                    self.current_streak + 1
                } else {
                    1
                };
                self.longest_win_streak = self.longest_win_streak.max(self.current_streak.unsigned_abs());
            }
            MatchOutcome::Loss => {
                self.losses += 1;
                self.current_streak = if self.current_streak <= 0 {
                    self.current_streak - 1
                } else {
                    -1
                };
                self.longest_lose_streak = self.longest_lose_streak.max(self.current_streak.unsigned_abs());
            }
        }

        self.win_rate = self.wins as f64 / self.total_matches as f64;
        self.highest_rating = self.highest_rating.max(new_rating);
        self.lowest_rating = self.lowest_rating.min(new_rating);
    }
}
