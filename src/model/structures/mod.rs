pub mod change_magnitude;
pub mod match_status;
pub mod player_stats;
pub mod probability_level;
