pub mod constants;
pub mod db_structs;
pub mod elo;
pub mod head_to_head;
pub mod history;
pub mod monthly_history;
pub mod probability;
pub mod rating_tracker;
pub mod rating_utils;
pub mod round_robin;
pub mod session;
pub mod structures;

pub use elo::{compute_rating_change, RatingChange};
pub use history::reconstruct_history;
pub use monthly_history::reconstruct_monthly_history;
pub use probability::{estimate_win_probability, probability_level};
pub use rating_tracker::{RatingLedger, RatingTracker};
pub use round_robin::generate_round_robin;
