// Rating constants
pub const DEFAULT_RATING: i32 = 1200;
pub const K_FACTOR: f64 = 32.0;
pub const RATING_SCALE: f64 = 400.0;
// Shutout rule, literal race-to-5 result only
pub const SHUTOUT_WINNER_SCORE: u32 = 5;
pub const SHUTOUT_LOSER_SCORE: u32 = 0;
pub const SHUTOUT_BONUS_RATIO: f64 = 0.5;
// Probability level thresholds (percent)
pub const FAVORITE_THRESHOLD: u8 = 52;
pub const UNDERDOG_THRESHOLD: u8 = 48;
// Chart labels
pub const MATCH_LABEL_FORMAT: &str = "%b %d %H:%M";
pub const CREATED_LABEL_FORMAT: &str = "%b %d";
pub const MONTH_LABEL_FORMAT: &str = "%m/%y";
pub const CURRENT_LABEL: &str = "Now";
