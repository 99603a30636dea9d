use chrono::NaiveDate;
use lazy_static::lazy_static;

// Game constants
pub const INITIAL_RATING: i32 = 1000;
pub const INITIAL_STREAK: i32 = 0;
pub const ROLL_MIN: i32 = -30;
pub const ROLL_MAX: i32 = 30;
pub const BONUS_PER_STREAK_DAY: i32 = 2;
pub const MAX_STREAK_BONUS: i32 = 10;
pub const LEADERBOARD_SIZE: usize = 10;
// Persisted form of `NEVER_PLAYED`
pub const NEVER_PLAYED_ISO: &str = "2000-01-01";

lazy_static! {
    /// Last-play sentinel for players who have never played.
    pub static ref NEVER_PLAYED: NaiveDate =
        NaiveDate::from_ymd_opt(2000, 1, 1).expect("2000-01-01 is a valid calendar date");
}
