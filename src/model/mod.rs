pub mod clock;
pub mod constants;
pub mod ranks;
pub mod rating;

pub use clock::{Clock, FixedClock, UtcClock};
pub use ranks::{rank_for, RankTable, RankThreshold};
pub use rating::{attempt_daily_play, play_today, roll_delta, DailyPlayError, PlayError, PlayOutcome};
