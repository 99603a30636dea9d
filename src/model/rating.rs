use super::{
    constants::{BONUS_PER_STREAK_DAY, MAX_STREAK_BONUS, ROLL_MAX, ROLL_MIN},
    ranks::rank_for
};
use crate::database::{
    db_structs::{PlayerRecord, PlayerUpdate},
    store::{PlayerStore, StoreError}
};
use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    #[error("Player has already played today")]
    AlreadyPlayedToday
}

#[derive(Debug, Error)]
pub enum DailyPlayError {
    #[error(transparent)]
    Play(#[from] PlayError),

    #[error(transparent)]
    Store(#[from] StoreError)
}

/// Result of a successful daily play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub delta: i32,
    pub bonus: i32,
    pub new_streak: i32,
    pub new_rating: i32,
    pub rank: &'static str,
    pub played_on: NaiveDate
}

impl PlayOutcome {
    /// The three fields persisted together after a play.
    pub fn as_update(&self) -> PlayerUpdate {
        PlayerUpdate {
            rating: Some(self.new_rating),
            last_play_date: Some(self.played_on),
            streak: Some(self.new_streak)
        }
    }
}

/// Uniform random term of the daily delta, in `[ROLL_MIN, ROLL_MAX]`.
pub fn roll_delta<R: Rng>(rng: &mut R) -> i32 {
    rng.random_range(ROLL_MIN..=ROLL_MAX)
}

/// Streak after playing on `today`. Only a play exactly one day after the last
/// one continues the streak; any other gap (including a clock that moved
/// backwards) starts over at 1.
pub fn next_streak(last_play_date: NaiveDate, today: NaiveDate, streak: i32) -> i32 {
    if (today - last_play_date).num_days() == 1 {
        streak.saturating_add(1)
    } else {
        1
    }
}

pub fn streak_bonus(streak: i32) -> i32 {
    streak.saturating_mul(BONUS_PER_STREAK_DAY).min(MAX_STREAK_BONUS)
}

/// # Daily play
///
/// Decides whether `player` may play on `today` and computes the new state.
/// `roll` is the random term of the delta, normally produced by [`roll_delta`].
///
/// - Same day as the last play: [`PlayError::AlreadyPlayedToday`].
/// - Otherwise the streak is advanced or reset, the bonus is
///   `min(streak * 2, 10)` and the rating moves by `roll + bonus`.
///
/// Nothing is written here; see [`play_today`] for the persisted flow.
pub fn attempt_daily_play(player: &PlayerRecord, today: NaiveDate, roll: i32) -> Result<PlayOutcome, PlayError> {
    if today == player.last_play_date {
        return Err(PlayError::AlreadyPlayedToday);
    }

    let new_streak = next_streak(player.last_play_date, today, player.streak);
    let bonus = streak_bonus(new_streak);
    let delta = roll + bonus;
    // Stored values are unbounded INTEGER columns
    let new_rating = player.rating.saturating_add(delta);

    Ok(PlayOutcome {
        delta,
        bonus,
        new_streak,
        new_rating,
        rank: rank_for(new_rating),
        played_on: today
    })
}

/// Loads (or creates) the player, applies [`attempt_daily_play`] and writes rating,
/// last-play date and streak back in a single update. Nothing is written when the
/// player has already played today.
pub async fn play_today<S: PlayerStore>(
    store: &S,
    id: i64,
    name: &str,
    today: NaiveDate,
    roll: i32
) -> Result<PlayOutcome, DailyPlayError> {
    let player = store.get_or_create(id, name).await?;

    let outcome = match attempt_daily_play(&player, today, roll) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!("Player {} already played on {}", id, today);
            return Err(e.into());
        }
    };

    store.update(id, &outcome.as_update()).await?;

    info!(
        "Player {} played: {:+} MMR (bonus {}), streak {}, rating {} ({})",
        id, outcome.delta, outcome.bonus, outcome.new_streak, outcome.new_rating, outcome.rank
    );

    Ok(outcome)
}
