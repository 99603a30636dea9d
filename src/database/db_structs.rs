use crate::model::constants::{INITIAL_RATING, INITIAL_STREAK, NEVER_PLAYED};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Platform user id
    pub id: i64,
    pub name: String,
    pub rating: i32,
    /// `NEVER_PLAYED` until the first successful play
    pub last_play_date: NaiveDate,
    pub streak: i32
}

impl PlayerRecord {
    /// A player who has never played.
    pub fn new(id: i64, name: &str) -> PlayerRecord {
        PlayerRecord {
            id,
            name: name.to_string(),
            rating: INITIAL_RATING,
            last_play_date: *NEVER_PLAYED,
            streak: INITIAL_STREAK
        }
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: &PlayerUpdate) {
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(last_play_date) = update.last_play_date {
            self.last_play_date = last_play_date;
        }
        if let Some(streak) = update.streak {
            self.streak = streak;
        }
    }
}

/// Partial update of a [`PlayerRecord`]. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub rating: Option<i32>,
    pub last_play_date: Option<NaiveDate>,
    pub streak: Option<i32>
}

impl PlayerUpdate {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.last_play_date.is_none() && self.streak.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub rating: i32
}
