use crate::{database::db_structs::PlayerRecord, model::constants::NEVER_PLAYED};
use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Test dates must be valid")
}

/// Seeded RNG for reproducible rolls
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn generate_player(
    id: i64,
    name: &str,
    rating: i32,
    last_play_date: Option<NaiveDate>,
    streak: i32
) -> PlayerRecord {
    PlayerRecord {
        id,
        name: name.to_string(),
        rating,
        last_play_date: last_play_date.unwrap_or(*NEVER_PLAYED),
        streak
    }
}

/// `n` players with ids `1..=n` and ratings spread ±500 around 1000.
pub fn generate_players(n: i64, seed: u64) -> Vec<PlayerRecord> {
    let mut rng = seeded_rng(seed);

    (1..=n)
        .map(|id| {
            let rating = 1000 + rng.random_range(-500..=500);
            let streak = rng.random_range(0..=7);

            generate_player(id, &format!("Player{}", id), rating, None, streak)
        })
        .collect()
}
