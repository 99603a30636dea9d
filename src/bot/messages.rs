use crate::{
    database::db_structs::{LeaderboardEntry, PlayerRecord},
    model::{ranks::rank_for, rating::PlayOutcome}
};
use itertools::Itertools;

pub const ALREADY_PLAYED: &str = "Ты уже играл сегодня! Возвращайся завтра 🔥";
pub const STORE_UNAVAILABLE: &str = "Что-то пошло не так, попробуй позже 🙏";

pub fn greeting(name: &str) -> String {
    format!(
        "Привет, {}! 👋\nНажми 'Играть', чтобы получить свой рейтинг на сегодня!",
        name
    )
}

pub fn play_result(outcome: &PlayOutcome) -> String {
    let verb = if outcome.delta >= 0 { "прибавил" } else { "потерял" };

    format!(
        "Ты {} {} MMR.\n🔥 Серия: {} дней.\nТвой новый MMR: {} ({})",
        verb,
        outcome.delta.abs(),
        outcome.new_streak,
        outcome.new_rating,
        outcome.rank
    )
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> String {
    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} — {} ({})\n", i + 1, entry.name, entry.rating, rank_for(entry.rating)))
        .join("");

    format!("🏆 Топ игроков:\n\n{}", lines)
}

pub fn profile(player: &PlayerRecord) -> String {
    format!(
        "👤 {}\nMMR: {}\nРанг: {}\nСерия: {}",
        player.name,
        player.rating,
        rank_for(player.rating),
        player.streak
    )
}
