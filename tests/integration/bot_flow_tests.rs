use chrono::{Duration, NaiveDate};
use dota_mmr::{
    bot::{actions::Action, classify, handlers::Reply, messages, respond, BotContext, Incoming},
    database::{MemoryStore, PlayerStore},
    model::{clock::FixedClock, ranks::rank_for},
    utils::test_utils::date
};

use crate::common::init_test_env;

fn button(user_id: i64, name: &str, action: Action) -> Incoming {
    Incoming::Button {
        query_id: format!("q-{}", user_id),
        chat_id: user_id,
        user_id,
        name: name.to_string(),
        action: Some(action)
    }
}

fn context_on(day: NaiveDate, store: MemoryStore, seed: u64) -> BotContext<MemoryStore, FixedClock> {
    BotContext::with_seed(store, FixedClock(day), seed)
}

/// Plays every day for two weeks with one skipped day, checking the streak
/// and rating after each play.
#[tokio::test]
async fn test_two_weeks_of_daily_play() {
    init_test_env();
    let start = date(2025, 3, 1);
    let skipped = 6;
    let mut store = MemoryStore::new();
    let mut expected_streak = 0;
    let mut previous_rating = 1000;

    for day in 0..14 {
        if day == skipped {
            expected_streak = 0;
            continue;
        }

        let ctx = context_on(start + Duration::days(day), store, day as u64);
        let reply = respond(&ctx, &button(1, "Anna", Action::Play)).await.unwrap();
        assert!(matches!(reply, Reply::Message { .. }), "day {}", day);

        expected_streak += 1;
        let bonus = (expected_streak * 2).min(10);
        let player = ctx.store.get(1).await.unwrap().unwrap();

        assert_eq!(player.streak, expected_streak, "day {}", day);
        assert!(
            (previous_rating - 30 + bonus..=previous_rating + 30 + bonus).contains(&player.rating),
            "day {}: rating {} from {}",
            day,
            player.rating,
            previous_rating
        );
        assert!(reply.text().ends_with(&format!("Твой новый MMR: {} ({})", player.rating, rank_for(player.rating))));

        // A second press on the same day changes nothing
        let again = respond(&ctx, &button(1, "Anna", Action::Play)).await.unwrap();
        assert_eq!(
            again,
            Reply::Alert {
                text: messages::ALREADY_PLAYED.to_string()
            }
        );
        assert_eq!(ctx.store.get(1).await.unwrap().unwrap(), player);

        previous_rating = player.rating;
        store = MemoryStore::with_players([player]);
    }
}

#[tokio::test]
async fn test_players_are_independent() {
    init_test_env();
    let ctx = context_on(date(2025, 4, 1), MemoryStore::new(), 11);

    respond(&ctx, &button(1, "Anna", Action::Play)).await.unwrap();
    let other = respond(&ctx, &button(2, "Boris", Action::Play)).await.unwrap();

    assert!(matches!(other, Reply::Message { .. }));
    assert_eq!(ctx.store.get(1).await.unwrap().unwrap().streak, 1);
    assert_eq!(ctx.store.get(2).await.unwrap().unwrap().streak, 1);

    let top = respond(&ctx, &button(3, "Vera", Action::Top)).await.unwrap();
    assert_eq!(top.text().lines().count(), 4);
    // Looking at the leaderboard does not register the viewer
    assert_eq!(ctx.store.get(3).await.unwrap(), None);
}

#[tokio::test]
async fn test_profile_before_menu_creates_player() {
    init_test_env();
    let ctx = context_on(date(2025, 4, 1), MemoryStore::new(), 5);

    let reply = respond(&ctx, &button(8, "Gleb", Action::Profile)).await.unwrap();

    assert_eq!(reply.text(), "👤 Gleb\nMMR: 1000\nРанг: Страж 2\nСерия: 0");
    assert!(ctx.store.get(8).await.unwrap().is_some());
}

#[test]
fn test_classify_ignores_plain_text() {
    let update = serde_json::from_str(
        r#"{"update_id": 1, "message": {"message_id": 1, "from": {"id": 1, "is_bot": false, "first_name": "A"}, "chat": {"id": 1}, "text": "hi"}}"#
    )
    .unwrap();

    assert_eq!(classify(&update, None), Incoming::Ignored);
}
