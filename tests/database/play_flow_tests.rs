use chrono::Duration;
use dota_mmr::{
    bot::{handlers, handlers::Reply, messages, BotContext},
    database::{DbClient, PlayerStore},
    model::{
        clock::FixedClock,
        rating::{play_today, DailyPlayError, PlayError}
    },
    utils::test_utils::{date, generate_player}
};
use serial_test::serial;

use super::test_helpers::TestDatabase;
use crate::common::init_test_env;

async fn setup() -> (TestDatabase, DbClient) {
    init_test_env();
    let test_db = TestDatabase::new().await.expect("Failed to create test database");
    let db_client = DbClient::connect(&test_db.connection_string)
        .await
        .expect("Failed to connect");

    (test_db, db_client)
}

#[tokio::test]
#[serial]
async fn test_new_player_can_play_immediately() {
    let (_test_db, db_client) = setup().await;
    let today = date(2025, 9, 1);

    let outcome = play_today(&db_client, 1, "Anna", today, -4).await.unwrap();
    let player = db_client.get(1).await.unwrap().unwrap();

    assert_eq!(outcome.new_streak, 1);
    assert_eq!(outcome.delta, -2);
    assert_eq!(player.rating, 998);
    assert_eq!(player.streak, 1);
    assert_eq!(player.last_play_date, today);
}

#[tokio::test]
#[serial]
async fn test_second_play_same_day_is_rejected() {
    let (_test_db, db_client) = setup().await;
    let today = date(2025, 9, 1);

    play_today(&db_client, 1, "Anna", today, 10).await.unwrap();
    let before = db_client.get(1).await.unwrap().unwrap();

    let second = play_today(&db_client, 1, "Anna", today, 10).await;
    let after = db_client.get(1).await.unwrap().unwrap();

    assert!(matches!(second, Err(DailyPlayError::Play(PlayError::AlreadyPlayedToday))));
    assert_eq!(before, after);
}

#[tokio::test]
#[serial]
async fn test_streak_persisted_across_days() {
    let (test_db, db_client) = setup().await;
    let today = date(2025, 9, 10);
    test_db
        .seed_players(&[
            generate_player(1, "Yesterday", 1500, Some(today - Duration::days(1)), 3),
            generate_player(2, "Gap", 1500, Some(today - Duration::days(5)), 3)
        ])
        .await
        .unwrap();

    let continued = play_today(&db_client, 1, "Yesterday", today, 0).await.unwrap();
    let reset = play_today(&db_client, 2, "Gap", today, 0).await.unwrap();

    assert_eq!(continued.new_streak, 4);
    assert_eq!(reset.new_streak, 1);
    assert_eq!(db_client.get(1).await.unwrap().unwrap().streak, 4);
    assert_eq!(db_client.get(2).await.unwrap().unwrap().streak, 1);
}

#[tokio::test]
#[serial]
async fn test_bot_flow_against_database() {
    let (_test_db, db_client) = setup().await;
    let ctx = BotContext::with_seed(db_client, FixedClock(date(2025, 9, 1)), 3);

    let menu = handlers::open_menu(&ctx, 42, "Ира").await.unwrap();
    assert_eq!(menu.text(), messages::greeting("Ира"));

    handlers::play(&ctx, 42, "Ира").await.unwrap();
    let again = handlers::play(&ctx, 42, "Ира").await.unwrap();
    assert!(matches!(again, Reply::Alert { .. }));

    let player = ctx.store.get(42).await.unwrap().unwrap();
    let top = handlers::top(&ctx).await.unwrap();
    assert!(top.text().contains(&format!("1. Ира — {}", player.rating)));

    let profile = handlers::profile(&ctx, 42, "Ира").await.unwrap();
    assert_eq!(profile.text(), messages::profile(&player));
}
