use super::{
    actions::{menu_keyboard, Action},
    messages,
    BotContext
};
use crate::{
    api::api_structs::InlineKeyboardMarkup,
    database::store::{PlayerStore, StoreError},
    model::{
        clock::Clock,
        constants::LEADERBOARD_SIZE,
        rating::{play_today, DailyPlayError, PlayError}
    }
};

/// What the bot answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A chat message, optionally with an inline keyboard
    Message {
        text: String,
        keyboard: Option<InlineKeyboardMarkup>
    },
    /// A popup shown on the pressed button; nothing is posted to the chat
    Alert { text: String }
}

impl Reply {
    pub fn message(text: String) -> Reply {
        Reply::Message { text, keyboard: None }
    }

    pub fn text(&self) -> &str {
        match self {
            Reply::Message { text, .. } | Reply::Alert { text } => text
        }
    }
}

/// `/mmr`: registers the player on first contact and shows the menu.
pub async fn open_menu<S: PlayerStore, C: Clock>(
    ctx: &BotContext<S, C>,
    user_id: i64,
    name: &str
) -> Result<Reply, StoreError> {
    ctx.store.get_or_create(user_id, name).await?;

    Ok(Reply::Message {
        text: messages::greeting(name),
        keyboard: Some(menu_keyboard())
    })
}

pub async fn play<S: PlayerStore, C: Clock>(ctx: &BotContext<S, C>, user_id: i64, name: &str) -> Result<Reply, StoreError> {
    let today = ctx.clock.today();
    let roll = ctx.roll();

    match play_today(&ctx.store, user_id, name, today, roll).await {
        Ok(outcome) => Ok(Reply::message(messages::play_result(&outcome))),
        Err(DailyPlayError::Play(PlayError::AlreadyPlayedToday)) => Ok(Reply::Alert {
            text: messages::ALREADY_PLAYED.to_string()
        }),
        Err(DailyPlayError::Store(e)) => Err(e)
    }
}

pub async fn top<S: PlayerStore, C: Clock>(ctx: &BotContext<S, C>) -> Result<Reply, StoreError> {
    let entries = ctx.store.top(LEADERBOARD_SIZE).await?;

    Ok(Reply::message(messages::leaderboard(&entries)))
}

pub async fn profile<S: PlayerStore, C: Clock>(
    ctx: &BotContext<S, C>,
    user_id: i64,
    name: &str
) -> Result<Reply, StoreError> {
    let player = ctx.store.get_or_create(user_id, name).await?;

    Ok(Reply::message(messages::profile(&player)))
}

pub async fn handle_action<S: PlayerStore, C: Clock>(
    ctx: &BotContext<S, C>,
    action: Action,
    user_id: i64,
    name: &str
) -> Result<Reply, StoreError> {
    match action {
        Action::Play => play(ctx, user_id, name).await,
        Action::Top => top(ctx).await,
        Action::Profile => profile(ctx, user_id, name).await
    }
}
