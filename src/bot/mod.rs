pub mod actions;
pub mod handlers;
pub mod messages;

use crate::{
    api::{api_structs::Update, TelegramClient, TelegramError},
    database::store::PlayerStore,
    model::{
        clock::{Clock, UtcClock},
        rating::roll_delta
    }
};
use actions::Action;
use handlers::Reply;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::{
    sync::{Mutex, PoisonError},
    time::Duration
};
use tracing::{debug, error, info, warn};

const MENU_COMMANDS: [&str; 2] = ["/mmr", "/start"];
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Everything a handler needs, built once at startup.
pub struct BotContext<S, C = UtcClock> {
    pub store: S,
    pub clock: C,
    /// Username from `getMe`, used to tell `/mmr@this_bot` from commands for other bots
    pub bot_username: Option<String>,
    rng: Mutex<ChaCha8Rng>
}

impl<S: PlayerStore, C: Clock> BotContext<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        BotContext {
            store,
            clock,
            bot_username: None,
            rng: Mutex::new(ChaCha8Rng::from_rng(&mut rand::rng()))
        }
    }

    /// Deterministic rolls, for tests
    pub fn with_seed(store: S, clock: C, seed: u64) -> Self {
        BotContext {
            store,
            clock,
            bot_username: None,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed))
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    pub fn roll(&self) -> i32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        roll_delta(&mut *rng)
    }
}

/// A user action extracted from a Telegram update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// Menu command typed in a chat
    Command { chat_id: i64, user_id: i64, name: String },
    /// Menu button pressed; `action` is `None` for unknown callback data
    Button {
        query_id: String,
        chat_id: i64,
        user_id: i64,
        name: String,
        action: Option<Action>
    },
    Ignored
}

/// Group chats address commands as `/mmr@bot_name`. A mention is accepted only
/// when it names this bot; without a known username any mention is rejected.
fn is_menu_command(text: &str, bot_username: Option<&str>) -> bool {
    let word = text.split_whitespace().next().unwrap_or("");

    let command = match word.split_once('@') {
        Some((command, mention)) => match bot_username {
            Some(username) if mention.eq_ignore_ascii_case(username) => command,
            _ => return false
        },
        None => word
    };

    MENU_COMMANDS.contains(&command)
}

pub fn classify(update: &Update, bot_username: Option<&str>) -> Incoming {
    if let Some(query) = &update.callback_query {
        // Without the original message, answer in the private chat
        let chat_id = query.message.as_ref().map_or(query.from.id, |m| m.chat.id);

        return Incoming::Button {
            query_id: query.id.clone(),
            chat_id,
            user_id: query.from.id,
            name: query.from.first_name.clone(),
            action: query.data.as_deref().and_then(Action::from_callback_data)
        };
    }

    if let Some(message) = &update.message {
        if let (Some(from), Some(text)) = (&message.from, &message.text) {
            if !from.is_bot && is_menu_command(text, bot_username) {
                return Incoming::Command {
                    chat_id: message.chat.id,
                    user_id: from.id,
                    name: from.first_name.clone()
                };
            }
        }
    }

    Incoming::Ignored
}

/// Runs the handler for `incoming`. Store failures are logged and turned into an
/// apology so the user still gets an answer.
pub async fn respond<S: PlayerStore, C: Clock>(ctx: &BotContext<S, C>, incoming: &Incoming) -> Option<Reply> {
    let result = match incoming {
        Incoming::Command { user_id, name, .. } => handlers::open_menu(ctx, *user_id, name).await,
        Incoming::Button {
            user_id,
            name,
            action: Some(action),
            ..
        } => handlers::handle_action(ctx, *action, *user_id, name).await,
        Incoming::Button { action: None, .. } | Incoming::Ignored => return None
    };

    Some(result.unwrap_or_else(|e| {
        error!("Failed to handle {:?}: {}", incoming, e);
        Reply::message(messages::STORE_UNAVAILABLE.to_string())
    }))
}

async fn deliver(client: &TelegramClient, incoming: &Incoming, reply: Option<Reply>) -> Result<(), TelegramError> {
    match (incoming, reply) {
        (Incoming::Command { chat_id, .. }, Some(Reply::Message { text, keyboard })) => {
            client.send_message(*chat_id, &text, keyboard.as_ref()).await
        }
        (Incoming::Button { query_id, .. }, Some(Reply::Alert { text })) => {
            client.answer_callback_query(query_id, Some(&text), true).await
        }
        (Incoming::Button { query_id, chat_id, .. }, Some(Reply::Message { text, keyboard })) => {
            // The button is acknowledged even if the reply could not be sent
            let sent = client.send_message(*chat_id, &text, keyboard.as_ref()).await;
            let answered = client.answer_callback_query(query_id, None, false).await;
            sent.and(answered)
        }
        // Stop the client-side spinner even for buttons we don't know
        (Incoming::Button { query_id, .. }, None) => client.answer_callback_query(query_id, None, false).await,
        _ => Ok(())
    }
}

pub async fn handle_update<S: PlayerStore, C: Clock>(
    ctx: &BotContext<S, C>,
    client: &TelegramClient,
    update: &Update
) -> Result<(), TelegramError> {
    let incoming = classify(update, ctx.bot_username.as_deref());
    if incoming == Incoming::Ignored {
        debug!("Ignoring update {}", update.update_id);
        return Ok(());
    }

    let reply = respond(ctx, &incoming).await;
    deliver(client, &incoming, reply).await
}

/// Long-polls Telegram and handles updates one at a time. Never returns; polling
/// errors are logged and retried after a short delay.
pub async fn run<S: PlayerStore, C: Clock>(ctx: &BotContext<S, C>, client: &TelegramClient) {
    let mut offset = 0;
    info!("Polling Telegram for updates");

    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("getUpdates failed: {}", e);
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            if let Err(e) = handle_update(ctx, client, &update).await {
                warn!("Failed to answer update {}: {}", update.update_id, e);
            }
        }
    }
}
