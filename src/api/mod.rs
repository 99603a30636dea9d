pub mod api_structs;

use api_structs::{
    AnswerCallbackQueryRequest, ApiResponse, GetUpdatesRequest, InlineKeyboardMarkup, SendMessageRequest, Update, User
};
use reqwest::{Client, ClientBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const TELEGRAM_API_ROOT: &str = "https://api.telegram.org";
const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse Telegram response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Telegram API error in {method}: {description}")]
    Api { method: &'static str, description: String }
}

/// Minimal Telegram Bot API client over long polling.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    /// `{root}/bot{token}`
    base_url: String,
    poll_timeout: Duration
}

impl TelegramClient {
    pub fn new(token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        Self::with_api_root(TELEGRAM_API_ROOT, token, poll_timeout)
    }

    /// Points the client at another Bot API server (local bot API, test doubles).
    pub fn with_api_root(api_root: &str, token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        // The HTTP timeout must outlast the long poll
        let http = ClientBuilder::new()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()?;

        Ok(TelegramClient {
            http,
            base_url: format!("{}/bot{}", api_root.trim_end_matches('/'), token),
            poll_timeout
        })
    }

    async fn call<B: Serialize, T: DeserializeOwned>(&self, method: &'static str, body: &B) -> Result<T, TelegramError> {
        let text = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await?
            .text()
            .await?;

        let response: ApiResponse<T> = serde_json::from_str(&text)?;

        match response.result {
            Some(result) if response.ok => Ok(result),
            _ => Err(TelegramError::Api {
                method,
                description: response.description.unwrap_or_else(|| "no description".to_string())
            })
        }
    }

    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-polls for updates with ids `>= offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: &ALLOWED_UPDATES
        };

        let updates: Vec<Update> = self.call("getUpdates", &request).await?;
        if !updates.is_empty() {
            debug!("Received {} updates from offset {}", updates.len(), offset);
        }

        Ok(updates)
    }

    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_markup
        };

        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    /// Acknowledges a button press, optionally with a notice or popup alert.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
        show_alert: bool
    ) -> Result<(), TelegramError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id,
            text,
            show_alert
        };

        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }
}
