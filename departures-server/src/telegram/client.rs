//! Telegram Bot API HTTP client.
//!
//! Covers the two methods the bot needs: long polling for updates and
//! sending messages.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::TelegramError;
use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, SentMessage, Update};

/// Default base URL for the Bot API.
const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Default long-poll timeout, in seconds.
const DEFAULT_POLL_TIMEOUT: u64 = 30;

/// Configuration for the Telegram client.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: String,
    /// Base URL for the API (defaults to production Telegram)
    pub base_url: String,
    /// How long the server may hold a `getUpdates` request open
    pub poll_timeout_secs: u64,
    /// HTTP timeout for requests other than long polls
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl TelegramConfig {
    /// Create a new config with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT,
            request_timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the long-poll timeout.
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    endpoint: String,
    poll_timeout_secs: u64,
    request_timeout: Duration,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The endpoint embeds the token
        f.debug_struct("TelegramClient")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        // No client-wide timeout: long polls need longer than ordinary calls
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/bot{}",
                config.base_url.trim_end_matches('/'),
                config.token
            ),
            poll_timeout_secs: config.poll_timeout_secs,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// Long-poll for updates with id `offset` or later.
    ///
    /// Returns an empty list when the poll timed out with nothing new.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: vec!["message"],
        };
        // Give the server the full poll window plus some slack
        let timeout = Duration::from_secs(self.poll_timeout_secs) + self.request_timeout;
        self.call("getUpdates", &body, timeout).await
    }

    /// Send `text` to a chat using legacy Markdown formatting.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, TelegramError> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode: Some("Markdown"),
        };
        let sent: SentMessage = self.call("sendMessage", &body, self.request_timeout).await?;
        Ok(sent.message_id)
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, TelegramError> {
        let url = format!("{}/{}", self.endpoint, method);

        let response = self
            .http
            .post(&url)
            .json(body)
            .timeout(timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

/// Interpret a Bot API response.
fn parse_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, TelegramError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
        // Telegram answers 404 for unknown bot tokens
        return Err(TelegramError::Unauthorized);
    }

    let response: ApiResponse<T> = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) if status.is_success() => {
            return Err(TelegramError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            });
        }
        Err(_) => {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description: body.chars().take(500).collect(),
            });
        }
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TelegramError::RateLimited {
            retry_after: response.parameters.and_then(|p| p.retry_after),
        });
    }

    match (response.ok, response.result) {
        (true, Some(result)) => Ok(result),
        (true, None) => Err(TelegramError::Json {
            message: "missing result".to_string(),
            body: Some(body.chars().take(500).collect()),
        }),
        (false, _) => Err(TelegramError::Api {
            status: response.error_code.unwrap_or(status.as_u16()),
            description: response.description.unwrap_or_default(),
        }),
    }
}
