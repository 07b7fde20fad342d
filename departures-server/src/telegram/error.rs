//! Telegram client error types.

/// Errors from the Telegram Bot API client.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The API answered with `ok: false` or a non-success status
    #[error("API error {status}: {description}")]
    Api { status: u16, description: String },

    /// The bot token was rejected
    #[error("unauthorized (invalid bot token)")]
    Unauthorized,

    /// Flood control kicked in
    #[error("rate limited by Telegram, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the bot token
        TelegramError::Http(err.without_url())
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
