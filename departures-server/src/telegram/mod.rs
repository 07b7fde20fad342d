//! Telegram transport.
//!
//! A long-polling bot: users share a location (or type `lat, lon`) and get
//! the nearby departures report back as a Markdown message.

mod bot;
mod client;
mod error;
pub mod types;

pub use bot::{BotAction, GREETING, MAX_MESSAGE_LEN, interpret, reply, run_bot, split_message};
pub use client::{TelegramClient, TelegramConfig};
pub use error::TelegramError;
