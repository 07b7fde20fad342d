//! The bot: turns incoming messages into itinerary replies.

use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::domain::Coordinate;
use crate::query::NearbyQuery;
use crate::report::render_markdown;

use super::client::TelegramClient;
use super::error::TelegramError;
use super::types::{Message, Update};

/// Reply to `/start`.
pub const GREETING: &str = "Hello, send me your location to receive nearest stop times!";

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const MAX_MESSAGE_LEN: usize = 4096;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// What to do about one incoming message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BotAction {
    Greet,
    Query(Coordinate),
    /// Say nothing
    Ignore,
}

/// Decide how to answer a message.
///
/// A shared location or a `"lat, lon"` text both trigger a query. Text that
/// does not parse as a valid coordinate is ignored.
pub fn interpret(message: &Message) -> BotAction {
    if let Some(location) = message.location {
        return match Coordinate::new(location.latitude, location.longitude) {
            Ok(coordinate) => BotAction::Query(coordinate),
            Err(e) => {
                debug!(chat = message.chat.id, error = %e, "Ignoring shared location");
                BotAction::Ignore
            }
        };
    }

    let Some(text) = message.text.as_deref() else {
        return BotAction::Ignore;
    };
    if text.starts_with("/start") {
        return BotAction::Greet;
    }
    match Coordinate::parse(text) {
        Ok(coordinate) => BotAction::Query(coordinate),
        Err(e) => {
            debug!(chat = message.chat.id, error = %e, "Ignoring text message");
            BotAction::Ignore
        }
    }
}

/// The text chunks to send back for `message`, empty if none.
pub fn reply(query: &NearbyQuery, message: &Message, now: NaiveDateTime) -> Vec<String> {
    match interpret(message) {
        BotAction::Greet => vec![GREETING.to_string()],
        BotAction::Query(coordinate) => {
            let itinerary = query.build_itinerary(&coordinate, now);
            split_message(&render_markdown(&itinerary), MAX_MESSAGE_LEN)
        }
        BotAction::Ignore => Vec::new(),
    }
}

/// Split `text` into chunks of at most `max_len` UTF-16 code units.
///
/// Splits happen after a newline so a departure line is never cut in half.
/// A single line longer than `max_len` is cut at a character boundary.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);
        if current_len + line_len > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len <= max_len {
            current.push_str(line);
            current_len += line_len;
            continue;
        }
        for c in line.chars() {
            let c_len = c.len_utf16();
            if current_len + c_len > max_len && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(c);
            current_len += c_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Poll for updates and answer them until the process exits.
///
/// Polling errors are logged and retried with exponential backoff; a
/// failed reply is logged and the update is still acknowledged.
pub async fn run_bot(client: TelegramClient, query: NearbyQuery) {
    info!("Telegram bot polling for updates");

    let mut offset: Option<i64> = None;
    let mut backoff = INITIAL_BACKOFF;

    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => {
                backoff = INITIAL_BACKOFF;
                updates
            }
            Err(e) => {
                let delay = retry_delay(&e, backoff);
                warn!(error = %e, delay_secs = delay.as_secs(), "Polling for updates failed");
                tokio::time::sleep(delay).await;
                backoff = (backoff * 2).min(MAX_BACKOFF);
                continue;
            }
        };

        for update in updates {
            offset = Some(next_offset(offset, &update));
            handle_update(&client, &query, update).await;
        }
    }
}

async fn handle_update(client: &TelegramClient, query: &NearbyQuery, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let now = chrono::Local::now().naive_local();

    for chunk in reply(query, &message, now) {
        if let Err(e) = client.send_message(message.chat.id, &chunk).await {
            warn!(chat = message.chat.id, error = %e, "Failed to send reply");
            break;
        }
    }
}

fn next_offset(current: Option<i64>, update: &Update) -> i64 {
    let next = update.update_id + 1;
    current.map_or(next, |c| c.max(next))
}

fn retry_delay(error: &TelegramError, backoff: Duration) -> Duration {
    match error {
        TelegramError::RateLimited {
            retry_after: Some(secs),
        } => Duration::from_secs(*secs),
        _ => backoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs::DatasetStore;
    use crate::gtfs::fixtures::*;
    use crate::query::QueryConfig;
    use crate::telegram::types::{Chat, Location};
    use std::sync::Arc;

    fn text(s: &str) -> Message {
        Message {
            message_id: 1,
            chat: Chat { id: 42 },
            text: Some(s.to_string()),
            location: None,
        }
    }

    fn location(latitude: f64, longitude: f64) -> Message {
        Message {
            message_id: 1,
            chat: Chat { id: 42 },
            text: None,
            location: Some(Location {
                latitude,
                longitude,
            }),
        }
    }

    fn engine() -> NearbyQuery {
        let store = DatasetStore::from_tables(
            vec![stop("S1", "Central_Station", 0.0, 0.0)],
            vec![route("R1", "1", 3)],
            vec![trip("T1", "R1", "ALL", "Downtown")],
            vec![calendar("ALL", ALL_DAYS)],
            vec![stop_time("S1", "T1", "08:30:00")],
        )
        .unwrap();
        NearbyQuery::new(Arc::new(store), QueryConfig::default())
    }

    fn morning() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn start_greets() {
        assert_eq!(interpret(&text("/start")), BotAction::Greet);
        assert_eq!(interpret(&text("/start@departures_bot")), BotAction::Greet);
    }

    #[test]
    fn coordinates_in_text() {
        let expected = Coordinate::new(52.52, 13.405).unwrap();
        assert_eq!(interpret(&text("52.52, 13.405")), BotAction::Query(expected));
        assert_eq!(interpret(&text("52.52,13.405")), BotAction::Query(expected));
    }

    #[test]
    fn shared_location() {
        let expected = Coordinate::new(-33.86, 151.2).unwrap();
        assert_eq!(interpret(&location(-33.86, 151.2)), BotAction::Query(expected));
    }

    #[test]
    fn invalid_input_ignored() {
        for s in ["hello", "52.52", "1,2,3", "abc, def", "91, 0", "0, 181", ""] {
            assert_eq!(interpret(&text(s)), BotAction::Ignore, "{s:?}");
        }
        assert_eq!(interpret(&location(f64::NAN, 0.0)), BotAction::Ignore);

        let empty = Message {
            message_id: 1,
            chat: Chat { id: 42 },
            text: None,
            location: None,
        };
        assert_eq!(interpret(&empty), BotAction::Ignore);
    }

    #[test]
    fn reply_to_location_is_markdown_report() {
        let chunks = reply(&engine(), &location(0.0, 0.0), morning());
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].starts_with("Public transport near your location:\n\n"));
        assert!(chunks[0].contains("🚏 Central\\_Station\n"));
        assert!(chunks[0].contains("  - 🚌 1 (Downtown): 08:30\n"));
    }

    #[test]
    fn reply_to_start_and_noise() {
        assert_eq!(reply(&engine(), &text("/start"), morning()), vec![GREETING]);
        assert!(reply(&engine(), &text("where am I?"), morning()).is_empty());
    }

    #[test]
    fn split_keeps_short_text_whole() {
        assert_eq!(split_message("a\nb\n", 10), vec!["a\nb\n"]);
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn split_on_line_boundaries() {
        let chunks = split_message("aaaa\nbbbb\ncccc\n", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cccc\n"]);
    }

    #[test]
    fn split_counts_utf16_units() {
        // Each bus glyph is two UTF-16 units
        let chunks = split_message("🚌🚌\n🚌\n", 5);
        assert_eq!(chunks, vec!["🚌🚌\n", "🚌\n"]);
    }

    #[test]
    fn split_overlong_line() {
        let chunks = split_message("abcdefgh", 3);
        assert_eq!(chunks, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn offset_advances_past_seen_updates() {
        let update = |id| Update {
            update_id: id,
            message: None,
        };
        assert_eq!(next_offset(None, &update(10)), 11);
        assert_eq!(next_offset(Some(11), &update(11)), 12);
        assert_eq!(next_offset(Some(20), &update(5)), 20);
    }

    #[test]
    fn rate_limit_overrides_backoff() {
        let limited = TelegramError::RateLimited {
            retry_after: Some(7),
        };
        assert_eq!(retry_delay(&limited, INITIAL_BACKOFF), Duration::from_secs(7));
        assert_eq!(
            retry_delay(&TelegramError::Unauthorized, Duration::from_secs(4)),
            Duration::from_secs(4)
        );
    }
}
