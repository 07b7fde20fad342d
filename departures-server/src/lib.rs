//! Nearby public transport departures server.
//!
//! Answers: "which stops are near me, and what arrives there in the next
//! couple of hours?" from a static GTFS feed, over HTTP and Telegram.

pub mod domain;
pub mod gtfs;
pub mod query;
pub mod report;
pub mod telegram;
pub mod web;
