//! Schedule time handling for GTFS stop times.
//!
//! GTFS expresses arrival and departure times as "HH:MM:SS" measured from
//! the start of the service day. Trips that run past midnight keep counting,
//! so "25:10:00" is a valid time meaning 01:10 on the following morning.

use std::fmt;

use chrono::{Duration, NaiveTime, Timelike};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u32 = 24 * SECS_PER_HOUR;

/// A time of day within a service day, in seconds since its start.
///
/// Values of 24:00:00 and later are allowed and order after every time of
/// the same day.
///
/// # Examples
///
/// ```
/// use departures_server::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("08:30:00").unwrap();
/// assert_eq!(t.to_string(), "08:30");
///
/// // Past-midnight times are kept on the same service day
/// let late = ScheduleTime::parse("25:10:00").unwrap();
/// assert!(late > t);
/// assert_eq!(late.to_string(), "01:10");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime(u32);

impl ScheduleTime {
    /// Create a time from hours, minutes and seconds.
    ///
    /// Returns `None` if minutes or seconds are out of range.
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Option<Self> {
        if minutes > 59 || seconds > 59 {
            return None;
        }
        let secs = hours
            .checked_mul(SECS_PER_HOUR)?
            .checked_add(minutes * SECS_PER_MINUTE + seconds)?;
        Some(Self(secs))
    }

    /// Create a time from seconds since the start of the service day.
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    /// The same-day schedule time for a wall-clock time.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }

    /// Parse a GTFS "H:MM:SS" or "HH:MM:SS" time.
    ///
    /// # Examples
    ///
    /// ```
    /// use departures_server::domain::ScheduleTime;
    ///
    /// assert!(ScheduleTime::parse("7:05:00").is_ok());
    /// assert!(ScheduleTime::parse("23:59:59").is_ok());
    /// assert!(ScheduleTime::parse("26:00:00").is_ok());
    ///
    /// assert!(ScheduleTime::parse("08:30").is_err());
    /// assert!(ScheduleTime::parse("08:60:00").is_err());
    /// assert!(ScheduleTime::parse("ab:cd:ef").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: u32 = h
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes = parse_two_digits(m.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hours, minutes, seconds).ok_or_else(|| TimeError::new("time overflow"))
    }

    /// Returns seconds since the start of the service day.
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Returns the hour on a 24-hour clock (0-23), wrapping past-midnight times.
    pub fn hour(&self) -> u32 {
        (self.0 % SECS_PER_DAY) / SECS_PER_HOUR
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        (self.0 % SECS_PER_HOUR) / SECS_PER_MINUTE
    }

    /// Whether this time falls on the following calendar day.
    pub fn is_past_midnight(&self) -> bool {
        self.0 >= SECS_PER_DAY
    }

    /// Add a duration, saturating instead of overflowing.
    ///
    /// Negative durations move the time backwards, stopping at 00:00:00.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let delta = duration.num_seconds();
        let secs = i64::from(self.0).saturating_add(delta);
        Self(secs.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScheduleTime({:02}:{:02}:{:02})",
            self.0 / SECS_PER_HOUR,
            self.minute(),
            self.0 % SECS_PER_MINUTE
        )
    }
}

/// Formats as 24-hour "HH:MM".
impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ScheduleTime {
        ScheduleTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid() {
        assert_eq!(t("00:00:00").seconds(), 0);
        assert_eq!(t("08:30:00").seconds(), 8 * 3600 + 30 * 60);
        assert_eq!(t("7:05:09").seconds(), 7 * 3600 + 5 * 60 + 9);
        assert_eq!(t(" 12:00:00 ").seconds(), 12 * 3600);
        assert_eq!(t("25:10:00").seconds(), 25 * 3600 + 10 * 60);
    }

    #[test]
    fn parse_invalid() {
        assert!(ScheduleTime::parse("").is_err());
        assert!(ScheduleTime::parse("08:30").is_err());
        assert!(ScheduleTime::parse("08:30:00:00").is_err());
        assert!(ScheduleTime::parse("08:3:00").is_err());
        assert!(ScheduleTime::parse("08:30:0").is_err());
        assert!(ScheduleTime::parse("08:61:00").is_err());
        assert!(ScheduleTime::parse("08:00:60").is_err());
        assert!(ScheduleTime::parse("-1:00:00").is_err());
        assert!(ScheduleTime::parse("1234:00:00").is_err());
    }

    #[test]
    fn display_wraps_past_midnight() {
        assert_eq!(t("08:30:59").to_string(), "08:30");
        assert_eq!(t("00:05:00").to_string(), "00:05");
        assert_eq!(t("24:00:00").to_string(), "00:00");
        assert_eq!(t("25:45:00").to_string(), "01:45");
        assert!(t("24:00:00").is_past_midnight());
        assert!(!t("23:59:59").is_past_midnight());
    }

    #[test]
    fn debug_shows_full_time() {
        assert_eq!(format!("{:?}", t("25:10:07")), "ScheduleTime(25:10:07)");
    }

    #[test]
    fn ordering() {
        assert!(t("08:00:00") < t("08:00:01"));
        assert!(t("23:59:59") < t("24:00:00"));
        assert_eq!(t("08:00:00"), ScheduleTime::from_hms(8, 0, 0).unwrap());
    }

    #[test]
    fn from_naive_time() {
        let nt = NaiveTime::from_hms_opt(14, 5, 30).unwrap();
        assert_eq!(ScheduleTime::from_naive_time(nt), t("14:05:30"));
    }

    #[test]
    fn saturating_add() {
        assert_eq!(t("08:00:00").saturating_add(Duration::hours(2)), t("10:00:00"));
        assert_eq!(t("23:30:00").saturating_add(Duration::hours(2)), t("25:30:00"));
        assert_eq!(t("00:30:00").saturating_add(Duration::hours(-1)), t("00:00:00"));
    }

    #[test]
    fn error_display() {
        let err = ScheduleTime::parse("08:30").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: expected HH:MM:SS format");
    }
}
