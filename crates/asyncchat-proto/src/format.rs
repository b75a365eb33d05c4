//! Timestamp formatting for broadcast lines.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Format the `HH:MM` wall clock used in line prefixes.
pub fn clock<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M").to_string()
}

/// Build a timestamped line: `[HH:MM] text\n`.
pub fn stamped<Tz: TimeZone>(now: &DateTime<Tz>, text: &str) -> String
where
    Tz::Offset: Display,
{
    format!("[{}] {}\n", clock(now), text)
}
