use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use std::fmt::{Display, Write};

use crate::error::AppError;

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Turns a raw `created_at` value into the text shown after "Joined: ".
///
/// Cards hand the stored value over untouched; what it looks like afterwards is
/// entirely up to the implementation. Closures `Fn(&str) -> String` qualify.
pub trait DateFormatter {
    fn format_date(&self, timestamp: &str) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format_date(&self, timestamp: &str) -> String {
        self(timestamp)
    }
}

const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const NAIVE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads a `created_at`-style value as an instant.
///
/// Same shapes the formatter accepts: RFC 3339, naive date-time, bare date. Values
/// without an offset are taken as UTC, bare dates as midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(raw, NAIVE_DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, NAIVE_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).fixed_offset())
}

/// Formats timestamps with a strftime pattern.
///
/// Accepts RFC 3339, then naive `YYYY-MM-DDTHH:MM:SS[.f]`, then a bare `YYYY-MM-DD`.
/// Anything else, or a pattern the parsed value can't satisfy (e.g. `%z` on a naive
/// date), is returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronoDateFormatter {
    pattern: String,
}

impl ChronoDateFormatter {
    pub fn new(pattern: impl Into<String>) -> Result<Self, AppError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(format!(
                "Invalid date format pattern: {}",
                pattern
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn render(&self, value: impl Display) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", value).ok()?;
        Some(out)
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format_date(&self, timestamp: &str) -> String {
        let formatted = if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
            self.render(dt.format(&self.pattern))
        } else if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, NAIVE_DATETIME_FORMAT) {
            self.render(dt.format(&self.pattern))
        } else if let Ok(date) = NaiveDate::parse_from_str(timestamp, NAIVE_DATE_FORMAT) {
            self.render(date.format(&self.pattern))
        } else {
            warn!("unrecognised timestamp {:?}, showing it as-is", timestamp);
            None
        };

        formatted.unwrap_or_else(|| timestamp.to_string())
    }
}
