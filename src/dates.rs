//! Date parsing and formatting for feed timestamps.
//!
//! RSS uses RFC 822 dates, Atom and JSON Feed use RFC 3339, and Dublin Core
//! dates are usually loose ISO 8601. The codec picks one of these through a
//! [`DateStrategy`].

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// A textual date representation.
#[derive(Clone, Copy)]
pub enum DateFormat {
    /// `Tue, 10 Jun 2003 04:00:00 GMT`
    Rfc822,
    /// `2003-06-10T04:00:00Z`
    Rfc3339,
    /// RFC 3339 plus offset-less timestamps and bare dates, read as UTC.
    Iso8601,
    /// Caller-supplied conversion pair.
    Custom {
        parse: fn(&str) -> Option<DateTime<FixedOffset>>,
        format: fn(&DateTime<FixedOffset>) -> String,
    },
}

impl fmt::Debug for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rfc822 => f.write_str("Rfc822"),
            Self::Rfc3339 => f.write_str("Rfc3339"),
            Self::Iso8601 => f.write_str("Iso8601"),
            Self::Custom { .. } => f.write_str("Custom"),
        }
    }
}

impl DateFormat {
    pub fn parse(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Rfc822 => parse_rfc822(text),
            Self::Rfc3339 => parse_rfc3339(text),
            Self::Iso8601 => parse_iso8601(text),
            Self::Custom { parse, .. } => parse(text),
        }
    }

    pub fn format(&self, date: &DateTime<FixedOffset>) -> String {
        match self {
            Self::Rfc822 => date.to_rfc2822(),
            Self::Rfc3339 | Self::Iso8601 => date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::Custom { format, .. } => format(date),
        }
    }
}

/// How the codec reads and writes `DateTime<FixedOffset>` values.
#[derive(Debug, Clone, Copy, Default)]
pub enum DateStrategy {
    /// Use the date type's own textual form (RFC 3339).
    #[default]
    DeferredToDate,
    /// Convert through the given format.
    Formatted(DateFormat),
}

/// A timestamp that writes as ISO 8601 whatever the surrounding
/// [`DateStrategy`]. Dublin Core and Syndication dates use it, since they keep
/// W3C form even inside RSS documents. Reading accepts every form
/// [`parse_any`] knows; RFC 822 values in `dc:date` are common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct W3cDate(pub DateTime<FixedOffset>);

impl W3cDate {
    pub fn parse(text: &str) -> Option<Self> {
        parse_any(text).map(Self)
    }
}

impl fmt::Display for W3cDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DateFormat::Iso8601.format(&self.0))
    }
}

impl From<DateTime<FixedOffset>> for W3cDate {
    fn from(date: DateTime<FixedOffset>) -> Self {
        Self(date)
    }
}

/// Parses an RFC 822 / RFC 2822 date, tolerating a `UTC` zone name and
/// surrounding whitespace.
pub fn parse_rfc822(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date);
    }
    let normalized = text.strip_suffix(" UTC").map(|rest| format!("{rest} GMT"))?;
    DateTime::parse_from_rfc2822(&normalized).ok()
}

pub fn parse_rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text.trim()).ok()
}

/// Parses ISO 8601 timestamps as they appear in `dc:date`. Values without an
/// offset are taken as UTC.
pub fn parse_iso8601(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Some(date) = parse_rfc3339(text) {
        return Some(date);
    }
    // W3C-DTF allows minute precision with an offset: 1970-01-01T00:00+00:00
    let zoned = match text.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    if let Ok(date) = DateTime::parse_from_str(&zoned, "%Y-%m-%dT%H:%M%:z") {
        return Some(date);
    }
    let utc = FixedOffset::east_opt(0)?;
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc().with_timezone(&utc));
        }
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().with_timezone(&utc))
}

/// Tries every supported representation, most specific first.
pub fn parse_any(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_rfc3339(text)
        .or_else(|| parse_rfc822(text))
        .or_else(|| parse_iso8601(text))
}
