//! Query window parsing.
//!
//! Timestamps arrive as text in a handful of ISO-8601 flavours. Each accepted
//! flavour is one entry in [`PATTERNS`]; they are tried in order and the first
//! one that consumes the whole input wins. Anything without an explicit offset
//! is read as UTC, and every parsed instant is converted to UTC.

use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

use crate::{buckets::HourBucket, error::AnalyticsError};

enum Pattern {
    Rfc3339,
    WithOffset(&'static [BorrowedFormatItem<'static>]),
    Utc(&'static [BorrowedFormatItem<'static>]),
    UtcDate(&'static [BorrowedFormatItem<'static>]),
}

impl Pattern {
    fn parse(&self, text: &str) -> Option<OffsetDateTime> {
        match self {
            Self::Rfc3339 => OffsetDateTime::parse(text, &Rfc3339).ok(),
            Self::WithOffset(items) => OffsetDateTime::parse(text, *items).ok(),
            Self::Utc(items) => PrimitiveDateTime::parse(text, *items).ok().map(PrimitiveDateTime::assume_utc),
            Self::UtcDate(items) => Date::parse(text, *items).ok().map(|d| d.midnight().assume_utc()),
        }
    }
}

const PATTERNS: &[(&str, Pattern)] = &[
    // 2025-06-10T17:26:45Z, 2025-06-10T17:26:45.120+01:00
    ("rfc3339", Pattern::Rfc3339),
    // 2025-06-10T17:26Z
    ("utc_minute_z", Pattern::Utc(format_description!("[year]-[month]-[day]T[hour]:[minute]Z"))),
    // 2025-06-10T17:26:45Z
    (
        "utc_second_z",
        Pattern::Utc(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z")),
    ),
    // 2025-06-10T17:26+01:00
    (
        "minute_offset",
        Pattern::WithOffset(format_description!(
            "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
        )),
    ),
    // 2025-06-10 17:26:45+01:00
    (
        "space_second_offset",
        Pattern::WithOffset(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
        )),
    ),
    // 2025-06-10T17:26:45.5
    (
        "naive_subsecond",
        Pattern::Utc(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]")),
    ),
    // 2025-06-10T17:26:45
    ("naive_second", Pattern::Utc(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))),
    // 2025-06-10T17:26
    ("naive_minute", Pattern::Utc(format_description!("[year]-[month]-[day]T[hour]:[minute]"))),
    // 2025-06-10 17:26:45Z
    ("space_second_z", Pattern::Utc(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]Z"))),
    // 2025-06-10 17:26:45
    ("space_second", Pattern::Utc(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))),
    // 2025-06-10 17:26
    ("space_minute", Pattern::Utc(format_description!("[year]-[month]-[day] [hour]:[minute]"))),
    // 2025-06-10
    ("date", Pattern::UtcDate(format_description!("[year]-[month]-[day]"))),
];

/// Parse one timestamp into a UTC instant.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, AnalyticsError> {
    let trimmed = text.trim();

    PATTERNS
        .iter()
        .find_map(|(name, pattern)| {
            pattern.parse(trimmed).and_then(|ts| {
                tracing::trace!(input = trimmed, pattern = *name, "timestamp parsed");
                ts.checked_to_offset(UtcOffset::UTC)
            })
        })
        .ok_or_else(|| AnalyticsError::InvalidTimeWindow(format!("unsupported datetime format: {text}")))
}

/// Half-open UTC interval `[start, end)` a query runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl TimeWindow {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, AnalyticsError> {
        let utc = (start.checked_to_offset(UtcOffset::UTC), end.checked_to_offset(UtcOffset::UTC));
        let (start, end) = match utc {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(AnalyticsError::InvalidTimeWindow(format!(
                    "window {start} .. {end} is outside the representable range"
                )))
            }
        };

        if start >= end {
            return Err(AnalyticsError::InvalidTimeWindow(format!(
                "start {start} must be before end {end}"
            )));
        }

        // Hourly walks step one bucket past the one holding `end`.
        if HourBucket::containing(end).start().checked_add(Duration::HOUR * 2).is_none() {
            return Err(AnalyticsError::InvalidTimeWindow(format!(
                "end {end} is too close to the maximum supported date"
            )));
        }

        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, AnalyticsError> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        self.start <= ts && ts < self.end
    }
}
