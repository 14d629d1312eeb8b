//! Hour buckets and the helpers every hourly series is built from.

use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime, Time, UtcOffset};

use crate::window::TimeWindow;

/// Start of a UTC hour. All hourly aggregates are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourBucket(OffsetDateTime);

impl HourBucket {
    /// The bucket `ts` falls into.
    pub fn containing(ts: OffsetDateTime) -> Self {
        let utc = ts.to_offset(UtcOffset::UTC);
        Self(utc.replace_time(Time::MIDNIGHT) + Duration::hours(i64::from(utc.hour())))
    }

    pub fn start(self) -> OffsetDateTime {
        self.0
    }

    pub fn end(self) -> OffsetDateTime {
        self.0 + Duration::HOUR
    }

    pub fn next(self) -> Self {
        Self(self.end())
    }

    /// Overlap of `[from, to)` with this hour, in fractional hours. Never negative.
    pub fn overlap_hours(self, from: OffsetDateTime, to: OffsetDateTime) -> f64 {
        let overlap = to.min(self.end()) - from.max(self.start());
        if overlap.is_positive() {
            overlap.as_seconds_f64() / 3600.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => f.write_str(&s),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for HourBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Every hour that intersects `[start, end)`.
pub fn hours_in(window: &TimeWindow) -> Vec<HourBucket> {
    let mut hours = Vec::new();
    let mut bucket = HourBucket::containing(window.start());
    while bucket.start() < window.end() {
        hours.push(bucket);
        bucket = bucket.next();
    }
    hours
}

/// Every hour from the one containing `start` through the one containing
/// `end`, both included.
pub fn hours_through(window: &TimeWindow) -> Vec<HourBucket> {
    let last = HourBucket::containing(window.end());
    let mut hours = Vec::new();
    let mut bucket = HourBucket::containing(window.start());
    while bucket <= last {
        hours.push(bucket);
        bucket = bucket.next();
    }
    hours
}

/// Materialise a zeroed accumulator for each bucket.
pub fn zero_filled<V: Default>(hours: &[HourBucket]) -> BTreeMap<HourBucket, V> {
    hours.iter().map(|h| (*h, V::default())).collect()
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
