//! Rebuilding continuous occupancy sessions from polled samples.
//!
//! A session is a maximal run of OCCUPIED samples of one station in which no
//! two consecutive samples are more than `max_gap` apart. It ends at the last
//! sample known to be occupied; the vacate time is never extrapolated.

use rust_client::domain::StationStatusRecord;
use time::{Duration, OffsetDateTime};

use crate::{series::by_station, window::TimeWindow};

/// Largest gap between two occupied samples that still continues a session.
pub const DEFAULT_SESSION_GAP: Duration = Duration::HOUR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub station_id: String,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Session {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Restrict the session to `window`. Returns `None` when nothing of
    /// positive length is left.
    pub fn clip(&self, window: &TimeWindow) -> Option<Session> {
        let start = self.start.max(window.start());
        let end = self.end.min(window.end());

        (start < end).then(|| Session {
            station_id: self.station_id.clone(),
            start,
            end,
        })
    }
}

/// Scan samples ordered by `(station_id, sampled_at)` and emit sessions.
///
/// Non-occupied samples are skipped. A session closes when the input ends,
/// the next occupied sample belongs to another station, or the next one is
/// more than `max_gap` later. A gap of exactly `max_gap` continues it.
pub fn reconstruct_sessions<'a, I>(samples: I, max_gap: Duration) -> Vec<Session>
where
    I: IntoIterator<Item = &'a StationStatusRecord>,
{
    let mut occupied = samples.into_iter().filter(|s| s.status.is_occupied()).peekable();
    let mut sessions = Vec::new();
    let mut opened: Option<&StationStatusRecord> = None;

    while let Some(sample) = occupied.next() {
        let first = *opened.get_or_insert(sample);

        let closes = match occupied.peek() {
            None => true,
            Some(next) => next.station_id != sample.station_id || next.sampled_at - sample.sampled_at > max_gap,
        };

        if closes {
            sessions.push(Session {
                station_id: first.station_id.clone(),
                start: first.sampled_at,
                end: sample.sampled_at,
            });
            opened = None;
        }
    }

    sessions
}

/// Sessions for every station, clipped to `window`, zero-length ones dropped.
pub fn clipped_sessions(samples: &[StationStatusRecord], window: &TimeWindow, max_gap: Duration) -> Vec<Session> {
    by_station(samples, window)
        .into_values()
        .flat_map(|run| reconstruct_sessions(run, max_gap))
        .filter_map(|session| session.clip(window))
        .collect()
}
