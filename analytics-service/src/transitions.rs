//! Counting how often stations become occupied.

use std::collections::BTreeMap;

use rust_client::domain::{StationStatus, StationStatusRecord};
use serde::Serialize;

use crate::{
    buckets::{hours_in, zero_filled, HourBucket},
    series::by_station,
    window::TimeWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: HourBucket,
    pub count: u64,
}

/// Occupied-entry edges per hour, keyed by the hour of the sample that
/// became occupied. Hours without edges are absent.
///
/// A station's first sample in the window has no predecessor and never counts.
pub fn count_transitions(samples: &[StationStatusRecord], window: &TimeWindow) -> BTreeMap<HourBucket, u64> {
    let mut counts = BTreeMap::new();

    for run in by_station(samples, window).values() {
        let mut previous: Option<StationStatus> = None;
        for sample in run {
            if let Some(prev) = previous {
                if !prev.is_occupied() && sample.status.is_occupied() {
                    *counts.entry(HourBucket::containing(sample.sampled_at)).or_insert(0) += 1;
                }
            }
            previous = Some(sample.status);
        }
    }

    counts
}

/// Dense hourly series over the window, zero where nothing started.
pub fn hourly_session_counts(samples: &[StationStatusRecord], window: &TimeWindow) -> Vec<HourlyCount> {
    let mut dense: BTreeMap<HourBucket, u64> = zero_filled(&hours_in(window));
    for (hour, count) in count_transitions(samples, window) {
        if let Some(slot) = dense.get_mut(&hour) {
            *slot += count;
        }
    }

    dense
        .into_iter()
        .map(|(hour, count)| HourlyCount { hour, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_client::domain::StationStatus::{Available, Occupied, Offline};
    use time::{macros::datetime, OffsetDateTime};

    fn sample(station: &str, at: OffsetDateTime, status: StationStatus) -> StationStatusRecord {
        StationStatusRecord {
            station_id: station.to_string(),
            sampled_at: at,
            status,
            recorded_at: None,
        }
    }

    fn two_hours() -> TimeWindow {
        TimeWindow::new(datetime!(2025-06-10 00:00 UTC), datetime!(2025-06-10 02:00 UTC)).unwrap()
    }

    #[test]
    fn counts_each_entry_into_occupied() {
        let samples = vec![
            sample("s1", datetime!(2025-06-10 00:00 UTC), Available),
            sample("s1", datetime!(2025-06-10 00:10 UTC), Occupied),
            sample("s1", datetime!(2025-06-10 00:50 UTC), Occupied),
            sample("s1", datetime!(2025-06-10 01:05 UTC), Available),
            sample("s1", datetime!(2025-06-10 01:10 UTC), Occupied),
        ];

        let series = hourly_session_counts(&samples, &two_hours());

        assert_eq!(
            series,
            vec![
                HourlyCount { hour: HourBucket::containing(datetime!(2025-06-10 00:00 UTC)), count: 1 },
                HourlyCount { hour: HourBucket::containing(datetime!(2025-06-10 01:00 UTC)), count: 1 },
            ]
        );
    }

    #[test]
    fn first_sample_never_counts() {
        let samples = vec![
            sample("s1", datetime!(2025-06-10 00:05 UTC), Occupied),
            sample("s2", datetime!(2025-06-10 00:05 UTC), Occupied),
        ];
        assert!(count_transitions(&samples, &two_hours()).is_empty());
    }

    #[test]
    fn offline_to_occupied_counts_and_stations_are_independent() {
        let samples = vec![
            sample("s1", datetime!(2025-06-10 00:05 UTC), Offline),
            sample("s2", datetime!(2025-06-10 00:06 UTC), Available),
            sample("s1", datetime!(2025-06-10 00:15 UTC), Occupied),
            sample("s2", datetime!(2025-06-10 00:16 UTC), Occupied),
        ];

        let counts = count_transitions(&samples, &two_hours());
        assert_eq!(counts.get(&HourBucket::containing(datetime!(2025-06-10 00:00 UTC))), Some(&2));
    }

    #[test]
    fn empty_input_is_zero_filled() {
        let series = hourly_session_counts(&[], &two_hours());
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|h| h.count == 0));
    }

    #[test]
    fn samples_outside_window_are_ignored() {
        let samples = vec![
            sample("s1", datetime!(2025-06-09 23:50 UTC), Available),
            sample("s1", datetime!(2025-06-10 00:10 UTC), Occupied),
            sample("s1", datetime!(2025-06-10 02:00 UTC), Available),
            sample("s1", datetime!(2025-06-10 02:10 UTC), Occupied),
        ];

        let series = hourly_session_counts(&samples, &two_hours());
        assert!(series.iter().all(|h| h.count == 0));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let samples = vec![
            sample("s1", datetime!(2025-06-10 00:00 UTC), Available),
            sample("s1", datetime!(2025-06-10 00:30 UTC), Occupied),
        ];
        let window = two_hours();
        assert_eq!(hourly_session_counts(&samples, &window), hourly_session_counts(&samples, &window));
    }
}
