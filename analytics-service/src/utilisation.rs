//! Share of samples, per station and hour, that observed the station occupied.

use std::collections::{BTreeMap, BTreeSet};

use rust_client::domain::StationStatusRecord;
use serde::Serialize;

use crate::{
    buckets::{hours_in, round_to, zero_filled, HourBucket},
    series::by_station,
    window::TimeWindow,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilisationRow {
    pub station_id: String,
    pub hour: HourBucket,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SampleTally {
    occupied: u32,
    total: u32,
}

impl SampleTally {
    fn ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.occupied) / f64::from(self.total)
        }
    }
}

/// Rows for every listed station and every hour intersecting the window,
/// ordered by station id then hour. Stations with no samples still get a full
/// row of zeros; samples of unlisted stations are ignored.
pub fn hourly_utilisation(
    station_ids: &[String],
    samples: &[StationStatusRecord],
    window: &TimeWindow,
    decimals: u32,
) -> Vec<UtilisationRow> {
    let hours = hours_in(window);
    let runs = by_station(samples, window);
    let stations: BTreeSet<&str> = station_ids.iter().map(String::as_str).collect();

    let mut rows = Vec::with_capacity(stations.len() * hours.len());
    for station_id in stations {
        let mut tallies: BTreeMap<HourBucket, SampleTally> = zero_filled(&hours);
        for sample in runs.get(station_id).into_iter().flatten() {
            if let Some(tally) = tallies.get_mut(&HourBucket::containing(sample.sampled_at)) {
                tally.total += 1;
                if sample.status.is_occupied() {
                    tally.occupied += 1;
                }
            }
        }

        rows.extend(tallies.into_iter().map(|(hour, tally)| UtilisationRow {
            station_id: station_id.to_string(),
            hour,
            ratio: round_to(tally.ratio(), decimals),
        }));
    }

    rows
}
