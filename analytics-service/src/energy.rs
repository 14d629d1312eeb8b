//! Hourly delivered energy, estimated from occupancy sessions and the rated
//! power of each station.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_client::domain::ChargingStation;
use serde::Serialize;

use crate::{
    buckets::{hours_through, round_to, zero_filled, HourBucket},
    sessions::Session,
    window::TimeWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyEnergy {
    pub hour: HourBucket,
    pub energy_kwh: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTotals {
    pub hourly: Vec<HourlyEnergy>,
    /// Stations that had sessions but no rated power, so contributed nothing.
    pub unrated_stations: Vec<String>,
}

/// station_id -> rated power in kW. `None` marks an unknown rating.
pub fn rated_power_map(stations: &[ChargingStation]) -> HashMap<&str, Option<f64>> {
    stations
        .iter()
        .map(|s| (s.station_id.as_str(), s.rated_power_kw))
        .collect()
}

/// Split a session into `(hour, overlap in hours)` pieces.
pub fn split_by_hour(session: &Session) -> Vec<(HourBucket, f64)> {
    let mut pieces = Vec::new();
    let mut bucket = HourBucket::containing(session.start);
    while bucket.start() < session.end {
        let hours = bucket.overlap_hours(session.start, session.end);
        if hours > 0.0 {
            pieces.push((bucket, hours));
        }
        bucket = bucket.next();
    }
    pieces
}

/// Accumulate `overlap * rated power` per hour.
///
/// Every hour from the start hour through the end hour of the window is
/// reported, zero if nothing was delivered. Sessions are expected to be clipped
/// already. A station missing from `ratings` counts as 0 kW.
pub fn integrate_energy(
    sessions: &[Session],
    ratings: &HashMap<&str, Option<f64>>,
    window: &TimeWindow,
    decimals: u32,
) -> EnergyTotals {
    let mut totals: BTreeMap<HourBucket, f64> = zero_filled(&hours_through(window));
    let mut unrated = BTreeSet::new();

    for session in sessions {
        let power_kw = match ratings.get(session.station_id.as_str()) {
            Some(Some(kw)) => *kw,
            Some(None) => {
                unrated.insert(session.station_id.clone());
                continue;
            }
            None => 0.0,
        };
        if power_kw <= 0.0 {
            continue;
        }

        for (hour, hours) in split_by_hour(session) {
            *totals.entry(hour).or_insert(0.0) += hours * power_kw;
        }
    }

    EnergyTotals {
        hourly: totals
            .into_iter()
            .map(|(hour, kwh)| HourlyEnergy {
                hour,
                energy_kwh: round_to(kwh, decimals),
            })
            .collect(),
        unrated_stations: unrated.into_iter().collect(),
    }
}
