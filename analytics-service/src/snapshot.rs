//! Last known status of each station at a given instant.

use std::collections::{BTreeMap, HashMap};

use rust_client::domain::{ChargingStation, StationStatus, StationStatusRecord};
use serde::{Serialize, Serializer};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Per station, the sample with the latest `recorded_at` among those polled
/// at or before `at`. Ties go to the later `sampled_at`, then to the later
/// sample in input order. Rows without `recorded_at` lose to any row with one.
pub fn latest_status_at(samples: &[StationStatusRecord], at: OffsetDateTime) -> BTreeMap<&str, &StationStatusRecord> {
    let mut latest: BTreeMap<&str, &StationStatusRecord> = BTreeMap::new();

    for sample in samples.iter().filter(|s| s.sampled_at <= at) {
        latest
            .entry(sample.station_id.as_str())
            .and_modify(|current| {
                if (sample.recorded_at, sample.sampled_at) >= (current.recorded_at, current.sampled_at) {
                    *current = sample;
                }
            })
            .or_insert(sample);
    }

    latest
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSnapshot {
    pub station_id: String,
    pub name: Option<String>,
    pub status: Option<StationStatus>,
    #[serde(serialize_with = "serialize_optional_rfc3339")]
    pub last_updated: Option<OffsetDateTime>,
}

/// One entry per station, in the given station order. `last_updated` is the
/// poll time of the chosen sample.
pub fn snapshot_stations(stations: &[ChargingStation], latest: &[StationStatusRecord]) -> Vec<StationSnapshot> {
    let by_id: HashMap<&str, &StationStatusRecord> =
        latest.iter().map(|s| (s.station_id.as_str(), s)).collect();

    stations
        .iter()
        .map(|station| {
            let found = by_id.get(station.station_id.as_str());
            StationSnapshot {
                station_id: station.station_id.clone(),
                name: station.name.clone(),
                status: found.map(|s| s.status),
                last_updated: found.map(|s| s.sampled_at),
            }
        })
        .collect()
}

fn serialize_optional_rfc3339<S: Serializer>(ts: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => {
            let text = ts.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
            serializer.serialize_some(&text)
        }
        None => serializer.serialize_none(),
    }
}
