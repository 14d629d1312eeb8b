//! Serializable envelopes handed to whatever presents the results.

use serde::Serialize;

use crate::{energy::HourlyEnergy, snapshot::StationSnapshot};

/// Zone the dashboards render in. Every instant in a report is UTC.
pub const DISPLAY_TIMEZONE: &str = "Europe/Dublin";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesReport<T> {
    pub start_time: String,
    pub end_time: String,
    pub timezone: &'static str,
    pub unit: &'static str,
    pub data: Vec<T>,
}

impl<T> SeriesReport<T> {
    pub fn new(start_time: &str, end_time: &str, unit: &'static str, data: Vec<T>) -> Self {
        Self {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            timezone: DISPLAY_TIMEZONE,
            unit,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReport {
    #[serde(flatten)]
    pub series: SeriesReport<HourlyEnergy>,
    /// Stations whose sessions were left out for lack of a rated power.
    pub unrated_stations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub city_id: String,
    pub at: String,
    pub stations: Vec<StationSnapshot>,
}
