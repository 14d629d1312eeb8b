use rust_client::domain::{ChargingStation, City, GridMetric, GridMetricKind, StationStatusRecord};
use time::OffsetDateTime;

use super::{AnalyticsStore, SampleFilter};
use crate::{error::AnalyticsError, snapshot::latest_status_at, window::TimeWindow};

/// In-process store over plain vectors. Answers the same questions as
/// [`PgStore`](super::PgStore), with the same ordering guarantees.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub cities: Vec<City>,
    pub stations: Vec<ChargingStation>,
    pub statuses: Vec<StationStatusRecord>,
    pub grid: Vec<GridMetric>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city_id: &str, label: &str) -> Self {
        self.cities.push(City {
            city_id: city_id.to_string(),
            label: label.to_string(),
        });
        self
    }

    pub fn with_stations(mut self, stations: impl IntoIterator<Item = ChargingStation>) -> Self {
        self.stations.extend(stations);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = StationStatusRecord>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    pub fn with_grid(mut self, grid: impl IntoIterator<Item = GridMetric>) -> Self {
        self.grid.extend(grid);
        self
    }

    fn statuses_of<'a>(&'a self, station_ids: &'a [String]) -> impl Iterator<Item = &'a StationStatusRecord> + 'a {
        self.statuses
            .iter()
            .filter(move |s| station_ids.iter().any(|id| *id == s.station_id))
    }
}

#[async_trait::async_trait]
impl AnalyticsStore for MemoryStore {
    async fn list_cities(&self) -> Result<Vec<City>, AnalyticsError> {
        let mut cities = self.cities.clone();
        cities.sort_by(|a, b| a.city_id.cmp(&b.city_id));
        Ok(cities)
    }

    async fn list_stations(&self, city_id: &str) -> Result<Vec<ChargingStation>, AnalyticsError> {
        Ok(self
            .stations
            .iter()
            .filter(|s| s.city_id.as_deref() == Some(city_id))
            .cloned()
            .collect())
    }

    async fn list_status_samples(
        &self,
        station_ids: &[String],
        window: &TimeWindow,
        filter: SampleFilter,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        let mut rows: Vec<StationStatusRecord> = self
            .statuses_of(station_ids)
            .filter(|s| window.contains(s.sampled_at))
            .filter(|s| filter == SampleFilter::All || s.status.is_occupied())
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.station_id, a.sampled_at).cmp(&(&b.station_id, b.sampled_at)));
        Ok(rows)
    }

    async fn list_grid_metrics(
        &self,
        kinds: &[GridMetricKind],
        window: &TimeWindow,
    ) -> Result<Vec<GridMetric>, AnalyticsError> {
        Ok(self
            .grid
            .iter()
            .filter(|g| kinds.contains(&g.kind) && window.contains(g.sampled_at))
            .cloned()
            .collect())
    }

    async fn latest_statuses(
        &self,
        station_ids: &[String],
        at: OffsetDateTime,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        let candidates: Vec<StationStatusRecord> = self.statuses_of(station_ids).cloned().collect();
        Ok(latest_status_at(&candidates, at).into_values().cloned().collect())
    }
}
