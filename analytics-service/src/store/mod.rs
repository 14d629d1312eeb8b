//! Read-only collaborators the analytics run against.

pub mod memory;
pub mod postgres;

use rust_client::domain::{ChargingStation, City, GridMetric, GridMetricKind, StationStatusRecord};
use time::OffsetDateTime;

use crate::{error::AnalyticsError, window::TimeWindow};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFilter {
    All,
    OccupiedOnly,
}

#[async_trait::async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn list_cities(&self) -> Result<Vec<City>, AnalyticsError>;

    /// Stations of one city, in any order.
    async fn list_stations(&self, city_id: &str) -> Result<Vec<ChargingStation>, AnalyticsError>;

    /// Samples of the given stations inside the window, ordered by
    /// `(station_id, sampled_at)`.
    async fn list_status_samples(
        &self,
        station_ids: &[String],
        window: &TimeWindow,
        filter: SampleFilter,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError>;

    /// Grid samples of the given kinds inside the window, in any order.
    async fn list_grid_metrics(
        &self,
        kinds: &[GridMetricKind],
        window: &TimeWindow,
    ) -> Result<Vec<GridMetric>, AnalyticsError>;

    /// Latest recorded sample per station polled at or before `at`.
    async fn latest_statuses(
        &self,
        station_ids: &[String],
        at: OffsetDateTime,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError>;
}
