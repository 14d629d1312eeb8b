use rust_client::{
    db::{grid_queries, station_queries, status_queries},
    domain::{ChargingStation, City, GridMetric, GridMetricKind, StationStatusRecord},
};
use sqlx::PgPool;
use time::OffsetDateTime;

use super::{AnalyticsStore, SampleFilter};
use crate::{error::AnalyticsError, window::TimeWindow};

/// Store backed by the Postgres schema the ingestion scripts write to.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn upstream(query: &'static str) -> impl FnOnce(anyhow::Error) -> AnalyticsError {
    move |e| {
        tracing::error!(error = %e, query, "analytics store read failed");
        metrics::counter!("analytics_upstream_errors_total", "query" => query).increment(1);
        AnalyticsError::UpstreamRead(e.to_string())
    }
}

#[async_trait::async_trait]
impl AnalyticsStore for PgStore {
    async fn list_cities(&self) -> Result<Vec<City>, AnalyticsError> {
        station_queries::list_cities(&self.pool)
            .await
            .map_err(upstream("list_cities"))
    }

    async fn list_stations(&self, city_id: &str) -> Result<Vec<ChargingStation>, AnalyticsError> {
        station_queries::list_stations_by_city(&self.pool, city_id)
            .await
            .map_err(upstream("list_stations"))
    }

    async fn list_status_samples(
        &self,
        station_ids: &[String],
        window: &TimeWindow,
        filter: SampleFilter,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        let rows = match filter {
            SampleFilter::All => {
                status_queries::list_status_samples(&self.pool, station_ids, window.start(), window.end()).await
            }
            SampleFilter::OccupiedOnly => {
                status_queries::list_occupied_samples(&self.pool, station_ids, window.start(), window.end()).await
            }
        };
        rows.map_err(upstream("list_status_samples"))
    }

    async fn list_grid_metrics(
        &self,
        kinds: &[GridMetricKind],
        window: &TimeWindow,
    ) -> Result<Vec<GridMetric>, AnalyticsError> {
        grid_queries::list_grid_metrics(&self.pool, kinds, window.start(), window.end())
            .await
            .map_err(upstream("list_grid_metrics"))
    }

    async fn latest_statuses(
        &self,
        station_ids: &[String],
        at: OffsetDateTime,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        status_queries::latest_status_per_station(&self.pool, station_ids, at)
            .await
            .map_err(upstream("latest_statuses"))
    }
}
