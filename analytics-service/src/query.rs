//! Request-scoped orchestration: parse the window, read from the store, run
//! the analytics, wrap the result.

use std::time::Instant;

use rust_client::domain::GridMetricKind;

use crate::{
    config::AnalyticsSettings,
    energy::{integrate_energy, rated_power_map},
    error::AnalyticsError,
    grid::{hourly_generation_vs_load, GridHour},
    report::{EnergyReport, SeriesReport, SnapshotReport},
    sessions::clipped_sessions,
    snapshot::snapshot_stations,
    store::{AnalyticsStore, SampleFilter},
    transitions::{hourly_session_counts, HourlyCount},
    utilisation::{hourly_utilisation, UtilisationRow},
    window::{parse_timestamp, TimeWindow},
};

pub struct AnalyticsService<S> {
    store: S,
    settings: AnalyticsSettings,
}

impl<S: AnalyticsStore> AnalyticsService<S> {
    pub fn new(store: S, settings: AnalyticsSettings) -> Self {
        Self { store, settings }
    }

    pub async fn city_exists(&self, city_id: &str) -> Result<bool, AnalyticsError> {
        let cities = self.store.list_cities().await?;
        Ok(cities.iter().any(|c| c.city_id == city_id))
    }

    /// Occupied-entry edges per hour across a city's stations.
    pub async fn charging_session_counts(
        &self,
        city_id: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<SeriesReport<HourlyCount>, AnalyticsError> {
        let started = Instant::now();
        let window = parse_window(start_time, end_time)?;
        let station_ids = self.station_ids(city_id).await?;

        let samples = if station_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .list_status_samples(&station_ids, &window, SampleFilter::All)
                .await?
        };
        tracing::debug!(city_id, stations = station_ids.len(), samples = samples.len(), "status samples loaded");

        let data = hourly_session_counts(&samples, &window);
        record_query("session_counts", started, data.len());
        Ok(SeriesReport::new(start_time, end_time, "count", data))
    }

    /// Estimated kWh delivered per hour across a city's stations.
    pub async fn city_energy(
        &self,
        city_id: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<EnergyReport, AnalyticsError> {
        let started = Instant::now();
        let window = parse_window(start_time, end_time)?;
        let stations = self.store.list_stations(city_id).await?;
        let station_ids: Vec<String> = stations.iter().map(|s| s.station_id.clone()).collect();

        let samples = if station_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .list_status_samples(&station_ids, &window, SampleFilter::OccupiedOnly)
                .await?
        };
        tracing::debug!(city_id, stations = station_ids.len(), samples = samples.len(), "occupied samples loaded");

        let sessions = clipped_sessions(&samples, &window, self.settings.session_gap());
        let totals = integrate_energy(
            &sessions,
            &rated_power_map(&stations),
            &window,
            self.settings.energy_decimals,
        );

        if !totals.unrated_stations.is_empty() {
            tracing::warn!(
                city_id,
                unrated = ?totals.unrated_stations,
                "stations without rated power excluded from energy totals"
            );
            metrics::counter!("analytics_unrated_stations_total").increment(totals.unrated_stations.len() as u64);
        }

        record_query("city_energy", started, totals.hourly.len());
        Ok(EnergyReport {
            series: SeriesReport::new(start_time, end_time, "kWh", totals.hourly),
            unrated_stations: totals.unrated_stations,
        })
    }

    /// Fraction of occupied samples per station and hour.
    pub async fn station_utilisation(
        &self,
        city_id: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<SeriesReport<UtilisationRow>, AnalyticsError> {
        let started = Instant::now();
        let window = parse_window(start_time, end_time)?;
        let station_ids = self.station_ids(city_id).await?;

        let samples = if station_ids.is_empty() {
            Vec::new()
        } else {
            self.store
                .list_status_samples(&station_ids, &window, SampleFilter::All)
                .await?
        };

        let data = hourly_utilisation(&station_ids, &samples, &window, self.settings.ratio_decimals);
        record_query("station_utilisation", started, data.len());
        Ok(SeriesReport::new(start_time, end_time, "ratio", data))
    }

    /// Hourly mean grid generation and load.
    pub async fn grid_generation_vs_load(
        &self,
        start_time: &str,
        end_time: &str,
    ) -> Result<SeriesReport<GridHour>, AnalyticsError> {
        let started = Instant::now();
        let window = parse_window(start_time, end_time)?;

        let samples = self.store.list_grid_metrics(&GridMetricKind::ALL, &window).await?;
        tracing::debug!(samples = samples.len(), "grid samples loaded");

        let data = hourly_generation_vs_load(&samples, &window, self.settings.grid_decimals);
        record_query("grid_generation_vs_load", started, data.len());
        Ok(SeriesReport::new(start_time, end_time, "MW", data))
    }

    /// Last known status of every station of a city at `at_time`.
    pub async fn station_snapshot(&self, city_id: &str, at_time: &str) -> Result<SnapshotReport, AnalyticsError> {
        let started = Instant::now();
        let at = parse_timestamp(at_time).inspect_err(|_| {
            metrics::counter!("analytics_invalid_window_total").increment(1);
        })?;
        let stations = self.store.list_stations(city_id).await?;
        let station_ids: Vec<String> = stations.iter().map(|s| s.station_id.clone()).collect();

        let latest = if station_ids.is_empty() {
            Vec::new()
        } else {
            self.store.latest_statuses(&station_ids, at).await?
        };

        let snapshot = snapshot_stations(&stations, &latest);
        record_query("station_snapshot", started, snapshot.len());
        Ok(SnapshotReport {
            city_id: city_id.to_string(),
            at: at_time.to_string(),
            stations: snapshot,
        })
    }

    async fn station_ids(&self, city_id: &str) -> Result<Vec<String>, AnalyticsError> {
        let stations = self.store.list_stations(city_id).await?;
        Ok(stations.into_iter().map(|s| s.station_id).collect())
    }
}

fn parse_window(start_time: &str, end_time: &str) -> Result<TimeWindow, AnalyticsError> {
    TimeWindow::parse(start_time, end_time).inspect_err(|e| {
        tracing::info!(error = %e, start_time, end_time, "rejected query window");
        metrics::counter!("analytics_invalid_window_total").increment(1);
    })
}

fn record_query(series: &'static str, started: Instant, buckets: usize) {
    let elapsed = started.elapsed();
    metrics::counter!("analytics_queries_total", "series" => series).increment(1);
    metrics::histogram!("analytics_query_duration_seconds", "series" => series).record(elapsed.as_secs_f64());
    tracing::info!(series, buckets, elapsed_ms = elapsed.as_millis() as u64, "analytics query completed");
}
