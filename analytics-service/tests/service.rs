use analytics_service::{
    config::AnalyticsSettings,
    store::{AnalyticsStore, MemoryStore, SampleFilter},
    AnalyticsError, AnalyticsService, TimeWindow,
};
use rust_client::domain::{
    ChargingStation, City, GridMetric, GridMetricKind, StationStatus, StationStatusRecord,
};
use time::{macros::datetime, OffsetDateTime};

fn station(id: &str, city: &str, rated_power_kw: Option<f64>) -> ChargingStation {
    ChargingStation {
        station_id: id.to_string(),
        name: Some(format!("Station {id}")),
        description: None,
        city_id: Some(city.to_string()),
        connector_type: Some("CCS".to_string()),
        rated_power_kw,
    }
}

fn status(station: &str, at: OffsetDateTime, status: StationStatus) -> StationStatusRecord {
    StationStatusRecord {
        station_id: station.to_string(),
        sampled_at: at,
        status,
        recorded_at: Some(at),
    }
}

fn dublin() -> MemoryStore {
    use StationStatus::{Available, Occupied};

    MemoryStore::new()
        .with_city("dublin", "Dublin")
        .with_city("cork", "Cork")
        .with_stations([
            station("d1", "dublin", Some(50.0)),
            station("d2", "dublin", None),
            station("c1", "cork", Some(22.0)),
        ])
        .with_statuses([
            status("d1", datetime!(2025-06-10 10:00 UTC), Available),
            status("d1", datetime!(2025-06-10 10:30 UTC), Occupied),
            status("d1", datetime!(2025-06-10 10:45 UTC), Occupied),
            status("d1", datetime!(2025-06-10 11:15 UTC), Occupied),
            status("d1", datetime!(2025-06-10 11:30 UTC), Available),
            status("d2", datetime!(2025-06-10 10:05 UTC), Available),
            status("d2", datetime!(2025-06-10 10:20 UTC), Occupied),
            status("d2", datetime!(2025-06-10 10:50 UTC), Occupied),
            status("c1", datetime!(2025-06-10 10:00 UTC), Available),
            status("c1", datetime!(2025-06-10 10:10 UTC), Occupied),
        ])
        .with_grid([
            GridMetric {
                sampled_at: datetime!(2025-06-10 10:00 UTC),
                kind: GridMetricKind::Generation,
                value_mw: 3000.0,
            },
            GridMetric {
                sampled_at: datetime!(2025-06-10 10:15 UTC),
                kind: GridMetricKind::Load,
                value_mw: 3500.0,
            },
            GridMetric {
                sampled_at: datetime!(2025-06-10 14:15 UTC),
                kind: GridMetricKind::Load,
                value_mw: 4000.0,
            },
        ])
}

fn service() -> AnalyticsService<MemoryStore> {
    AnalyticsService::new(dublin(), AnalyticsSettings::default())
}

#[tokio::test]
async fn session_counts_are_dense_and_city_scoped() {
    let report = service()
        .charging_session_counts("dublin", "2025-06-10T10:00Z", "2025-06-10T12:00Z")
        .await
        .unwrap();

    let counts: Vec<u64> = report.data.iter().map(|h| h.count).collect();
    // d1 and d2 each become occupied once in the 10:00 hour; c1 is in Cork.
    assert_eq!(counts, vec![2, 0]);
    assert_eq!(report.unit, "count");
    assert_eq!(report.start_time, "2025-06-10T10:00Z");
}

#[tokio::test]
async fn energy_skips_unrated_stations_and_reports_them() {
    let report = service()
        .city_energy("dublin", "2025-06-10 10:00:00", "2025-06-10 12:00:00")
        .await
        .unwrap();

    let kwh: Vec<f64> = report.series.data.iter().map(|h| h.energy_kwh).collect();
    // d1 occupied 10:30..11:15 at 50 kW: 25 kWh then 12.5 kWh. d2 is unrated.
    assert_eq!(kwh, vec![25.0, 12.5, 0.0]);
    assert_eq!(report.unrated_stations, vec!["d2".to_string()]);

    let total: f64 = kwh.iter().sum();
    assert!((total - 0.75 * 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn utilisation_covers_every_station_and_hour() {
    let report = service()
        .station_utilisation("dublin", "2025-06-10T10:00:00Z", "2025-06-10T12:00:00Z")
        .await
        .unwrap();

    let rows: Vec<(&str, f64)> = report.data.iter().map(|r| (r.station_id.as_str(), r.ratio)).collect();
    assert_eq!(rows, vec![("d1", 0.6667), ("d1", 0.5), ("d2", 0.6667), ("d2", 0.0)]);
}

#[tokio::test]
async fn grid_reports_observed_hours_only() {
    let report = service()
        .grid_generation_vs_load("2025-06-10T00:00Z", "2025-06-11T00:00Z")
        .await
        .unwrap();

    assert_eq!(report.data.len(), 2);
    assert_eq!(report.data[0].hour.start(), datetime!(2025-06-10 10:00 UTC));
    assert_eq!((report.data[0].generation_mw, report.data[0].load_mw), (3000.0, 3500.0));
    assert_eq!(report.data[1].hour.start(), datetime!(2025-06-10 14:00 UTC));
    assert_eq!((report.data[1].generation_mw, report.data[1].load_mw), (0.0, 4000.0));
}

#[tokio::test]
async fn unknown_city_yields_zero_series_not_an_error() {
    let svc = service();

    let counts = svc
        .charging_session_counts("galway", "2025-06-10T10:00Z", "2025-06-10T13:00Z")
        .await
        .unwrap();
    assert_eq!(counts.data.len(), 3);
    assert!(counts.data.iter().all(|h| h.count == 0));

    let energy = svc.city_energy("galway", "2025-06-10T10:00Z", "2025-06-10T13:00Z").await.unwrap();
    assert_eq!(energy.series.data.len(), 4);
    assert!(energy.unrated_stations.is_empty());

    assert!(!svc.city_exists("galway").await.unwrap());
    assert!(svc.city_exists("cork").await.unwrap());
}

#[tokio::test]
async fn malformed_or_inverted_windows_are_rejected() {
    let svc = service();

    let malformed = svc.charging_session_counts("dublin", "last tuesday", "2025-06-10T12:00Z").await;
    assert!(matches!(malformed, Err(AnalyticsError::InvalidTimeWindow(_))));

    let inverted = svc.city_energy("dublin", "2025-06-10T12:00Z", "2025-06-10T10:00Z").await;
    assert!(matches!(inverted, Err(AnalyticsError::InvalidTimeWindow(_))));

    let grid = svc.grid_generation_vs_load("2025-06-10T12:00Z", "2025-06-10T12:00Z").await;
    assert!(matches!(grid, Err(AnalyticsError::InvalidTimeWindow(_))));
}

#[tokio::test]
async fn windows_at_the_end_of_the_calendar_are_rejected() {
    let svc = service();

    let counts = svc.charging_session_counts("dublin", "9999-12-31T22:00Z", "9999-12-31T23:30Z").await;
    assert!(matches!(counts, Err(AnalyticsError::InvalidTimeWindow(_))));

    let energy = svc.city_energy("dublin", "9999-12-31T22:00Z", "9999-12-31T23:30Z").await;
    assert!(matches!(energy, Err(AnalyticsError::InvalidTimeWindow(_))));

    let utilisation = svc.station_utilisation("dublin", "9999-12-31 22:00", "9999-12-31 23:59:59").await;
    assert!(matches!(utilisation, Err(AnalyticsError::InvalidTimeWindow(_))));
}

#[tokio::test]
async fn snapshot_reports_last_known_status() {
    let report = service().station_snapshot("dublin", "2025-06-10T10:40:00Z").await.unwrap();

    assert_eq!(report.stations.len(), 2);
    let d1 = report.stations.iter().find(|s| s.station_id == "d1").unwrap();
    assert_eq!(d1.status, Some(StationStatus::Occupied));
    assert_eq!(d1.last_updated, Some(datetime!(2025-06-10 10:30 UTC)));

    let early = service().station_snapshot("dublin", "2025-06-10T09:00:00Z").await.unwrap();
    assert!(early.stations.iter().all(|s| s.status.is_none()));
}

#[tokio::test]
async fn repeated_queries_are_identical() {
    let svc = service();
    let a = svc.city_energy("dublin", "2025-06-10T10:00Z", "2025-06-10T12:00Z").await.unwrap();
    let b = svc.city_energy("dublin", "2025-06-10T10:00Z", "2025-06-10T12:00Z").await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn energy_report_serializes_with_envelope() {
    let report = service()
        .city_energy("dublin", "2025-06-10T10:00Z", "2025-06-10T11:00Z")
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["unit"], "kWh");
    assert_eq!(json["timezone"], "Europe/Dublin");
    assert_eq!(json["data"][0]["hour"], "2025-06-10T10:00:00Z");
    assert_eq!(json["data"][0]["energy_kwh"], 25.0);
    assert_eq!(json["unrated_stations"][0], "d2");
}

struct FailingStore;

#[async_trait::async_trait]
impl AnalyticsStore for FailingStore {
    async fn list_cities(&self) -> Result<Vec<City>, AnalyticsError> {
        Err(AnalyticsError::UpstreamRead("connection refused".to_string()))
    }

    async fn list_stations(&self, _city_id: &str) -> Result<Vec<ChargingStation>, AnalyticsError> {
        Ok(vec![station("d1", "dublin", Some(50.0))])
    }

    async fn list_status_samples(
        &self,
        _station_ids: &[String],
        _window: &TimeWindow,
        _filter: SampleFilter,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        Err(AnalyticsError::UpstreamRead("connection refused".to_string()))
    }

    async fn list_grid_metrics(
        &self,
        _kinds: &[GridMetricKind],
        _window: &TimeWindow,
    ) -> Result<Vec<GridMetric>, AnalyticsError> {
        Err(AnalyticsError::UpstreamRead("statement timeout".to_string()))
    }

    async fn latest_statuses(
        &self,
        _station_ids: &[String],
        _at: OffsetDateTime,
    ) -> Result<Vec<StationStatusRecord>, AnalyticsError> {
        Err(AnalyticsError::UpstreamRead("connection refused".to_string()))
    }
}

#[tokio::test]
async fn upstream_failures_propagate_verbatim() {
    let svc = AnalyticsService::new(FailingStore, AnalyticsSettings::default());

    let energy = svc.city_energy("dublin", "2025-06-10T10:00Z", "2025-06-10T12:00Z").await;
    assert_eq!(energy, Err(AnalyticsError::UpstreamRead("connection refused".to_string())));

    let grid = svc.grid_generation_vs_load("2025-06-10T10:00Z", "2025-06-10T12:00Z").await;
    assert_eq!(grid, Err(AnalyticsError::UpstreamRead("statement timeout".to_string())));

    // The window is validated before any read happens.
    let bad = svc.city_energy("dublin", "nope", "2025-06-10T12:00Z").await;
    assert!(matches!(bad, Err(AnalyticsError::InvalidTimeWindow(_))));
}
