use anyhow::{bail, Result};
use analytics_service::{
    config::AppConfig,
    metrics_server,
    observability,
    store::PgStore,
    AnalyticsError,
    AnalyticsService,
};
use sqlx::postgres::PgPoolOptions;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        bail!("usage: hourly_report <city_id> <start_time> <end_time>");
    }
    let (city_id, start_time, end_time) = (&args[1], &args[2], &args[3]);

    let cfg = AppConfig::load()?;

    if let Some(metrics_cfg) = &cfg.metrics {
        metrics_server::init(&metrics_cfg.bind_addr)?;
    }

    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&cfg.database.uri)
        .await?;

    let service = AnalyticsService::new(PgStore::new(pool), cfg.analytics.clone());

    if !service.city_exists(city_id).await? {
        return Err(AnalyticsError::UnknownCity(city_id.clone()).into());
    }

    let (sessions, energy, utilisation, grid) = tokio::try_join!(
        service.charging_session_counts(city_id, start_time, end_time),
        service.city_energy(city_id, start_time, end_time),
        service.station_utilisation(city_id, start_time, end_time),
        service.grid_generation_vs_load(start_time, end_time),
    )?;

    let report = serde_json::json!({
        "city_id": city_id,
        "charging_sessions": sessions,
        "energy_delivered": energy,
        "station_utilisation": utilisation,
        "grid_energy": grid,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!(city_id = %city_id, "hourly report written");

    Ok(())
}
