use anyhow::Result;
use sqlx::PgPool;

use crate::domain::{ChargingStation, City};

/// All stations belonging to one city. Order is unspecified.
pub async fn list_stations_by_city(pool: &PgPool, city_id: &str) -> Result<Vec<ChargingStation>> {
    let rows = sqlx::query_as::<_, ChargingStation>(
        r#"
        SELECT
            station_id,
            name,
            description,
            city_id,
            connector_type,
            rated_power_kw
        FROM charging_stations
        WHERE city_id = $1
        "#,
    )
    .bind(city_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_cities(pool: &PgPool) -> Result<Vec<City>> {
    let rows = sqlx::query_as::<_, City>(
        r#"
        SELECT city_id, label
        FROM cities
        ORDER BY city_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
