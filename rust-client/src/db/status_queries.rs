use anyhow::Result;
use sqlx::PgPool;
use time::{OffsetDateTime, PrimitiveDateTime};

use super::naive_utc;
use crate::domain::{StationStatus, StationStatusRecord};

#[derive(Debug, Clone, sqlx::FromRow)]
struct StatusRow {
    station_id: String,
    timestamp: PrimitiveDateTime,
    status: Option<String>,
    last_updated: Option<PrimitiveDateTime>,
}

impl From<StatusRow> for StationStatusRecord {
    fn from(r: StatusRow) -> Self {
        StationStatusRecord {
            station_id: r.station_id,
            sampled_at: r.timestamp.assume_utc(),
            status: r.status.as_deref().map_or(StationStatus::Offline, StationStatus::from_raw),
            recorded_at: r.last_updated.map(PrimitiveDateTime::assume_utc),
        }
    }
}

/// Status samples for a set of stations in `[start, end)`, ordered by
/// `(station_id, timestamp)`.
pub async fn list_status_samples(
    pool: &PgPool,
    station_ids: &[String],
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<Vec<StationStatusRecord>> {
    let rows = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT station_id, timestamp, status, last_updated
        FROM station_status
        WHERE station_id = ANY($1)
          AND timestamp >= $2
          AND timestamp <  $3
        ORDER BY station_id, timestamp, id
        "#,
    )
    .bind(station_ids)
    .bind(naive_utc(start))
    .bind(naive_utc(end))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Same as [`list_status_samples`] restricted to rows stored as `OCCUPIED`.
///
/// Ingestion already normalises vendor statuses, so matching the stored value
/// is enough here.
pub async fn list_occupied_samples(
    pool: &PgPool,
    station_ids: &[String],
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<Vec<StationStatusRecord>> {
    let rows = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT station_id, timestamp, status, last_updated
        FROM station_status
        WHERE station_id = ANY($1)
          AND status = 'OCCUPIED'
          AND timestamp >= $2
          AND timestamp <  $3
        ORDER BY station_id, timestamp, id
        "#,
    )
    .bind(station_ids)
    .bind(naive_utc(start))
    .bind(naive_utc(end))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Most recently recorded sample per station among those polled at or before
/// `at`. Stations with no such sample are absent from the result.
pub async fn latest_status_per_station(
    pool: &PgPool,
    station_ids: &[String],
    at: OffsetDateTime,
) -> Result<Vec<StationStatusRecord>> {
    let rows = sqlx::query_as::<_, StatusRow>(
        r#"
        SELECT DISTINCT ON (station_id)
            station_id, timestamp, status, last_updated
        FROM station_status
        WHERE station_id = ANY($1)
          AND timestamp <= $2
        ORDER BY station_id, last_updated DESC NULLS LAST, timestamp DESC, id DESC
        "#,
    )
    .bind(station_ids)
    .bind(naive_utc(at))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}
