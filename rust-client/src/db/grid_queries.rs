use anyhow::Result;
use sqlx::PgPool;
use time::{OffsetDateTime, PrimitiveDateTime};

use super::naive_utc;
use crate::domain::{GridMetric, GridMetricKind};

#[derive(Debug, Clone, sqlx::FromRow)]
struct GridMetricRow {
    timestamp: PrimitiveDateTime,
    metric_type: String,
    value_mw: f64,
}

/// Grid samples of the requested kinds in `[start, end)`, ordered by time.
pub async fn list_grid_metrics(
    pool: &PgPool,
    kinds: &[GridMetricKind],
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Result<Vec<GridMetric>> {
    let kind_names: Vec<String> = kinds.iter().map(|k| k.as_str().to_string()).collect();

    let rows = sqlx::query_as::<_, GridMetricRow>(
        r#"
        SELECT timestamp, metric_type, value_mw
        FROM grid_metrics
        WHERE metric_type = ANY($1)
          AND timestamp >= $2
          AND timestamp <  $3
        ORDER BY timestamp
        "#,
    )
    .bind(&kind_names)
    .bind(naive_utc(start))
    .bind(naive_utc(end))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|r| -> Result<GridMetric> {
            Ok(GridMetric {
                sampled_at: r.timestamp.assume_utc(),
                kind: r.metric_type.parse()?,
                value_mw: r.value_mw,
            })
        })
        .collect()
}
