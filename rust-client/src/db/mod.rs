pub mod grid_queries;
pub mod station_queries;
pub mod status_queries;

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// The schema stores naive `TIMESTAMP` columns holding UTC wall-clock time.
pub(crate) fn naive_utc(ts: OffsetDateTime) -> PrimitiveDateTime {
    let utc = ts.to_offset(UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}
