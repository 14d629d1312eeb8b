/// Errors that end a single analytics query.
///
/// A station without a rated power is deliberately not represented here; the
/// energy report lists such stations instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("upstream read failure: {0}")]
    UpstreamRead(String),
    #[error("unknown city: {0}")]
    UnknownCity(String),
}
