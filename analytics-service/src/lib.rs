pub mod buckets;
pub mod config;
pub mod energy;
pub mod error;
pub mod grid;
pub mod metrics_server;
pub mod observability;
pub mod query;
pub mod report;
pub mod series;
pub mod sessions;
pub mod snapshot;
pub mod store;
pub mod transitions;
pub mod utilisation;
pub mod window;

pub use error::AnalyticsError;
pub use query::AnalyticsService;
pub use window::TimeWindow;
