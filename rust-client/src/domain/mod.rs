pub mod charging_station;
pub mod grid_metric;
pub mod station_status;

pub use charging_station::{ChargingStation, City};
pub use grid_metric::{GridMetric, GridMetricKind, UnknownMetricKind};
pub use station_status::{StationStatus, StationStatusRecord};
