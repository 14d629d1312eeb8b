/// Static reference data for one charging station.
///
/// `rated_power_kw` is nullable upstream; `None` means the rating is unknown,
/// which is not the same as a station rated at 0 kW.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChargingStation {
    pub station_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub city_id: Option<String>,
    pub connector_type: Option<String>,
    pub rated_power_kw: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct City {
    pub city_id: String,
    pub label: String,
}
