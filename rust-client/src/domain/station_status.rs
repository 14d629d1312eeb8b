use std::fmt;

use time::OffsetDateTime;

/// Occupancy state of a station as stored in `station_status.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StationStatus {
    Available,
    Occupied,
    Offline,
}

impl StationStatus {
    /// Normalise a raw vendor status.
    ///
    /// Every status that means a vehicle is plugged in collapses to `Occupied`;
    /// anything unrecognised (or missing) is treated as `Offline`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Self::Available,
            "CHARGING" | "FINISHING" | "OCCUPIED" | "PAUSED" | "PREPARING" => Self::Occupied,
            _ => Self::Offline,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::Offline => "OFFLINE",
        }
    }

    pub fn is_occupied(self) -> bool {
        self == Self::Occupied
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One polled observation of a station.
///
/// `sampled_at` is the poll instant; `recorded_at` is when the server stored
/// the row and may be missing on legacy rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStatusRecord {
    pub station_id: String,
    pub sampled_at: OffsetDateTime,
    pub status: StationStatus,
    pub recorded_at: Option<OffsetDateTime>,
}
