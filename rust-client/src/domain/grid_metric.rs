use std::{fmt, str::FromStr};

use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GridMetricKind {
    Generation,
    Load,
}

impl GridMetricKind {
    pub const ALL: [GridMetricKind; 2] = [GridMetricKind::Generation, GridMetricKind::Load];

    /// Value stored in the `grid_metrics.metric_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Load => "load",
        }
    }
}

impl fmt::Display for GridMetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown grid metric kind '{0}'")]
pub struct UnknownMetricKind(pub String);

impl FromStr for GridMetricKind {
    type Err = UnknownMetricKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generation" => Ok(Self::Generation),
            "load" => Ok(Self::Load),
            other => Err(UnknownMetricKind(other.to_string())),
        }
    }
}

/// One regional grid telemetry sample, in megawatts.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetric {
    pub sampled_at: OffsetDateTime,
    pub kind: GridMetricKind,
    pub value_mw: f64,
}
