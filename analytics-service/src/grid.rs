//! Hourly generation vs. load for the regional grid.

use std::collections::BTreeMap;

use rust_client::domain::{GridMetric, GridMetricKind};
use serde::Serialize;

use crate::{
    buckets::{round_to, HourBucket},
    window::TimeWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridHour {
    pub hour: HourBucket,
    pub generation_mw: f64,
    pub load_mw: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / f64::from(self.count)
        }
    }
}

/// Average generation and load per observed hour of the window.
///
/// Only hours with at least one sample are emitted. A kind with no samples in
/// an otherwise observed hour reports 0.0.
pub fn hourly_generation_vs_load(samples: &[GridMetric], window: &TimeWindow, decimals: u32) -> Vec<GridHour> {
    let mut hours: BTreeMap<HourBucket, (Mean, Mean)> = BTreeMap::new();

    for sample in samples.iter().filter(|s| window.contains(s.sampled_at)) {
        let (generation, load) = hours.entry(HourBucket::containing(sample.sampled_at)).or_default();
        match sample.kind {
            GridMetricKind::Generation => generation.push(sample.value_mw),
            GridMetricKind::Load => load.push(sample.value_mw),
        }
    }

    hours
        .into_iter()
        .map(|(hour, (generation, load))| GridHour {
            hour,
            generation_mw: round_to(generation.value(), decimals),
            load_mw: round_to(load.value(), decimals),
        })
        .collect()
}
