use std::collections::BTreeMap;

use rust_client::domain::StationStatusRecord;

use crate::window::TimeWindow;

/// Per-station sample runs inside `window`, each sorted by `sampled_at`.
///
/// Samples sharing a timestamp keep their input order, so callers that scan a
/// run see ties exactly as the store returned them.
pub fn by_station<'a>(
    samples: &'a [StationStatusRecord],
    window: &TimeWindow,
) -> BTreeMap<&'a str, Vec<&'a StationStatusRecord>> {
    let mut runs: BTreeMap<&str, Vec<&StationStatusRecord>> = BTreeMap::new();
    for sample in samples.iter().filter(|s| window.contains(s.sampled_at)) {
        runs.entry(sample.station_id.as_str()).or_default().push(sample);
    }
    for run in runs.values_mut() {
        run.sort_by_key(|s| s.sampled_at);
    }
    runs
}
