//! Noise Pruning
//!
//! Re-selects the traced records from the raw log and collapses any residual
//! duplicates into the final refined script.

use crate::capture::types::{EventRecord, Millis};
use std::collections::HashMap;
use tracing::debug;

/// Final output of the pipeline: one record per target, oldest first
pub type RefinedScript = Vec<EventRecord>;

/// Filter the raw log down to the keep-list and deduplicate by target.
///
/// Among records sharing a timestamp, one equal to its keep-list entry is
/// preferred; otherwise the record appearing later in the log wins.
pub fn prune_noise(log: &[EventRecord], keep: &[EventRecord]) -> RefinedScript {
    let wanted: HashMap<(Millis, &str), &EventRecord> =
        keep.iter().map(|record| (record.identity(), record)).collect();

    // target -> (log position, equal to its keep-list entry)
    let mut survivors: HashMap<&str, (usize, bool)> = HashMap::new();
    let mut filtered = 0usize;

    for (position, record) in log.iter().enumerate() {
        let Some(&kept) = wanted.get(&record.identity()) else {
            continue;
        };
        filtered += 1;
        let exact = record == kept;
        let target = record.target.as_str();
        let supersedes = survivors.get(target).map_or(true, |&(current, current_exact)| {
            let current_at = log[current].recorded_at;
            record.recorded_at > current_at
                || (record.recorded_at == current_at && (exact || !current_exact))
        });
        if supersedes {
            survivors.insert(target, (position, exact));
        }
    }

    let mut positions: Vec<usize> = survivors.into_values().map(|(position, _)| position).collect();
    positions.sort_by_key(|&position| (log[position].recorded_at, position));

    debug!(
        raw = log.len(),
        filtered,
        kept = positions.len(),
        "Pruned noise"
    );

    positions.into_iter().map(|position| log[position].clone()).collect()
}
