//! Row filtering for the process table.

use super::metrics::ProcessSnapshot;

/// Case-insensitive substring match against the visible columns of a row.
///
/// An empty query matches every row.
pub fn matches(snapshot: &ProcessSnapshot, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    snapshot
        .display_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Visibility flags aligned with `processes`
pub fn visibility(processes: &[ProcessSnapshot], query: &str) -> Vec<bool> {
    processes.iter().map(|p| matches(p, query)).collect()
}
