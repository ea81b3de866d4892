use metrics::counter;

use crate::{error::Result, store::RollupStore};

/// Id reserved to mean "no entity exists"; real ids start at 1.
pub const NONE_ID: u64 = 0;

/// Walks down from `estimate` until a stored id is found. Returns the
/// largest existing id <= `estimate`, or [`NONE_ID`] when the whole range
/// is vacant. Over-estimates only cost probes, never correctness, so
/// callers should keep estimates close (see the oracle run-count
/// estimator).
pub fn last_existing_id(store: &RollupStore, kind: &str, estimate: u64) -> Result<u64> {
    let mut cursor = estimate;
    let mut probes = 0u64;

    let found = loop {
        if cursor == NONE_ID {
            break NONE_ID;
        }
        probes += 1;
        if store.contains(kind, &cursor.to_string())? {
            break cursor;
        }
        tracing::trace!(kind, id = cursor, "probe miss, trying predecessor");
        cursor -= 1;
    };

    counter!("rollupdbx_resolver_probes_total").increment(probes);
    Ok(found)
}

/// First vacant id above the occupied range: `last_existing_id + 1`, with
/// the empty store's successor defined as 1.
pub fn next_free_id(store: &RollupStore, kind: &str, estimate: u64) -> Result<u64> {
    Ok(last_existing_id(store, kind, estimate)? + 1)
}
