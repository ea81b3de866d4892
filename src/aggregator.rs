use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::{
    checksum::Address,
    entity::{BucketRecord, Granularity},
    error::Result,
    keys,
    store::RollupStore,
};

/// One timestamped event as delivered by the host runtime: a sender, an
/// optional recipient, and a block timestamp in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedEvent {
    pub from: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub timestamp: u64,
}

/// Maintains the day and hour rollups as a side effect of event delivery.
/// Write-side only; reading the buckets back is the host's concern.
pub struct BucketAggregator<'a> {
    store: &'a RollupStore,
}

impl<'a> BucketAggregator<'a> {
    pub fn new(store: &'a RollupStore) -> Self {
        Self { store }
    }

    /// Folds one event into both rollups. Dedup of active actors is
    /// idempotent under redelivery; tx_count and the totals snapshot are
    /// not — the caller owes at-most-once delivery for those.
    pub fn record_event(&self, event: &ObservedEvent) -> Result<()> {
        self.record_event_with_count(event, 1)
    }

    pub fn record_event_with_count(&self, event: &ObservedEvent, count: u64) -> Result<()> {
        let _guard = self.store.write_guard();

        for granularity in Granularity::ALL {
            self.bump_bucket(granularity, event.timestamp, count)?;
        }
        for granularity in Granularity::ALL {
            self.mark_actor(granularity, &event.from, event.timestamp)?;
            if let Some(to) = &event.to {
                self.mark_actor(granularity, to, event.timestamp)?;
            }
        }

        counter!("rollupdbx_events_recorded_total").increment(1);
        Ok(())
    }

    fn bump_bucket(&self, granularity: Granularity, timestamp: u64, count: u64) -> Result<()> {
        let index = granularity.index(timestamp);
        let mut bucket = match self.store.load_bucket(granularity, index)? {
            Some(bucket) => bucket,
            None => {
                tracing::debug!(kind = granularity.bucket_kind(), index, "creating bucket");
                BucketRecord::new(keys::period_start(index, granularity.period_secs()))
            }
        };

        // Buckets mirror the latest global snapshot, refreshed every event.
        if let Some(totals) = self.store.totals()? {
            bucket.tvl_eth = totals.tvl_eth;
            bucket.tvl_usd = totals.tvl_usd;
        }
        bucket.tx_count += count;

        self.store.save_bucket(granularity, index, &bucket)
    }

    /// Counts `actor` into the period's active set at most once. The marker
    /// row is saved unconditionally so redelivery stays branch-free.
    fn mark_actor(&self, granularity: Granularity, actor: &Address, timestamp: u64) -> Result<()> {
        let index = granularity.index(timestamp);
        let key = keys::actor_period_key(actor, index);

        if !self.store.marker_exists(granularity, &key)? {
            if let Some(mut bucket) = self.store.load_bucket(granularity, index)? {
                bucket.active_actors += 1;
                self.store.save_bucket(granularity, index, &bucket)?;
            }
        }

        self.store.save_marker(granularity, &key)
    }
}
