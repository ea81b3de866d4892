//! Write-side rollup aggregates over a stream of timestamped events.
//!
//! Events fold into fixed-width day and hour buckets (transaction counts,
//! carried-over global totals, deduplicated active-actor counts) persisted
//! in an embedded RocksDB store. Sequential ids for an externally driven
//! oracle counter are resolved by probing down from an over-estimate
//! rather than scanning an index.

pub mod aggregator;
pub mod checksum;
pub mod config;
pub mod entity;
pub mod error;
pub mod keys;
pub mod oracle;
pub mod resolver;
pub mod store;

pub use aggregator::{BucketAggregator, ObservedEvent};
pub use checksum::Address;
pub use entity::{BucketRecord, GlobalTotals, Granularity};
pub use error::{Result, RollupError};
pub use store::RollupStore;
