use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::keys::{self, SECS_PER_DAY, SECS_PER_HOUR};

/// Bucket width. Day and hour rollups are maintained independently for
/// every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Hour,
}

impl Granularity {
    pub const ALL: [Self; 2] = [Self::Day, Self::Hour];

    pub const fn period_secs(self) -> u64 {
        match self {
            Self::Day => SECS_PER_DAY,
            Self::Hour => SECS_PER_HOUR,
        }
    }

    /// Storage kind for the bucket rows of this width.
    pub const fn bucket_kind(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// Storage kind for the per-actor membership markers of this width.
    pub const fn marker_kind(self) -> &'static str {
        match self {
            Self::Day => "actor-day",
            Self::Hour => "actor-hour",
        }
    }

    pub fn index(self, timestamp_secs: u64) -> u64 {
        match self {
            Self::Day => keys::day_index(timestamp_secs),
            Self::Hour => keys::hour_index(timestamp_secs),
        }
    }
}

/// One rollup row, keyed by its decimal period index. Created lazily on the
/// first event of the period, mutated on every later event, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRecord {
    pub period_start_unix: u64,
    pub active_actors: u64,
    pub tvl_eth: BigDecimal,
    pub tvl_usd: BigDecimal,
    pub tx_count: u64,
}

impl BucketRecord {
    pub fn new(period_start_unix: u64) -> Self {
        Self {
            period_start_unix,
            active_actors: 0,
            tvl_eth: BigDecimal::from(0),
            tvl_usd: BigDecimal::from(0),
            tx_count: 0,
        }
    }
}

/// Authoritative running totals, owned by an external updater. Buckets copy
/// this snapshot in on every event; they never derive totals themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalTotals {
    pub tvl_eth: BigDecimal,
    pub tvl_usd: BigDecimal,
}

impl Default for GlobalTotals {
    fn default() -> Self {
        Self {
            tvl_eth: BigDecimal::from(0),
            tvl_usd: BigDecimal::from(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bucket_has_zero_counters() {
        let bucket = BucketRecord::new(86_400);
        assert_eq!(bucket.period_start_unix, 86_400);
        assert_eq!(bucket.active_actors, 0);
        assert_eq!(bucket.tx_count, 0);
        assert_eq!(bucket.tvl_eth, BigDecimal::from(0));
    }

    #[test]
    fn granularity_index_and_kind() {
        assert_eq!(Granularity::Day.index(90_000), 1);
        assert_eq!(Granularity::Hour.index(90_000), 25);
        assert_eq!(Granularity::Day.bucket_kind(), "day");
        assert_eq!(Granularity::Hour.marker_kind(), "actor-hour");
    }
}
