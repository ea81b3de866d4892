use crate::checksum::Address;

pub const SECS_PER_DAY: u64 = 86_400;
pub const SECS_PER_HOUR: u64 = 3_600;

/// Whole days elapsed since the Unix epoch. A timestamp that falls exactly
/// on a day boundary belongs to the day beginning at that timestamp.
pub fn day_index(timestamp_secs: u64) -> u64 {
    timestamp_secs / SECS_PER_DAY
}

/// Whole hours elapsed since the Unix epoch.
pub fn hour_index(timestamp_secs: u64) -> u64 {
    timestamp_secs / SECS_PER_HOUR
}

pub fn period_start(index: u64, period_len_secs: u64) -> u64 {
    index * period_len_secs
}

/// Composite key for an actor's per-period marker: lowercase hex address,
/// `-`, decimal period index.
pub fn actor_period_key(actor: &Address, period_index: u64) -> String {
    format!("{actor}-{period_index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_boundary_belongs_to_new_day() {
        assert_eq!(day_index(0), 0);
        assert_eq!(day_index(86_399), 0);
        assert_eq!(day_index(86_400), 1);
        assert_eq!(period_start(1, SECS_PER_DAY), 86_400);
    }

    #[test]
    fn hour_boundary_belongs_to_new_hour() {
        assert_eq!(hour_index(3_599), 0);
        assert_eq!(hour_index(3_600), 1);
        assert_eq!(period_start(24, SECS_PER_HOUR), 86_400);
    }

    #[test]
    fn actor_period_key_joins_hex_and_index() {
        let actor = Address::new([0x11; 20]);
        assert_eq!(
            actor_period_key(&actor, 42),
            "0x1111111111111111111111111111111111111111-42"
        );
    }
}
