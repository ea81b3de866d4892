use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    resolver,
    store::{KIND_ORACLE_REPORT, RollupStore},
};

/// When the oracle is expected to report. `period_secs` must be an upper
/// bound on the nominal spacing; `runs_buffer` absorbs the drift when
/// actual spacing occasionally exceeds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSchedule {
    pub first_report_at: u64,
    pub period_secs: u64,
    pub runs_buffer: u64,
}

/// One periodic oracle report. Reports are appended under sequential
/// decimal ids starting at 1 and located by probing down from an estimate,
/// never through an index scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleReport {
    pub total_pooled_ether: BigDecimal,
    pub total_shares: BigDecimal,
    pub block_time: u64,
}

/// Over-estimates how many reports can have happened by `current_time`.
/// Zero when the clock is at or before the first report; otherwise the
/// ceiling of elapsed/period plus the safety buffer. Real-valued division
/// before rounding up keeps this a guaranteed over-estimate — truncating
/// integer division would undershoot and break the downward search.
pub fn estimate_run_count(
    current_time: u64,
    first_report_at: u64,
    period_secs: u64,
    runs_buffer: u64,
) -> u64 {
    if current_time <= first_report_at {
        return 0;
    }
    let elapsed = current_time - first_report_at;
    let runs = (elapsed as f64 / period_secs as f64).ceil() as u64;
    runs + runs_buffer
}

/// Id of the most recent stored report as of `current_time`, or
/// [`resolver::NONE_ID`] when none has been stored yet.
pub fn latest_report_id(
    store: &RollupStore,
    current_time: u64,
    schedule: &OracleSchedule,
) -> Result<u64> {
    let estimate = estimate_run_count(
        current_time,
        schedule.first_report_at,
        schedule.period_secs,
        schedule.runs_buffer,
    );
    resolver::last_existing_id(store, KIND_ORACLE_REPORT, estimate)
}

pub fn next_report_id(
    store: &RollupStore,
    current_time: u64,
    schedule: &OracleSchedule,
) -> Result<u64> {
    let estimate = estimate_run_count(
        current_time,
        schedule.first_report_at,
        schedule.period_secs,
        schedule.runs_buffer,
    );
    resolver::next_free_id(store, KIND_ORACLE_REPORT, estimate)
}

/// Stores `report` under the next free id and returns that id.
pub fn append_report(
    store: &RollupStore,
    schedule: &OracleSchedule,
    report: &OracleReport,
) -> Result<u64> {
    let _guard = store.write_guard();
    let id = next_report_id(store, report.block_time, schedule)?;
    store.put_record(KIND_ORACLE_REPORT, &id.to_string(), report)?;
    tracing::debug!(id, block_time = report.block_time, "stored oracle report");
    Ok(id)
}

pub fn load_report(store: &RollupStore, id: u64) -> Result<Option<OracleReport>> {
    store.get_record(KIND_ORACLE_REPORT, &id.to_string())
}
