use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;

use rollupdbx::aggregator::{BucketAggregator, ObservedEvent};

#[derive(Args)]
pub struct RecordArgs {
    /// JSON-lines file of events: {"from": "0x..", "to": "0x..", "timestamp": N}
    pub events_file: PathBuf,
}

pub fn execute(config: Option<PathBuf>, args: RecordArgs) -> Result<()> {
    let cfg = super::load_config(config)?;
    let store = super::open_store(&cfg)?;
    let aggregator = BucketAggregator::new(&store);

    let file = File::open(&args.events_file)
        .with_context(|| format!("failed to open {}", args.events_file.display()))?;
    let reader = BufReader::new(file);

    let mut recorded = 0u64;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ObservedEvent = serde_json::from_str(&line)
            .with_context(|| format!("invalid event on line {}", line_no + 1))?;
        aggregator.record_event(&event)?;
        recorded += 1;
    }

    tracing::info!(recorded, "finished recording events");
    println!("recorded {recorded} events");
    Ok(())
}
