use std::path::PathBuf;

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::Utc;
use clap::{Args, Subcommand};

use rollupdbx::{
    oracle::{self, OracleReport},
    resolver::NONE_ID,
};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Resolve the id of the most recent stored report
    Last(AtArgs),
    /// Resolve the next free report id
    Next(AtArgs),
    /// Store a new report under the next free id
    Append(AppendArgs),
}

#[derive(Args)]
pub struct AtArgs {
    /// Reference time in seconds; defaults to now
    #[arg(long)]
    pub at: Option<u64>,
}

#[derive(Args)]
pub struct AppendArgs {
    #[arg(long)]
    pub total_pooled_ether: BigDecimal,
    #[arg(long)]
    pub total_shares: BigDecimal,
    /// Report block time in seconds; defaults to now
    #[arg(long)]
    pub at: Option<u64>,
}

fn now_or(at: Option<u64>) -> u64 {
    at.unwrap_or_else(|| Utc::now().timestamp().max(0) as u64)
}

pub fn execute(config: Option<PathBuf>, command: ReportCommands) -> Result<()> {
    let cfg = super::load_config(config)?;
    let store = super::open_store(&cfg)?;

    match command {
        ReportCommands::Last(args) => {
            let id = oracle::latest_report_id(&store, now_or(args.at), &cfg.oracle)?;
            if id == NONE_ID {
                println!("no reports stored");
            } else {
                println!("{id}");
                if let Some(report) = oracle::load_report(&store, id)? {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        ReportCommands::Next(args) => {
            let id = oracle::next_report_id(&store, now_or(args.at), &cfg.oracle)?;
            println!("{id}");
        }
        ReportCommands::Append(args) => {
            let report = OracleReport {
                total_pooled_ether: args.total_pooled_ether,
                total_shares: args.total_shares,
                block_time: now_or(args.at),
            };
            let id = oracle::append_report(&store, &cfg.oracle, &report)?;
            println!("stored report {id}");
        }
    }
    Ok(())
}
