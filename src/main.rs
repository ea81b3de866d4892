mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    bucket::BucketArgs, checksum::ChecksumArgs, record::RecordArgs, report::ReportCommands,
    totals::TotalsCommands,
};

#[derive(Parser)]
#[command(author, version, about = "Rollup aggregate maintenance CLI")]
struct Cli {
    /// Path to the configuration file. Defaults to ./.rollupdbx/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold a file of events into the day/hour rollups
    Record(RecordArgs),
    /// Inspect a rollup bucket
    Bucket(BucketArgs),
    /// Resolve or append oracle reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Manage the global totals snapshot
    Totals {
        #[command(subcommand)]
        command: TotalsCommands,
    },
    /// Print the EIP-55 checksummed form of an address
    Checksum(ChecksumArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let Cli { config, command } = Cli::parse();

    match command {
        Commands::Record(args) => commands::record::execute(config, args)?,
        Commands::Bucket(args) => commands::bucket::execute(config, args)?,
        Commands::Report { command } => commands::report::execute(config, command)?,
        Commands::Totals { command } => commands::totals::execute(config, command)?,
        Commands::Checksum(args) => commands::checksum::execute(args)?,
    }

    Ok(())
}
