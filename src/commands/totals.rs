use std::path::PathBuf;

use anyhow::Result;
use bigdecimal::BigDecimal;
use clap::{Args, Subcommand};

use rollupdbx::entity::GlobalTotals;

#[derive(Subcommand)]
pub enum TotalsCommands {
    /// Overwrite the global totals snapshot
    Set(SetArgs),
    /// Print the current snapshot
    Show,
}

#[derive(Args)]
pub struct SetArgs {
    #[arg(long)]
    pub tvl_eth: BigDecimal,
    #[arg(long)]
    pub tvl_usd: BigDecimal,
}

pub fn execute(config: Option<PathBuf>, command: TotalsCommands) -> Result<()> {
    let cfg = super::load_config(config)?;
    let store = super::open_store(&cfg)?;

    match command {
        TotalsCommands::Set(args) => {
            store.set_totals(&GlobalTotals {
                tvl_eth: args.tvl_eth,
                tvl_usd: args.tvl_usd,
            })?;
            println!("totals updated");
        }
        TotalsCommands::Show => match store.totals()? {
            Some(totals) => println!("{}", serde_json::to_string_pretty(&totals)?),
            None => println!("no totals stored"),
        },
    }
    Ok(())
}
