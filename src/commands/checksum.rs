use anyhow::Result;
use clap::Args;

use rollupdbx::checksum::{self, Address};

#[derive(Args)]
pub struct ChecksumArgs {
    /// Hex address, with or without the 0x prefix
    pub address: Address,
}

pub fn execute(args: ChecksumArgs) -> Result<()> {
    println!("{}", checksum::to_checksum(&args.address));
    Ok(())
}
