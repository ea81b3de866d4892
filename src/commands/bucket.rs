use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};

use rollupdbx::entity::Granularity;

#[derive(Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    Day,
    Hour,
}

impl From<GranularityArg> for Granularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Day => Self::Day,
            GranularityArg::Hour => Self::Hour,
        }
    }
}

#[derive(Args)]
pub struct BucketArgs {
    /// Bucket width to inspect
    #[arg(value_enum)]
    pub granularity: GranularityArg,
    /// Period index (days or hours since epoch)
    #[arg(long, conflicts_with = "at")]
    pub index: Option<u64>,
    /// Timestamp in seconds; resolved to the enclosing period
    #[arg(long)]
    pub at: Option<u64>,
}

pub fn execute(config: Option<PathBuf>, args: BucketArgs) -> Result<()> {
    let cfg = super::load_config(config)?;
    let store = super::open_store(&cfg)?;
    let granularity = Granularity::from(args.granularity);

    let index = match (args.index, args.at) {
        (Some(index), _) => index,
        (None, Some(at)) => granularity.index(at),
        (None, None) => bail!("pass either --index or --at"),
    };

    match store.load_bucket(granularity, index)? {
        Some(bucket) => println!("{}", serde_json::to_string_pretty(&bucket)?),
        None => println!("no {} bucket at index {index}", granularity.bucket_kind()),
    }
    Ok(())
}
