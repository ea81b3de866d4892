pub mod bucket;
pub mod checksum;
pub mod record;
pub mod report;
pub mod totals;

use std::path::PathBuf;

use anyhow::Result;

use rollupdbx::{
    config::{self, Config},
    store::RollupStore,
};

pub(crate) fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (cfg, _) = config::load_or_default(path)?;
    Ok(cfg)
}

pub(crate) fn open_store(cfg: &Config) -> Result<RollupStore> {
    Ok(RollupStore::open(cfg.store_path())?)
}
