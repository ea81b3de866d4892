use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, RollupError},
    oracle::OracleSchedule,
};

pub const DEFAULT_ORACLE_PERIOD_SECS: u64 = 86_400;
pub const DEFAULT_ORACLE_RUNS_BUFFER: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub oracle: OracleSchedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Config {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            data_dir: default_data_dir(),
            oracle: OracleSchedule {
                first_report_at: 0,
                period_secs: DEFAULT_ORACLE_PERIOD_SECS,
                runs_buffer: DEFAULT_ORACLE_RUNS_BUFFER,
            },
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub data_dir: Option<PathBuf>,
    pub first_report_at: Option<u64>,
    pub period_secs: Option<u64>,
    pub runs_buffer: Option<u64>,
}

pub fn default_config_path() -> Result<PathBuf> {
    let mut path = env::current_dir().map_err(|err| RollupError::Config(err.to_string()))?;
    path.push(".rollupdbx");
    path.push("config.toml");
    Ok(path)
}

pub fn load_or_default(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let config_path = if let Some(path) = path {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        path
    } else {
        default_config_path()?
    };

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let cfg: Config = toml::from_str(&contents)?;
        cfg.ensure_data_dir()?;
        Ok((cfg, config_path))
    } else {
        let cfg = Config::default();
        cfg.ensure_data_dir()?;
        cfg.save(&config_path)?;
        Ok((cfg, config_path))
    }
}

impl Config {
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn apply_update(&mut self, update: ConfigUpdate) {
        if let Some(dir) = update.data_dir {
            self.data_dir = dir;
        }
        if let Some(first_report_at) = update.first_report_at {
            self.oracle.first_report_at = first_report_at;
        }
        if let Some(period_secs) = update.period_secs {
            self.oracle.period_secs = period_secs;
        }
        if let Some(runs_buffer) = update.runs_buffer {
            self.oracle.runs_buffer = runs_buffer;
        }
        self.updated_at = Utc::now();
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("rollup_store")
    }
}

fn default_data_dir() -> PathBuf {
    let Ok(current_dir) = env::current_dir() else {
        return PathBuf::from(".rollupdbx");
    };
    current_dir.join(".rollupdbx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_default_writes_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (mut cfg, cfg_path) = load_or_default(Some(path.clone())).unwrap();
        assert_eq!(cfg_path, path);
        assert_eq!(cfg.oracle.period_secs, DEFAULT_ORACLE_PERIOD_SECS);

        cfg.apply_update(ConfigUpdate {
            period_secs: Some(3_600),
            runs_buffer: Some(3),
            ..ConfigUpdate::default()
        });
        cfg.save(&path).unwrap();

        let (reloaded, _) = load_or_default(Some(path)).unwrap();
        assert_eq!(reloaded.oracle.period_secs, 3_600);
        assert_eq!(reloaded.oracle.runs_buffer, 3);
    }
}
