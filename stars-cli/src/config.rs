use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use common::log_setup::LogOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub log_level: String,
    pub log_to_file: bool,
    /// Seed for tie-break sampling. Unset draws from OS entropy.
    pub seed: Option<u64>,
    /// Catalog loaded before the first prompt.
    pub catalog: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
            seed: None,
            catalog: None,
        }
    }
}

impl Config {
    /// A missing file means defaults; a present but unreadable one is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        common::serde::deserialize_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    pub fn log_options(&self) -> LogOptions {
        let defaults = LogOptions::default();
        LogOptions {
            base_level: self.log_level.clone(),
            log_dir: self.log_to_file.then_some(defaults.log_dir).flatten(),
            ..defaults
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
