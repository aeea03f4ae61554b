use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, CONFIG_FILE_STEM, DEFAULT_DATA_DIR, DEFAULT_MISSING_SENTINELS,
    OBSERVATIONS_FILE, PROVINCES_FILE, STATIONS_FILE,
};

/// How repeated (station_id, date) observations are treated before the join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Collapse duplicates into one observation holding the per-variable mean
    #[default]
    Average,
    /// Keep every row; duplicates weigh more in later means
    Keep,
    /// Fail the load
    Reject,
}

/// Where the reference tables live and how they are read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub provinces_file: String,
    pub stations_file: String,
    pub observations_file: String,
    pub missing_sentinels: Vec<f64>,
    pub duplicate_policy: DuplicatePolicy,
    pub use_mmap: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            provinces_file: PROVINCES_FILE.to_string(),
            stations_file: STATIONS_FILE.to_string(),
            observations_file: OBSERVATIONS_FILE.to_string(),
            missing_sentinels: DEFAULT_MISSING_SENTINELS.to_vec(),
            duplicate_policy: DuplicatePolicy::default(),
            use_mmap: false,
        }
    }
}

impl DataConfig {
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_missing_sentinels(mut self, sentinels: Vec<f64>) -> Self {
        self.missing_sentinels = sentinels;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Load from `climate-explorer.{toml,yaml,json}` in the working directory
    /// (if present), overridden by `CLIMATE_*` environment variables
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE_STEM).required(false))
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from an explicit config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn provinces_path(&self) -> PathBuf {
        self.data_dir.join(&self.provinces_file)
    }

    pub fn stations_path(&self) -> PathBuf {
        self.data_dir.join(&self.stations_file)
    }

    pub fn observations_path(&self) -> PathBuf {
        self.data_dir.join(&self.observations_file)
    }
}
