//! Run configuration loaded from an optional RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use comic_engine::{FetchSettings, PipelineConfig, DEFAULT_BASE_URL};
use index_logging::{index_debug, index_info};
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "comic_index.ron";
pub const CONFIG_ENV: &str = "COMIC_INDEX_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub job_count: u64,
    pub worker_count: usize,
    pub job_queue_capacity: usize,
    pub result_queue_capacity: usize,
    pub output_path: PathBuf,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            job_count: pipeline.job_count,
            worker_count: pipeline.worker_count,
            job_queue_capacity: pipeline.job_queue_capacity,
            result_queue_capacity: pipeline.result_queue_capacity,
            output_path: PathBuf::from("xkcd.json"),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 5 * 60,
            connect_timeout_secs: 30,
            max_bytes: 1024 * 1024,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load from `$COMIC_INDEX_CONFIG`, else `./comic_index.ron`, else defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Self::from_optional_file(Path::new(CONFIG_FILENAME)),
        }
    }

    /// Like [`AppConfig::from_file`], but a missing file yields the defaults.
    pub fn from_optional_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            index_debug!("No config at {:?}; using defaults", path);
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::from_file(path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        index_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("job_count", self.job_count),
            ("worker_count", self.worker_count as u64),
            ("job_queue_capacity", self.job_queue_capacity as u64),
            ("result_queue_capacity", self.result_queue_capacity as u64),
            ("request_timeout_secs", self.request_timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("max_bytes", self.max_bytes),
        ];
        match checks.into_iter().find(|(_, value)| *value == 0) {
            Some((name, _)) => Err(ConfigError::NotPositive(name)),
            None => Ok(()),
        }
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            job_count: self.job_count,
            worker_count: self.worker_count,
            job_queue_capacity: self.job_queue_capacity,
            result_queue_capacity: self.result_queue_capacity,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }
}
