//! `configure.yml` loading and validation.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::domain::ExtensionFilter;

pub const FILE_NAME: &str = "configure.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to lookup executable: {0}")]
    Locate(io::Error),
    #[error("failed to read configure file {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse configure file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Upper bound on simultaneous downloads.
    pub parallel_download: usize,
    /// Extensions to keep, matched case-insensitively. Empty keeps everything.
    #[serde(default)]
    pub download_extension: Vec<String>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=Semaphore::MAX_PERMITS).contains(&self.parallel_download) {
            return Err(ConfigError::Validation(format!(
                "parallelDownload must be between 1 and {}, got {}",
                Semaphore::MAX_PERMITS,
                self.parallel_download
            )));
        }

        if let Some(index) = self.download_extension.iter().position(|ext| ext.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "downloadExtension[{index}] must not be empty"
            )));
        }

        Ok(())
    }

    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.download_extension)
    }
}

/// `configure.yml` next to the running executable.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(ConfigError::Locate)?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(FILE_NAME))
}

pub fn parse(raw: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw, path)
}
