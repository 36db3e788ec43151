//! Optional `seatmap.toml` configuration.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use seatmap_core::CanvasDimensions;
use serde::Deserialize;

/// Configuration file looked up in the working directory when no path is given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "seatmap.toml";

/// Data set file used when neither the config nor the command line names one.
const DEFAULT_DATA_PATH: &str = "seatmap-data.json";

/// Filter applied when neither `RUST_LOG` nor the config sets one.
pub(crate) const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub(crate) canvas: CanvasConfig,
    pub(crate) logging: LoggingConfig,
    pub(crate) storage: StorageConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CanvasConfig {
    /// Canvas size given to maps created by a session.
    pub(crate) dimensions: CanvasDimensions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    pub(crate) filter: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct StorageConfig {
    pub(crate) data_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// Reads the configuration file.
    ///
    /// A missing file yields the defaults unless `required` is set, which is
    /// the case when the operator named the file explicitly.
    pub(crate) fn load(path: &Path, required: bool) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read config at {}", path.display()));
            }
        };
        Self::parse(&contents)
            .with_context(|| format!("failed to load config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Filter used when `RUST_LOG` is unset.
    pub(crate) fn log_filter(&self) -> &str {
        self.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
