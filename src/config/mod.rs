use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{ConversionError, Result};
use std::fs;
use log::debug;

const CONFIG_DIR_NAME: &str = "code2text";
const CONFIG_FILE_NAME: &str = "config.toml";
const OUTPUT_DIR_ENV: &str = "CODE2TEXT_OUTPUT_DIR";

/// Main configuration struct for the application
///
/// Only the locations and knobs of the surrounding orchestration live here.
/// The conversion tables and limits are constants of the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory under which converted trees are written
    pub output_dir: PathBuf,
    /// Directory that receives the packaged ZIP archives
    pub archive_dir: PathBuf,
    /// Default log level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Keep the unpacked converted tree after packaging
    pub keep_output: bool,
}

impl Config {
    /// Creates a new configuration with the specified output directory
    ///
    /// # Arguments
    /// * `output_dir` - The directory where converted trees will be stored
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            archive_dir: std::env::temp_dir().join(CONFIG_DIR_NAME),
            log_level: "info".to_string(),
            keep_output: false,
        }
    }

    /// Loads configuration from the default config file location
    ///
    /// If the config file doesn't exist, returns the default configuration.
    /// The config file is expected to be in TOML format.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConversionError::Config("Could not find config directory".into()))?;
        let config_path = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Loads configuration from an explicit TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConversionError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV) {
            if !dir.is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
        self
    }

    /// Ensures all directories required by the application exist
    pub async fn ensure_directories_exist(&self) -> Result<()> {
        for dir in [&self.output_dir, &self.archive_dir] {
            if !tokio::fs::try_exists(dir).await? {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PathBuf::from("output"))
    }
}
