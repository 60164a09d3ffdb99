//! Configuration file discovery and loading.
//!
//! This module finds reserva configuration files and parses them in
//! precedence order.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the user config inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// File name of the working-directory config.
pub const PROJECT_CONFIG_FILE: &str = "reserva.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from the known file locations.
///
/// # Examples
///
/// ```no_run
/// use reserva::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. `{data_dir}/config.yaml` (precedence 1)
    /// 2. `reserva.yaml` in `working_dir` (precedence 2)
    ///
    /// When `data_dir` is `None` the default data directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        let user_path = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => Self::user_config_path()?,
        };
        if let Some(source) = Self::load_optional(user_path, 1)? {
            sources.push(source);
        }

        let project_path = working_dir.join(PROJECT_CONFIG_FILE);
        if let Some(source) = Self::load_optional(project_path, 2)? {
            sources.push(source);
        }

        sources.sort_by_key(|s| s.precedence);
        Ok(sources)
    }

    fn load_optional(path: PathBuf, precedence: u8) -> Result<Option<ConfigSource>> {
        if !path.exists() {
            return Ok(None);
        }
        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(Some(ConfigSource {
            path,
            precedence,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// An empty file parses as the empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Failed to read configuration file: {e}"),
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    fn user_config_path() -> Result<PathBuf> {
        let data_dir = crate::database::default_data_dir()?;
        Ok(data_dir.join(USER_CONFIG_FILE))
    }
}
