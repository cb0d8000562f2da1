//! Configuration management for fxtw.
//!
//! Parses `fxtw.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! prefix = "tw"
//! root = "src/app"
//! exclude = ["node_modules", "dist"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override class prefix.
    pub prefix: Option<String>,
    /// Override traversal roots.
    pub roots: Option<Vec<PathBuf>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fxtw.toml";

/// Directory names skipped during traversal by default.
const DEFAULT_EXCLUDE: &[&str] = &["node_modules", "dist"];

/// Raw configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigRaw {
    prefix: Option<String>,
    root: Option<String>,
    exclude: Option<Vec<String>>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Class name prefix (empty for none).
    pub prefix: String,
    /// Directories or files to convert.
    pub roots: Vec<PathBuf>,
    /// Directory names skipped during traversal.
    pub exclude: Vec<String>,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fxtw.toml` in current directory and parents.
    /// Without a config file the current directory is the only root.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(prefix) = &settings.prefix {
            self.prefix.clone_from(prefix);
        }
        if let Some(roots) = &settings.roots
            && !roots.is_empty()
        {
            self.roots.clone_from(roots);
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(c) = self
            .prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ConfigError::Validation(format!(
                "prefix contains invalid character '{c}'"
            )));
        }
        if self.exclude.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "exclude entries cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config rooted at the current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config rooted at `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            prefix: String::new(),
            roots: vec![base.to_path_buf()],
            exclude: DEFAULT_EXCLUDE.iter().map(|s| (*s).to_owned()).collect(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: ConfigRaw = toml::from_str(&content)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_raw(raw, config_dir);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve raw values; the root is relative to the config directory.
    fn from_raw(raw: ConfigRaw, config_dir: &Path) -> Self {
        let defaults = Self::default_with_base(config_dir);
        Self {
            prefix: raw.prefix.unwrap_or(defaults.prefix),
            roots: raw
                .root
                .map_or(defaults.roots, |root| vec![config_dir.join(root)]),
            exclude: raw.exclude.unwrap_or(defaults.exclude),
            config_path: None,
        }
    }
}
