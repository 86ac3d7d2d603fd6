//! Configuration system for TeamMate
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (TEAMMATE_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Default number of members per team
pub const DEFAULT_TEAM_SIZE: usize = 5;

/// Log levels accepted in `[logging] level`
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeammateConfig {
    /// Team formation settings
    pub allocation: AllocationSettings,

    /// Participant roster location
    pub roster: RosterSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Team formation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    /// Members per team
    pub team_size: usize,

    /// Fixed shuffle seed for reproducible formations (unset = random)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Roster file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSettings {
    /// JSON roster of participant records
    pub path: String,

    /// Where to write formed teams as JSON (unset = don't write)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams_output: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            seed: None,
        }
    }
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            path: "~/.teammate/participants.json".to_string(),
            teams_output: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl TeammateConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Parse a single configuration file without overrides or validation
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            message: format!("{}: {}", path.display(), e),
            source: Some(e),
        })?;
        info!(path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&Path>) -> Result<Option<PathBuf>> {
        // An explicit path must exist
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(&path.to_string_lossy()));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            PathBuf::from("teammate.toml"),
            dirs::config_dir()
                .map(|p| p.join("teammate").join("config.toml"))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|p| p.join(".teammate").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`; unparsable numbers are ignored
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Allocation settings
        if let Some(n) = lookup("TEAMMATE_TEAM_SIZE").and_then(|v| v.parse().ok()) {
            self.allocation.team_size = n;
        }
        if let Some(n) = lookup("TEAMMATE_SEED").and_then(|v| v.parse().ok()) {
            self.allocation.seed = Some(n);
        }

        // Roster settings
        if let Some(val) = lookup("TEAMMATE_ROSTER") {
            self.roster.path = val;
        }
        if let Some(val) = lookup("TEAMMATE_TEAMS_OUTPUT") {
            self.roster.teams_output = Some(val);
        }

        // Logging settings
        if let Some(val) = lookup("TEAMMATE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("TEAMMATE_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Some(val) = lookup("TEAMMATE_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.roster.path = expand_path(&self.roster.path);

        if let Some(ref out) = self.roster.teams_output {
            self.roster.teams_output = Some(expand_path(out));
        }
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Override roster and report paths from the command line, expanding
    /// `~` and `$VAR` the same way file values are expanded
    pub fn override_paths(&mut self, roster: Option<&Path>, teams_output: Option<&Path>) {
        if let Some(path) = roster {
            self.roster.path = expand_path(&path.to_string_lossy());
        }
        if let Some(path) = teams_output {
            self.roster.teams_output = Some(expand_path(&path.to_string_lossy()));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.allocation.team_size == 0 {
            return Err(Error::config_field_invalid(
                "allocation.team_size",
                "team_size must be greater than zero",
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.roster.path.trim().is_empty() {
            return Err(Error::config_field_invalid("roster.path", "Roster path cannot be empty"));
        }

        Ok(())
    }

    /// Get the roster file as a PathBuf
    pub fn roster_path(&self) -> PathBuf {
        PathBuf::from(&self.roster.path)
    }

    /// Get the teams output file, if configured
    pub fn teams_output_path(&self) -> Option<PathBuf> {
        self.roster.teams_output.as_deref().map(PathBuf::from)
    }
}

/// Expand ~ and environment variables in paths
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location written by `config init`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".teammate")
        .join("config.toml")
}

/// Initialize a new configuration file and return where it was written
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(&p.to_string_lossy())))
        .unwrap_or_else(default_config_path);

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
pub fn generate_default_config() -> String {
    format!(
        r#"# TeamMate Configuration

[allocation]
# Members per team
team_size = {team_size}

# Fixed shuffle seed for reproducible formations (comment out for random)
# seed = 42

[roster]
# JSON roster of participant records
path = "~/.teammate/participants.json"

# Write formed teams as JSON (comment out to disable)
# teams_output = "~/.teammate/teams.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.teammate/logs/teammate.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#,
        team_size = DEFAULT_TEAM_SIZE
    )
}
