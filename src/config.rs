// Configuration module for reading Gamma.toml
// Holds the board size limit applied to untrusted input, the default log
// filter and the switch for the JSONL command trace

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "Gamma.toml";

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub debug: DebugConfig,
}

/// Resource limits applied when games are created from untrusted input
#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    pub max_board_cells: u64,
}

impl LimitsConfig {
    /// Checks a requested board size against the cell limit
    pub fn allows_board(&self, width: u32, height: u32) -> bool {
        u64::from(width) * u64::from(height) <= self.max_board_cells
    }
}

/// Log filter used when RUST_LOG is not set
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub default_level: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Gamma.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Gamma.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values in Gamma.toml
    pub fn default_hardcoded() -> Self {
        Config {
            limits: LimitsConfig {
                max_board_cells: 100_000_000,
            },
            logging: LoggingConfig {
                default_level: "warn".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "gamma_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from `path`, falls back to hardcoded defaults on error
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path.as_ref()).unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load {} ({}), using hardcoded defaults",
                path.as_ref().display(),
                e
            );
            Self::default_hardcoded()
        })
    }
}
