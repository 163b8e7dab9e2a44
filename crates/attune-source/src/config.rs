use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

/// The published song catalog.
pub const DEFAULT_SOURCE: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vT09BUESKSHoUFUtYoEp_iDZjN0P47gPaOFJkB-4d-fEesWJfxBnco-ib3NgTnsmD8a5HArrTaZx4_E/pub?gid=640910969&single=true&output=tsv";

/// Configuration for attune.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (ATTUNE_* prefix)
/// 3. Config file (~/.config/attune/config.toml)
/// 4. Built-in defaults (lowest priority)
///
/// Filter targets and tolerances are deliberately absent: they live only for
/// the duration of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Location of the song catalog, an http(s) URL or a local path.
    ///
    /// Can be set via:
    /// - CLI: --source <LOCATION>
    /// - ENV: ATTUNE_SOURCE
    /// - Config: source = "..."
    #[serde(default = "default_source")]
    pub source: String,

    /// Per-request timeout for remote catalogs, in seconds.
    #[serde(default = "default_timeout_secs", deserialize_with = "native_or_text")]
    pub timeout_secs: u64,

    /// How many times a transient fetch failure is retried.
    #[serde(default = "default_max_retries", deserialize_with = "native_or_text")]
    pub max_retries: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logger settings handed to the binary at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_coloured", deserialize_with = "native_or_text")]
    pub coloured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            coloured: default_coloured(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/attune/config.toml
    /// Reads environment variables with ATTUNE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        // ATTUNE_LOGGING_* lands in [logging]; everything else is top-level.
        let mut env_opts = env::Options::with_top_level("attune");
        env_opts.add_section("logging");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting an explicit `--source` win.
    pub fn load_with_source(source: Option<String>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(source) = source {
            config.source = source;
        }
        Ok(config)
    }
}

/// Accept a value either in its TOML type or as a string to parse.
///
/// Environment variables always arrive as strings, so `ATTUNE_MAX_RETRIES=7`
/// has to read the same as `max_retries = 7` in the file.
fn native_or_text<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Native(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Native(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_retries() -> usize {
    3
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_coloured() -> bool {
    true
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/attune/config.toml
/// - macOS: ~/Library/Application Support/attune/config.toml
/// - Windows: %APPDATA%\attune\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attune")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Attune Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (ATTUNE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Location of the song catalog: an http(s) URL serving TSV, or a local path
#
# Can also be set via:
# - CLI: attune filter --source ./songs.tsv
# - Environment: ATTUNE_SOURCE=./songs.tsv
#
# Default: the published catalog spreadsheet
#source = "https://example.com/songs.tsv"

# Per-request timeout for remote catalogs, in seconds
timeout_secs = 30

# Retries for transient fetch failures (timeouts, 5xx, 429)
max_retries = 3

[logging]
# One of: trace, debug, info, warn, error
level = "warn"
coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.coloured);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_explicit_source() {
        let config = Config::load_with_source(Some("/tmp/songs.tsv".to_string()));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().source, "/tmp/songs.tsv");
    }

    #[test]
    fn test_example_config_parses() {
        let parsed: Config = toml_from_example();
        assert_eq!(parsed.source, DEFAULT_SOURCE);
        assert_eq!(parsed.timeout_secs, 30);
        assert_eq!(parsed.logging, LoggingConfig::default());
    }

    #[test]
    fn test_env_overrides_typed_and_nested_keys() {
        // Only this test sets these variables; other tests tolerate them.
        let vars = [
            ("ATTUNE_MAX_RETRIES", "7"),
            ("ATTUNE_TIMEOUT_SECS", " 12 "),
            ("ATTUNE_LOGGING_LEVEL", "debug"),
            ("ATTUNE_LOGGING_COLOURED", "false"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let result = Config::load();

        for (key, _) in vars {
            std::env::remove_var(key);
        }
        let config = result.unwrap();
        assert_eq!(config.max_retries, 7);
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.coloured);
    }

    #[test]
    fn test_text_values_parse_like_native_ones() {
        let config = config_from_toml(
            "timeout_secs = '45'\nmax_retries = '0'\n[logging]\ncoloured = 'true'\n",
        );
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.max_retries, 0);
        assert!(config.logging.coloured);
    }

    #[test]
    fn test_unparseable_text_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_retries = 'lots'\n").unwrap();

        let mut builder = Confygery::new().unwrap();
        builder.add_file(path.to_str().unwrap()).unwrap();
        assert!(builder.build::<Config>().is_err());
    }

    fn toml_from_example() -> Config {
        config_from_toml(example_config())
    }

    fn config_from_toml(contents: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();

        let mut builder = Confygery::new().unwrap();
        builder.add_file(path.to_str().unwrap()).unwrap();
        builder.build().unwrap()
    }
}
