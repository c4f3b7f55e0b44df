//! Configuration types for sitlog.
//!
//! [`Config::load`] reads `~/.config/sitlog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[storage]
primary_key    = "logs"
mala_key       = "malaLogs"
data_dir       = "~/.local/share/sitlog"
keep_snapshots = 2

[buckets]
custom             = "CUSTOM"
unrecognized       = "__UNRECOGNIZED__"
custom_course_name = "Custom"

[export]
file_stem = "practice-logs"
pretty    = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sitlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub buckets: BucketsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[storage]` section of `config.toml`: where the persisted state lives
/// and which keys hold the two log collections.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default = "default_mala_key")]
    pub mala_key: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_keep_snapshots")]
    pub keep_snapshots: usize,
}

fn default_primary_key() -> String { "logs".to_string() }
fn default_mala_key() -> String { "malaLogs".to_string() }
fn default_data_dir() -> String { "~/.local/share/sitlog".to_string() }
fn default_keep_snapshots() -> usize { 2 }

impl StorageConfig {
    /// The data directory with a leading `~` expanded against `$HOME`.
    pub fn data_dir(&self) -> PathBuf {
        expand_home(&self.data_dir)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            primary_key: default_primary_key(),
            mala_key: default_mala_key(),
            data_dir: default_data_dir(),
            keep_snapshots: default_keep_snapshots(),
        }
    }
}

/// `[buckets]` section of `config.toml`: the reserved bucket key names.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketsConfig {
    #[serde(default = "default_custom")]
    pub custom: String,
    #[serde(default = "default_unrecognized")]
    pub unrecognized: String,
    #[serde(default = "default_custom_course_name")]
    pub custom_course_name: String,
}

fn default_custom() -> String { "CUSTOM".to_string() }
fn default_unrecognized() -> String { "__UNRECOGNIZED__".to_string() }
fn default_custom_course_name() -> String { "Custom".to_string() }

impl Default for BucketsConfig {
    fn default() -> Self {
        Self {
            custom: default_custom(),
            unrecognized: default_unrecognized(),
            custom_course_name: default_custom_course_name(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_file_stem() -> String { "practice-logs".to_string() }
fn default_pretty() -> bool { true }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_stem: default_file_stem(),
            pretty: default_pretty(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sitlog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sitlog")
        .join("config.toml")
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string())).join(rest)
        }
        None => PathBuf::from(path),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
