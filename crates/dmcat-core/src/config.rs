//! Configuration types for dmcat.
//!
//! [`Config::load`] layers, lowest to highest precedence: the embedded
//! defaults below, `~/.config/dmcat/config.toml` if it exists, and `DMCAT_*`
//! environment variables (`DMCAT_SERVER__BIND=0.0.0.0:9000`).
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[data]
# Tried in order; the first readable file is used. Relative paths resolve
# against the working directory.
candidate_paths = [
    "../damage_mechanisms.normalized.json",
    "public/damage_mechanisms.json",
    "damage_mechanisms.normalized.json",
]

[server]
bind = "127.0.0.1:8080"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[data]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_candidate_paths")]
    pub candidate_paths: Vec<PathBuf>,
}

fn default_candidate_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("../damage_mechanisms.normalized.json"),
        PathBuf::from("public/damage_mechanisms.json"),
        PathBuf::from("damage_mechanisms.normalized.json"),
    ]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            candidate_paths: default_candidate_paths(),
        }
    }
}

/// `[server]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:8080".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. A missing user file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Config::load`], reading the user layer from `path`.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        Self::layered(path, None)
    }

    /// `env` replaces the process environment when given.
    fn layered(
        path: &std::path::Path,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(env_source().source(env))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), ?cfg, "configuration loaded");
        Ok(cfg)
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

/// `DMCAT_<SECTION>__<KEY>`; list values are comma-separated.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("DMCAT")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("data.candidate_paths")
        .try_parsing(true)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("dmcat")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
