use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Where the scheme catalog comes from. Without a `path`, the built-in
/// catalog is served.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    // Relative catalog paths resolve against the config file's directory.
    if let Some(catalog_path) = &config.catalog.path {
        if catalog_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog.path = Some(dir.join(catalog_path));
            }
        }
    }

    Ok(config)
}

/// Loads `path` if it exists. A missing file falls back to
/// [`Config::default`] only when `allow_missing` is set (the CLI passes
/// `true` for its default config location).
pub fn load_or_default(path: &Path, allow_missing: bool) -> Result<Config> {
    if allow_missing && !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    load_config(path)
}

fn validate(config: &Config) -> Result<()> {
    let bind = &config.server.bind;
    bind.parse::<SocketAddr>()
        .with_context(|| format!("server.bind is not a valid address: '{}'", bind))?;
    Ok(())
}
