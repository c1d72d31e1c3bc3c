//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.texide/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TexideConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub compile_path: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub tab_width: Option<usize>,
    pub theme: Option<String>,
    pub export_dir: Option<String>,
    pub viewer: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_COMPILE_PATH: &str = "/compile";
pub const DEFAULT_TAB_WIDTH: usize = 4;
pub const DEFAULT_THEME: &str = "base16-ocean.dark";
pub const DEFAULT_EXPORT_DIR: &str = "./downloads";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    pub compile_path: String,
    /// `None` = wait forever, like the browser's fetch.
    pub timeout: Option<Duration>,
    pub tab_width: usize,
    pub theme: String,
    pub export_dir: PathBuf,
    pub viewer: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.texide/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".texide").join("config.toml"))
}

/// Load config from `~/.texide/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TexideConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TexideConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TexideConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TexideConfig::default());
    }

    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<TexideConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TexideConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Texide Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8080"  # Or set TEXIDE_SERVER_URL, or pass --server
# compile_path = "/compile"
# timeout_secs = 60                   # Omit to wait indefinitely

# [general]
# tab_width = 4
# theme = "base16-ocean.dark"         # Any syntect default theme
# export_dir = "./downloads"          # Where Ctrl+E writes PDFs
# viewer = "zathura"                  # Or set TEXIDE_VIEWER; opened after export
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_server` is the `--server` flag (None = not specified).
pub fn resolve(config: &TexideConfig, cli_server: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_server, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &TexideConfig,
    cli_server: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Server URL: CLI → env → config → default
    let server_url = cli_server
        .map(|s| s.to_string())
        .or_else(|| env("TEXIDE_SERVER_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    // Viewer: env → config
    let viewer = env("TEXIDE_VIEWER")
        .or_else(|| config.general.viewer.clone())
        .filter(|v| !v.trim().is_empty());

    ResolvedConfig {
        server_url,
        compile_path: config
            .server
            .compile_path
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPILE_PATH.to_string()),
        timeout: config
            .server
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        tab_width: config
            .general
            .tab_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_TAB_WIDTH),
        theme: config
            .general
            .theme
            .clone()
            .unwrap_or_else(|| DEFAULT_THEME.to_string()),
        export_dir: PathBuf::from(
            config
                .general
                .export_dir
                .as_deref()
                .unwrap_or(DEFAULT_EXPORT_DIR),
        ),
        viewer,
    }
}
