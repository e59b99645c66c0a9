//! On-disk application state: the `~/.fastdoc` directory and its
//! `config.toml`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory created under the user's home, unless overridden.
pub const APP_DIR_NAME: &str = ".fastdoc";
/// Default documents directory name inside the app dir.
pub const DOCS_DIR_NAME: &str = "docs";
/// Default API port.
pub const DEFAULT_API_PORT: u16 = 3333;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("fastdoc is not initialized at {} (run 'fastdoc init' first)", .0.display())]
    NotInitialized(PathBuf),

    #[error("invalid config file: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("failed to encode config: {0}")]
    EncodeConfig(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent daemon configuration, stored as `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the HTTP API listens on
    pub api_port: u16,

    /// Documents directory override; defaults to `<app_dir>/docs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<PathBuf>,

    /// Directory of static web UI assets served at the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            docs_dir: None,
            assets_dir: None,
        }
    }
}

/// Resolved application state: where everything lives on disk.
#[derive(Debug, Clone)]
pub struct AppState {
    pub app_dir: PathBuf,
    pub config_path: PathBuf,
    pub docs_dir: PathBuf,
    pub config: AppConfig,
}

impl AppState {
    /// The app directory, either overridden or `~/.fastdoc`.
    pub fn app_dir(config_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        match config_path {
            Some(dir) => Ok(dir),
            None => dirs::home_dir()
                .map(|home| home.join(APP_DIR_NAME))
                .ok_or(StateError::NoHomeDir),
        }
    }

    /// Creates the app directory, the documents directory, and writes
    /// the config file. Re-running is safe and rewrites the config.
    pub fn init(config_path: Option<PathBuf>, config: Option<AppConfig>) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(config_path)?;
        fs::create_dir_all(&app_dir)?;

        let config = config.unwrap_or_default();
        let docs_dir = resolve_docs_dir(&app_dir, &config);
        fs::create_dir_all(&docs_dir)?;

        let config_file = app_dir.join(CONFIG_FILE_NAME);
        fs::write(&config_file, toml::to_string_pretty(&config)?)?;
        tracing::debug!(config = %config_file.display(), "wrote app config");

        Ok(Self {
            app_dir,
            config_path: config_file,
            docs_dir,
            config,
        })
    }

    /// Loads previously initialized state from disk.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, StateError> {
        let app_dir = Self::app_dir(config_path)?;
        let config_file = app_dir.join(CONFIG_FILE_NAME);
        if !config_file.is_file() {
            return Err(StateError::NotInitialized(app_dir));
        }

        let raw = fs::read_to_string(&config_file)?;
        let config: AppConfig = toml::from_str(&raw)?;
        let docs_dir = resolve_docs_dir(&app_dir, &config);

        Ok(Self {
            app_dir,
            config_path: config_file,
            docs_dir,
            config,
        })
    }
}

fn resolve_docs_dir(app_dir: &std::path::Path, config: &AppConfig) -> PathBuf {
    config
        .docs_dir
        .clone()
        .unwrap_or_else(|| app_dir.join(DOCS_DIR_NAME))
}
