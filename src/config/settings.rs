//! TOML-based configuration for quarry.
//!
//! Example configuration:
//! ```toml
//! [render]
//! dialect = "postgres"
//! as_keyword = true
//! alias_quote_char = "'"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::sql::context::{ContextOverrides, RenderContext};
use crate::sql::dialect::Dialect;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "QUARRY_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Rendering defaults.
    pub render: RenderSettings,
}

/// Rendering defaults applied over the dialect's own context.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    pub dialect: Dialect,

    /// Emit `AS` before aliases.
    pub as_keyword: bool,

    /// Identifier quote override.
    pub quote_char: Option<String>,

    /// String literal quote override.
    pub secondary_quote_char: Option<String>,

    /// Alias quote override.
    pub alias_quote_char: Option<String>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `QUARRY_CONFIG`
    /// 2. `./quarry.toml`
    /// 3. `<config_dir>/quarry/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if !path.exists() {
                warn!(path = %path.display(), "{CONFIG_ENV_VAR} points to a missing file");
            }
            info!(path = %path.display(), "loading settings");
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("quarry.toml");
        if local_config.exists() {
            info!(path = %local_config.display(), "loading settings");
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("quarry").join("config.toml");
            if user_config.exists() {
                info!(path = %user_config.display(), "loading settings");
                return Self::from_file(&user_config);
            }
        }

        info!("no config file found, using default settings");
        Ok(Settings::default())
    }

    /// The configured dialect's default context with the overrides applied.
    pub fn render_context(&self) -> RenderContext {
        let render = &self.render;
        RenderContext::for_dialect(render.dialect).with_overrides(ContextOverrides {
            quote_char: render.quote_char.clone(),
            secondary_quote_char: render.secondary_quote_char.clone(),
            alias_quote_char: render.alias_quote_char.clone(),
            as_keyword: Some(render.as_keyword),
            ..Default::default()
        })
    }
}
