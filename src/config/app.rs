// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::defaults::*;
use crate::consts::DEFAULT_CONFIG_FILE;
use crate::enums::WriteMode;
use crate::error::CoreError;

pub const ENV_CONFIG: &str = "FILECRYPT_CONFIG";
pub const ENV_KEY_DIR: &str = "FILECRYPT_KEY_DIR";
pub const ENV_KDF_ITERATIONS: &str = "FILECRYPT_KDF_ITERATIONS";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_kdf")]
    pub kdf: KdfSettings,
    #[serde(default = "default_batch")]
    pub batch: BatchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub key_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KdfSettings {
    pub iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    pub write_mode: WriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: default_paths(),
            kdf: default_kdf(),
            batch: default_batch(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let conf: Config =
            toml::from_str(content).map_err(|e| CoreError::Config(format!("invalid TOML: {e}")))?;
        conf.validate()?;
        Ok(conf)
    }

    /// Apply `FILECRYPT_*` overrides through `lookup` (normally `std::env::var`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_KEY_DIR) {
            self.paths.key_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_KDF_ITERATIONS) {
            self.kdf.iterations = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("{ENV_KDF_ITERATIONS} is not a number: {raw:?}"))
            })?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.kdf.iterations == 0 {
            return Err(CoreError::Config("kdf.iterations must be at least 1".into()));
        }
        Ok(())
    }
}

/// Load config from `$FILECRYPT_CONFIG` (default `filecrypt.toml`) plus env overrides
pub fn load() -> Result<Config, CoreError> {
    let config_path =
        std::env::var(ENV_CONFIG).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    load_from(config_path)
}

/// Load config from an explicit path; a missing file means defaults
pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Config, CoreError> {
    let path = path.as_ref();

    let mut conf = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("cannot read {}: {e}", path.display())))?;
        Config::from_toml_str(&content)?
    } else {
        warn!(config = %path.display(), "config file not found, using built-in defaults");
        Config::default()
    };

    conf.apply_overrides(|name| std::env::var(name).ok())?;
    Ok(conf)
}
