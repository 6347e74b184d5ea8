//! Configuration file management.
//!
//! Reads the optional `config.toml` from the user config directory. Every
//! field has a default, so a missing default file is not an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::layout::Layout;
use crate::core::path::expand_path;
use crate::error::{ConfigError, Result};

/// Settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key ring locations
    pub keyring: KeyRingPaths,
    /// Directory layout and suffix pair
    pub layout: Layout,
}

/// `[keyring]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyRingPaths {
    /// Private key ring, `~/` allowed
    pub secret: PathBuf,
    /// Public key ring, `~/` allowed
    pub public: PathBuf,
}

impl Default for KeyRingPaths {
    fn default() -> Self {
        Self {
            secret: PathBuf::from(constants::DEFAULT_SECRET_RING),
            public: PathBuf::from(constants::DEFAULT_PUBLIC_RING),
        }
    }
}

impl Settings {
    /// Default config file location (`<config_dir>/sealdir/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_FILE))
    }

    /// Load settings.
    ///
    /// An explicit path (`~/` allowed) must exist. Without one, the default
    /// location is used when present and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => expand_path(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!(path = %path.display(), "loading config");
        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::InvalidValue`.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the key ring paths and layout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first invalid field.
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("keyring.secret", &self.keyring.secret),
            ("keyring.public", &self.keyring.public),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "path is empty".to_string(),
                }
                .into());
            }
        }
        self.layout.validate()
    }
}
