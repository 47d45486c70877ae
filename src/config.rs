use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ColorError, Result};
use crate::names::{NameResolver, FALLBACK_HEX};
use crate::remote::DEFAULT_BASE_URL;

/// Settings read from `config.toml`. Every field is optional.
///
/// ```toml
/// data_dir = "/home/me/.local/share/colorbook"
/// api_base_url = "https://www.thecolorapi.com"
/// fallback_hex = "#cccccc"
///
/// [names]
/// teal = "#008080"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where saved collections live. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Hex for names the resolver does not know.
    #[serde(default = "default_fallback_hex")]
    pub fallback_hex: String,

    /// Extra or replacement name → hex entries.
    #[serde(default)]
    pub names: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            api_base_url: default_api_base_url(),
            fallback_hex: default_fallback_hex(),
            names: HashMap::new(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fallback_hex() -> String {
    FALLBACK_HEX.to_string()
}

impl Config {
    /// `~/.config/colorbook/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("colorbook").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ColorError::Config(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        Self::from_toml(&contents).map_err(|e| match e {
            ColorError::Config(msg) => ColorError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ColorError::Config(e.to_string()))?;
        config
            .name_resolver()
            .map_err(|e| ColorError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Directory for the file store.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join("colorbook"))
                .ok_or_else(|| ColorError::Config("could not determine data directory".into())),
        }
    }

    /// Resolver with the configured fallback and name overrides applied.
    pub fn name_resolver(&self) -> Result<NameResolver> {
        NameResolver::new()
            .with_fallback(&self.fallback_hex)?
            .with_overrides(&self.names)
    }
}
