//! Layered application configuration.
//!
//! Defaults, then an optional YAML file, then `GETPLACE__*` environment variables
//! (`__` separates nesting levels, e.g. `GETPLACE__PLACES__SHORT_ID_LENGTH=6`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use places::config::PlacesConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "GETPLACE__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub places: PlacesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load and validate the layered configuration.
    ///
    /// # Errors
    ///
    /// Fails when `path` is given but is not a file, when a layer cannot be parsed or
    /// contains unknown keys, or when the places settings are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;

        config.places.validate()?;
        Ok(config)
    }

    /// `-v` info, `-vv` debug, `-vvv` trace. Zero keeps the configured level.
    pub fn apply_verbosity(&mut self, verbose: u8) {
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    /// Render as pretty JSON, which is also valid YAML.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}
