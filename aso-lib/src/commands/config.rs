use crate::Result;
use crate::store::StoreKind;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "aso.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Marketplace the scores are computed for
    #[serde(default = "default_store")]
    pub store: StoreKind,

    /// JSON snapshot to serve marketplace data from
    #[serde(default)]
    pub catalog: Option<Utf8PathBuf>,

    /// Base URL of the marketplace gateway
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Time allowed for a single gateway request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Largest number of gateway requests in flight at once
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Number of keywords returned by a suggestion
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
}

const fn default_store() -> StoreKind {
    StoreKind::GooglePlay
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_max_concurrent_requests() -> usize {
    8
}

const fn default_suggestion_count() -> usize {
    crate::suggest::DEFAULT_SUGGESTION_COUNT
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `aso.toml` in `base_dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading aso configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading aso configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a count or timeout is zero, or the endpoint is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_requests == 0 {
            return Err(app_err!("max_concurrent_requests must be at least 1"));
        }

        if self.suggestion_count == 0 {
            return Err(app_err!("suggestion_count must be at least 1"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint).into_app_err_with(|| format!("parsing endpoint '{endpoint}'"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(app_err!("endpoint must be an http or https URL, got '{endpoint}'"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
