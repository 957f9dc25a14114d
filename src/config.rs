//! Runtime settings
//!
//! Layered lowest to highest: built-in defaults, an optional YAML file,
//! environment variables, then command-line flags (applied by the CLI).

use crate::auth::{default_token_path, DEFAULT_TOKEN_PARAM};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "CANVAS_BASE_URL";

/// Environment variable overriding `token_file`
pub const ENV_TOKEN_FILE: &str = "CANVAS_TOKEN_FILE";

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://canvas.sydney.edu.au/api/v1";

/// Everything a report run needs besides the token itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// API root, e.g. `https://lms.example.com/api/v1`
    pub base_url: String,

    /// Page size requested from list endpoints
    pub per_page: u32,

    /// Transport timeout per request
    pub timeout_secs: u64,

    /// Retries per request (0 = surface the first failure)
    pub max_retries: u32,

    /// Backoff between retries
    pub backoff: BackoffType,

    /// Ceiling on pages per fetch sequence (unset = unbounded)
    pub max_pages: Option<usize>,

    /// Request rate ceiling
    pub requests_per_second: u32,

    /// Directory the CSV report is written into
    pub output_dir: PathBuf,

    /// Query parameter carrying the access token
    pub token_param: String,

    /// File holding the access token
    pub token_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: 100,
            timeout_secs: 30,
            max_retries: 0,
            backoff: BackoffType::Exponential,
            max_pages: None,
            requests_per_second: 10,
            output_dir: PathBuf::from("."),
            token_param: DEFAULT_TOKEN_PARAM.to_string(),
            token_file: None,
        }
    }
}

impl Settings {
    /// Parse settings from YAML; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Apply `CANVAS_BASE_URL` / `CANVAS_TOKEN_FILE` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = base_url;
        }
        if let Some(token_file) = lookup(ENV_TOKEN_FILE).none_if_empty() {
            self.token_file = Some(PathBuf::from(token_file));
        }
    }

    /// Reject values that would only fail later, mid-run
    pub fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.per_page == 0 {
            return Err(Error::config("per_page must be at least 1"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::config("max_pages must be at least 1 when set"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        if self.token_param.trim().is_empty() {
            return Err(Error::missing_field("token_param"));
        }
        Ok(())
    }

    /// Parsed API root
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base_url {} is not a hierarchical URL",
                self.base_url
            )));
        }
        Ok(url)
    }

    /// Token file to read: configured path, else `~/.canvas_token`
    pub fn token_path(&self) -> PathBuf {
        self.token_file.clone().unwrap_or_else(default_token_path)
    }

    /// HTTP client configuration derived from these settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(250),
                Duration::from_secs(30),
            )
            .rate_limit(RateLimiterConfig::per_second(self.requests_per_second))
            .build()
    }
}
