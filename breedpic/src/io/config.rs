//! Optional TOML configuration for `breedpic`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde::Deserialize;

use crate::core::url::DEFAULT_BASE_URL;
use crate::io::fetch::FetchStrategy;
use crate::io::output::DEFAULT_OUTPUT_PATH;

/// Fetch configuration (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// built-in defaults, which reproduce the plain interactive behavior.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// API root; the request goes to `<base_url>/breed/<breed>/images/random`.
    pub base_url: String,

    /// File that receives the image URL (overwritten on every run).
    pub output_path: PathBuf,

    pub fetcher: FetchStrategy,

    /// Whole-request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fetcher: FetchStrategy::default(),
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("base_url is not a valid URL: {}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("base_url must use http or https: {}", self.base_url));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(anyhow!("output_path must not be empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AppConfig::default()`.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let cfg = AppConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
