use std::{fmt, path::Path, path::PathBuf, time::Duration};

use anyhow::Context;

use crate::{
    foundation::error::{BadgeError, BadgeResult},
    stats::fetch::{DEFAULT_API_BASE, DEFAULT_CLIENT_ID, FetchConfig},
};

/// Service settings, loadable from JSON. Every field has a default.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ServiceConfig {
    /// Upstream API root.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// `x-client` header value.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Bound on one upstream fetch.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// `max-age` of rendered stats badges.
    #[serde(default = "default_success_max_age_secs")]
    pub success_max_age_secs: u32,
    /// `max-age` of error and diagnostic panels.
    #[serde(default = "default_error_max_age_secs")]
    pub error_max_age_secs: u32,
    /// Extra directory scanned for font files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts_dir: Option<PathBuf>,
    /// Configured Habitica user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Configured Habitica API token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Honor `userId`/`apiToken` query parameters.
    #[serde(default)]
    pub allow_query_credentials: bool,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_owned()
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_owned()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_success_max_age_secs() -> u32 {
    1800
}

fn default_error_max_age_secs() -> u32 {
    300
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            client_id: default_client_id(),
            timeout_ms: default_timeout_ms(),
            success_max_age_secs: default_success_max_age_secs(),
            error_max_age_secs: default_error_max_age_secs(),
            fonts_dir: None,
            user_id: None,
            api_token: None,
            allow_query_credentials: false,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_base", &self.api_base)
            .field("client_id", &self.client_id)
            .field("timeout_ms", &self.timeout_ms)
            .field("success_max_age_secs", &self.success_max_age_secs)
            .field("error_max_age_secs", &self.error_max_age_secs)
            .field("fonts_dir", &self.fonts_dir)
            .field("user_id", &self.user_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("allow_query_credentials", &self.allow_query_credentials)
            .finish()
    }
}

impl ServiceConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> BadgeResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config file {}", path.display()))?;
        let cfg: Self = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse config JSON {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject a zero timeout and an unparsable API root.
    pub fn validate(&self) -> BadgeResult<()> {
        self.fetch_config().map(|_| ())
    }

    /// Upstream fetch settings.
    pub fn fetch_config(&self) -> BadgeResult<FetchConfig> {
        if self.timeout_ms == 0 {
            return Err(BadgeError::config("timeout_ms must be > 0"));
        }
        FetchConfig::new(
            &self.api_base,
            self.client_id.clone(),
            Duration::from_millis(self.timeout_ms),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/config.rs"]
mod tests;
