use std::{
    env,
    time::Duration,
};

use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    ApiError,
    ShakeItError,
};

pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_VAR: &str = "SHAKEIT_API_BASE";
const TIMEOUT_VAR: &str = "SHAKEIT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("shakeit/{} (+reqwest)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `SHAKEIT_API_BASE` and `SHAKEIT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ShakeItError> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }

        if let Ok(timeout) = env::var(TIMEOUT_VAR) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                ShakeItError::Config(format!(
                    "{TIMEOUT_VAR} must be a number of seconds, got {timeout:?}"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ShakeItError> {
        if self.timeout_secs == 0 {
            return Err(ShakeItError::Config("timeout must be greater than zero".to_string()));
        }
        self.base_url().map_err(|_| {
            ShakeItError::Config(format!("invalid API base URL {:?}", self.base_url))
        })?;
        Ok(())
    }

    /// The base URL with a trailing slash, so endpoint paths join below it
    /// instead of replacing its last segment.
    pub fn base_url(&self) -> Result<Url, ApiError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|_| ApiError::InvalidUrl)?;
        if url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
