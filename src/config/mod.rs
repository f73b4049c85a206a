#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{CompaniesError, Result};
use crate::utils::validation::{
    validate_header_value, validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::env;
use std::fmt;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "AT_BASE";
pub const ENV_INTEGRATION_CODE: &str = "AT_API_INTEGRATION_CODE";
pub const ENV_USERNAME: &str = "AT_API_USERNAME";
pub const ENV_SECRET: &str = "AT_API_SECRET";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "AT_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Connection details for the Autotask REST API.
///
/// Loaded once per process and handed to the client by value; nothing reads
/// the environment after start-up.
#[derive(Clone)]
pub struct AutotaskConfig {
    pub base_url: String,
    pub integration_code: String,
    pub username: String,
    pub secret: String,
    pub request_timeout: Duration,
}

impl AutotaskConfig {
    pub fn new(
        base_url: impl Into<String>,
        integration_code: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            integration_code: integration_code.into(),
            username: username.into(),
            secret: secret.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source, `from_env` being the usual one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| CompaniesError::MissingConfigError {
                field: key.to_string(),
            })
        };

        let mut config = Self::new(
            required(ENV_BASE_URL)?,
            required(ENV_INTEGRATION_CODE)?,
            required(ENV_USERNAME)?,
            required(ENV_SECRET)?,
        );

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| CompaniesError::InvalidConfigValueError {
                    field: ENV_REQUEST_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    reason: format!("{}", e),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn query_url(&self) -> String {
        format!("{}/Companies/query", self.base_url)
    }
}

impl fmt::Debug for AutotaskConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutotaskConfig")
            .field("base_url", &self.base_url)
            .field("integration_code", &self.integration_code)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Validate for AutotaskConfig {
    fn validate(&self) -> Result<()> {
        validate_url(ENV_BASE_URL, &self.base_url)?;

        for (field, value) in [
            (ENV_INTEGRATION_CODE, &self.integration_code),
            (ENV_USERNAME, &self.username),
            (ENV_SECRET, &self.secret),
        ] {
            validate_non_empty_string(field, value)?;
            validate_header_value(field, value)?;
        }

        validate_range(
            ENV_REQUEST_TIMEOUT_SECS,
            self.request_timeout.as_secs(),
            1,
            MAX_REQUEST_TIMEOUT_SECS,
        )?;

        tracing::debug!("✅ Autotask configuration validation passed");
        Ok(())
    }
}
