//! Deployment selection and client configuration.

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Hosted backend origin.
pub const PRODUCTION_ORIGIN: &str = "https://flexiride-backend-api.onrender.com";

/// Backend origin when running the API locally.
pub const DEVELOPMENT_ORIGIN: &str = "http://localhost:8080";

/// Environment variable consulted by [`Deployment::from_env`].
pub const ENV_VAR: &str = "FLEXIRIDE_ENV";

/// Transport timeout applied to every request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which backend the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    Production,
    #[default]
    Development,
}

impl Deployment {
    /// Returns the backend origin for this deployment.
    #[must_use]
    pub const fn origin(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_ORIGIN,
            Self::Development => DEVELOPMENT_ORIGIN,
        }
    }

    /// Reads the deployment from `FLEXIRIDE_ENV`, defaulting to development
    /// when the variable is unset.
    pub fn from_env() -> ClientResult<Self> {
        match std::env::var(ENV_VAR) {
            Ok(value) => value.parse(),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(ClientError::Config(format!("{ENV_VAR}: {e}"))),
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
        }
    }
}

impl FromStr for Deployment {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "local" => Ok(Self::Development),
            other => Err(ClientError::Config(format!("unknown deployment: {other}"))),
        }
    }
}

/// Endpoints and transport settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub deployment: Deployment,
    /// Base URL of the auth service (e.g. `http://localhost:8080/auth`).
    pub auth_base_url: String,
    /// Base URL of the resource API (e.g. `http://localhost:8080/api`).
    pub api_base_url: String,
    /// Per-request deadline in seconds; 0 disables it.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for the given deployment's backend.
    #[must_use]
    pub fn for_deployment(deployment: Deployment) -> Self {
        Self {
            deployment,
            ..Self::with_origin(deployment.origin())
        }
    }

    /// Configuration for a backend at an arbitrary origin.
    #[must_use]
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            deployment: Deployment::default(),
            auth_base_url: format!("{origin}/auth"),
            api_base_url: format!("{origin}/api"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Configuration for the deployment named by `FLEXIRIDE_ENV`.
    pub fn from_env() -> ClientResult<Self> {
        Ok(Self::for_deployment(Deployment::from_env()?))
    }

    /// Returns the per-request deadline, or `None` when it is disabled.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Builds a URL under the auth service.
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        join_url(&self.auth_base_url, path)
    }

    /// Builds a URL under the resource API.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_deployment(Deployment::default())
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
