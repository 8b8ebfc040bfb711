/*
[INPUT]:  JSON/YAML configuration files, TPT_* environment variables
[OUTPUT]: API endpoint, client credentials and transport timeouts
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{Result, TptError};

/// Environment variable names read by [`Config::from_env`]
pub const ENDPOINT_ENV: &str = "TPT_ENDPOINT";
pub const CLIENT_ID_ENV: &str = "TPT_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "TPT_CLIENT_SECRET";

/// API endpoint and application credentials
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the API, e.g. `https://api.tpt.example`
    pub endpoint: String,
    #[serde(alias = "clientId")]
    pub client_id: String,
    #[serde(alias = "clientSecret")]
    pub client_secret: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    pub fn new(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load configuration from a JSON file, or YAML for `.yaml`/`.yml`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TptError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| TptError::Config(format!("Invalid YAML in {}: {e}", path.display())))?
        } else {
            serde_json::from_str(&content)
                .map_err(|e| TptError::Config(format!("Invalid JSON in {}: {e}", path.display())))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `TPT_ENDPOINT`, `TPT_CLIENT_ID` and `TPT_CLIENT_SECRET`
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| TptError::Config(format!("Missing environment variable {name}")))
        };
        let config = Self::new(var(ENDPOINT_ENV)?, var(CLIENT_ID_ENV)?, var(CLIENT_SECRET_ENV)?);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(TptError::Config("endpoint must not be empty".to_string()));
        }
        if self.client_id.trim().is_empty() {
            return Err(TptError::Config("client_id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
