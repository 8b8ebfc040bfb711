/*
[INPUT]:  API config (endpoint, credentials), timeouts or an injected transport
[OUTPUT]: Client handle issuing application-level requests
[POS]:    HTTP layer - core client implementation and session state
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;

use reqwest::Url;
use tokio::sync::RwLock;

use crate::auth::BearerToken;
use crate::config::{ClientConfig, Config};
use crate::http::transport::default_transport;
use crate::http::{Request, RequestBuilder, Result, TptError, Transport};

/// Token and the builder decorated with it, published together
#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) token: BearerToken,
    pub(crate) builder: RequestBuilder,
}

/// Main HTTP client for the TPT API.
///
/// Starts unauthenticated; [`TptClient::oauth`] attaches an application
/// bearer token. Nothing refreshes the token afterwards.
#[derive(Debug)]
pub struct TptClient {
    config: Config,
    base: RequestBuilder,
    pub(crate) session: RwLock<Option<Session>>,
}

impl TptClient {
    /// Create a new client with default configuration
    pub fn new(config: Config) -> Result<Self> {
        Self::with_config(config, ClientConfig::default())
    }

    /// Create a new client with custom timeouts
    pub fn with_config(config: Config, client_config: ClientConfig) -> Result<Self> {
        let transport = default_transport(&client_config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a new client sending every request through `transport`
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = Url::parse(config.endpoint.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(TptError::Config(format!(
                "endpoint {} cannot be used as a base URL",
                config.endpoint
            )));
        }

        Ok(Self {
            config,
            base: RequestBuilder::new(base_url, transport),
            session: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builder without any auth headers
    pub(crate) fn base(&self) -> &RequestBuilder {
        &self.base
    }

    /// Whether [`TptClient::oauth`] has succeeded at least once
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Current application bearer token
    pub async fn bearer_token(&self) -> Option<BearerToken> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// Snapshot of the bearer-decorated builder
    pub async fn authorized(&self) -> Result<RequestBuilder> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.builder.clone())
            .ok_or_else(|| TptError::NoToken("client has not completed OAuth".to_string()))
    }

    /// Start a custom application-level request
    pub async fn request(&self, path: &str) -> Result<Request> {
        Ok(self.authorized().await?.new_request(path))
    }
}
