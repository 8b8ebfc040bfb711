/*
[INPUT]:  Fully built reqwest requests and client timeout configuration
[OUTPUT]: Raw HTTP responses or transport errors
[POS]:    HTTP layer - injectable network boundary for every request
[UPDATE]: When adding transport options or alternative transports
*/

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Request, Response};

use crate::config::ClientConfig;
use crate::http::Result;

/// Executes built requests against the network
///
/// Every `RequestBuilder` carries one of these, so tests can wrap or replace
/// the network without touching global state.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send the request and return the response head with an unread body
    async fn execute(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl Transport for Client {
    async fn execute(&self, request: Request) -> Result<Response> {
        Ok(Client::execute(self, request).await?)
    }
}

/// Build the default reqwest transport with the configured timeouts
pub fn default_transport(config: &ClientConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    Ok(client)
}
