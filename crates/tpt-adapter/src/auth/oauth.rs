/*
[INPUT]:  Client credentials, authorization codes, redirect URIs
[OUTPUT]: Authenticated client session and user handles
[POS]:    Auth layer - orchestrates OAuth2 client-credentials and code exchange
[UPDATE]: When auth endpoints or flow steps change
*/

use reqwest::Url;
use tracing::{info, warn};

use crate::http::client::Session;
use crate::http::{Result, TptClient, TptError, User};
use crate::types::{TokenRequest, UserCodeRequest, UserTokenResponse};

use super::{BearerAuth, BearerToken};

pub const OAUTH_TOKEN_PATH: &str = "/oauth/token";
pub const USER_TOKEN_PATH: &str = "/v1/user/oauth/token";
pub const AUTHORIZE_PATH: &str = "/v1/user/oauth/authorize";

impl TptClient {
    /// Fetch an application bearer token with the configured credentials.
    ///
    /// POST /oauth/token
    ///
    /// The session lock is held for the whole handshake. On failure the
    /// previous session, if any, is left as it was.
    pub async fn oauth(&self) -> Result<BearerToken> {
        let mut session = self.session.write().await;

        let body = TokenRequest::client_credentials(
            &self.config().client_id,
            &self.config().client_secret,
        );
        let token: BearerToken = self
            .base()
            .new_request(OAUTH_TOKEN_PATH)
            .post_json(&body)
            .decode_into()
            .await
            .map_err(|err| match err {
                TptError::Api { code, message } => {
                    warn!(code, "token endpoint rejected client credentials");
                    TptError::Authentication {
                        message: format!("token endpoint returned {code} {message}"),
                    }
                }
                other => other,
            })?;

        if token.token.is_empty() {
            return Err(TptError::Authentication {
                message: "token endpoint returned an empty access_token".to_string(),
            });
        }

        let builder = self.base().with_modifier(BearerAuth::new(&token.token));
        *session = Some(Session {
            token: token.clone(),
            builder,
        });

        info!(expiry = ?token.expiry, "client authenticated");
        Ok(token)
    }

    /// Exchange the code returned at the end of the user authorization
    /// redirect for a user token.
    ///
    /// POST /v1/user/oauth/token
    pub async fn exchange_user_code(&self, code: &str) -> Result<User> {
        let builder = self.authorized().await?;

        let response: UserTokenResponse = builder
            .new_request(USER_TOKEN_PATH)
            .post_json(&UserCodeRequest {
                code: code.to_string(),
            })
            .decode_into()
            .await?;

        info!("user code exchanged");
        Ok(User::new(response.user_token, &builder))
    }

    /// Wrap a previously stored user token
    pub async fn user(&self, token: impl Into<String>) -> Result<User> {
        let builder = self.authorized().await?;
        Ok(User::new(token.into(), &builder))
    }

    /// URL the end user visits to grant this application access.
    ///
    /// GET /v1/user/oauth/authorize?client_id={client_id}&redirect_uri={redirect_uri}
    pub fn authorize_url(&self, redirect_uri: &str) -> Result<Url> {
        let redirect = Url::parse(redirect_uri)?;
        let mut url = self.base().url_for(AUTHORIZE_PATH);
        url.query_pairs_mut()
            .append_pair("client_id", &self.config().client_id)
            .append_pair("redirect_uri", redirect.as_str());
        Ok(url)
    }
}
