/*
[INPUT]:  User token and the client's bearer-decorated builder
[OUTPUT]: User account data and token revocation
[POS]:    HTTP layer - user endpoints (require bearer + User-Token headers)
[UPDATE]: When adding new user endpoints or changing revocation handling
*/

// ### User Endpoints

use std::fmt;

use tracing::{info, warn};

use crate::auth::UserToken;
use crate::http::{Request, RequestBuilder, Result, TptError};
use crate::types::{AccountDetails, RevokeRequest, RevokeResponse};

pub const REVOKE_PATH: &str = "/v1/user/oauth/revoke";
pub const ACCOUNT_PATH: &str = "/v1/user/account";

/// An end user who granted this application access.
///
/// Obtained from [`TptClient::exchange_user_code`] or [`TptClient::user`].
/// After a confirmed revocation every call fails with [`TptError::NoToken`].
///
/// [`TptClient::exchange_user_code`]: crate::http::TptClient::exchange_user_code
/// [`TptClient::user`]: crate::http::TptClient::user
#[derive(Clone)]
pub struct User {
    token: String,
    builder: Option<RequestBuilder>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("token", &"<redacted>")
            .field("revoked", &self.is_revoked())
            .finish()
    }
}

impl User {
    pub(crate) fn new(token: String, client_builder: &RequestBuilder) -> Self {
        let builder = client_builder.with_modifier(UserToken::new(&token));
        Self {
            token,
            builder: Some(builder),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_revoked(&self) -> bool {
        self.builder.is_none()
    }

    /// Start a custom user-scoped request
    pub fn request(&self, path: &str) -> Result<Request> {
        self.builder
            .as_ref()
            .map(|builder| builder.new_request(path))
            .ok_or_else(|| TptError::NoToken("user token has been revoked".to_string()))
    }

    /// Revoke the user token. On success this user can no longer issue calls.
    ///
    /// POST /v1/user/oauth/revoke
    pub async fn revoke_token(&mut self) -> Result<()> {
        let response: RevokeResponse = self
            .request(REVOKE_PATH)?
            .post_json(&RevokeRequest {
                token: self.token.clone(),
            })
            .decode_into()
            .await?;

        if response.revoked {
            self.builder = None;
            info!("user token revoked");
            Ok(())
        } else {
            warn!("revoke endpoint kept the user token");
            Err(TptError::NotRevoked)
        }
    }

    /// Query the user's account details
    ///
    /// GET /v1/user/account
    pub async fn get_account_details(&self) -> Result<AccountDetails> {
        self.request(ACCOUNT_PATH)?.decode_into().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Url;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::auth::BearerAuth;

    fn user_for(server: &MockServer) -> User {
        let builder = RequestBuilder::new(
            Url::parse(&server.uri()).unwrap(),
            Arc::new(reqwest::Client::new()),
        )
        .with_modifier(BearerAuth::new("app-token"));
        User::new("user-token".to_string(), &builder)
    }

    #[tokio::test]
    async fn test_revoke_token_clears_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/user/oauth/revoke"))
            .and(header("authorization", "Bearer app-token"))
            .and(header("user-token", "user-token"))
            .and(body_json(serde_json::json!({"token": "user-token"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"revoked": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut user = user_for(&server);
        user.revoke_token().await.expect("revoke_token failed");

        assert!(user.is_revoked());
        let err = user.get_account_details().await.unwrap_err();
        assert!(matches!(err, TptError::NoToken(_)), "got {err:?}");
        let err = user.revoke_token().await.unwrap_err();
        assert!(matches!(err, TptError::NoToken(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_revoke_token_not_revoked() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/user/oauth/revoke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"revoked": false})))
            .mount(&server)
            .await;

        let mut user = user_for(&server);
        let err = user.revoke_token().await.unwrap_err();

        assert!(matches!(err, TptError::NotRevoked), "got {err:?}");
        assert!(!user.is_revoked());
        assert!(user.request(ACCOUNT_PATH).is_ok());
    }

    #[tokio::test]
    async fn test_revoke_token_api_error_keeps_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/user/oauth/revoke"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut user = user_for(&server);
        let err = user.revoke_token().await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert!(!user.is_revoked());
    }

    #[tokio::test]
    async fn test_get_account_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/user/account"))
            .and(header("authorization", "Bearer app-token"))
            .and(header("user-token", "user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "ACC-1",
                "status": "active",
                "discretionary": false,
                "non_professional": true,
                "account_type": "margin",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let details = user_for(&server)
            .get_account_details()
            .await
            .expect("get_account_details failed");

        assert_eq!(details.id, "ACC-1");
        assert_eq!(details.account_type, "margin");
        assert!(details.non_professional);
    }

    #[test]
    fn test_debug_redacts_token() {
        let builder = RequestBuilder::new(
            Url::parse("http://localhost:1234").unwrap(),
            Arc::new(reqwest::Client::new()),
        );
        let user = User::new("user-token".to_string(), &builder);
        assert!(!format!("{user:?}").contains("user-token"));
    }
}
