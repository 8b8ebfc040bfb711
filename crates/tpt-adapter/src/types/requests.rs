/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request bodies with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Grant type sent with client-credential token requests
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Body of `POST /oauth/token`
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

impl TokenRequest {
    pub fn client_credentials(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            grant_type: CLIENT_CREDENTIALS_GRANT.to_string(),
        }
    }
}

impl std::fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("client_id", &self.client_id)
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /v1/user/oauth/token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCodeRequest {
    pub code: String,
}

/// Body of `POST /v1/user/oauth/revoke`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeRequest {
    pub token: String,
}
