/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Response of `POST /v1/user/oauth/token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTokenResponse {
    pub user_token: String,
}

/// Response of `POST /v1/user/oauth/revoke`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevokeResponse {
    pub revoked: bool,
}

/// Response of `GET /v1/news`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(rename = "news", default)]
    pub items: Vec<super::NewsItem>,
}
