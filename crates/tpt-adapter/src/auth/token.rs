/*
[INPUT]:  Token endpoint responses
[OUTPUT]: Application bearer token with optional expiry
[POS]:    Auth layer - token data
[UPDATE]: When the token endpoint response format changes
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application-level credential returned by `POST /oauth/token`.
///
/// The expiry is informational only; nothing refreshes the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerToken {
    #[serde(rename = "access_token")]
    pub token: String,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}
