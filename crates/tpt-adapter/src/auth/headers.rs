/*
[INPUT]:  Application bearer tokens and user tokens
[OUTPUT]: Request modifiers stamping auth headers
[POS]:    Auth layer - header decoration for authenticated builders
[UPDATE]: When auth header names or formats change
*/

use crate::http::{Modifier, Request};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const USER_TOKEN_HEADER: &str = "User-Token";

/// Adds `Authorization: Bearer <token>`
#[derive(Clone)]
pub struct BearerAuth {
    value: String,
}

impl BearerAuth {
    pub fn new(token: &str) -> Self {
        Self {
            value: format!("Bearer {token}"),
        }
    }
}

impl Modifier for BearerAuth {
    fn modify(&self, request: Request) -> Request {
        request.add_sensitive_header(AUTHORIZATION_HEADER, &self.value)
    }
}

/// Adds `User-Token: <token>`
#[derive(Clone)]
pub struct UserToken {
    token: String,
}

impl UserToken {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl Modifier for UserToken {
    fn modify(&self, request: Request) -> Request {
        request.add_sensitive_header(USER_TOKEN_HEADER, &self.token)
    }
}
