/*
[INPUT]:  Client credentials, authorization codes and user tokens
[OUTPUT]: Bearer tokens, authenticated request builders and users
[POS]:    Auth layer - handles TPT API authentication
[UPDATE]: When auth flow or token headers change
*/

pub mod headers;
pub mod oauth;
pub mod token;

pub use headers::{BearerAuth, UserToken};
pub use oauth::{AUTHORIZE_PATH, OAUTH_TOKEN_PATH, USER_TOKEN_PATH};
pub use token::BearerToken;
