/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public TPT adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod config;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{BearerAuth, BearerToken, UserToken};

// Re-export config
pub use config::{ClientConfig, Config};

// Re-export commonly used types from http
pub use http::{
    Headers,
    Modifier,
    Request,
    RequestBuilder,
    Result,
    TptClient,
    TptError,
    Transport,
    User,
};

// Re-export all types
pub use types::*;
