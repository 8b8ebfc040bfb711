/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod builder;
pub mod client;
pub mod error;
pub mod public;
pub mod request;
pub mod transport;
pub mod user;

pub use error::{Result, TptError};

pub use builder::{Headers, Modifier, RequestBuilder};
pub use client::TptClient;
pub use request::Request;
pub use transport::Transport;
pub use user::User;
