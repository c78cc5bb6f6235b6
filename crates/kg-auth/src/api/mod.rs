//! HTTP Adapter
//!
//! Thin axum layer over the application facade. Request/response shaping,
//! bearer-token extraction and error presentation live here; nothing in
//! this module carries business rules.

pub mod auth;
pub mod dictionary;
pub mod error;
pub mod openapi;

pub use auth::{auth_router, AuthApiState};
pub use error::ErrorBody;
pub use openapi::ApiDoc;
