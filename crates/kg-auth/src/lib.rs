//! Keygate Authentication Core
//!
//! Credential-and-token lifecycle management:
//! - User registration with structural validation and Argon2id hashing
//! - Password authentication issuing signed access/refresh token pairs
//! - Refresh-token rotation with reuse detection
//! - Logout invalidating the stored session state
//!
//! The user directory is an abstract repository; HTTP is a thin adapter
//! over the application facade.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod facade;
pub mod repository;
pub mod service;
pub mod usecase;
pub mod uuid;

pub use config::TokenConfig;
pub use error::{AuthError, ErrorCode, ErrorKind, Result};
pub use uuid::UuidGenerator;
