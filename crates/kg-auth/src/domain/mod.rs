//! Domain Model
//!
//! User records and the ephemeral token structures exchanged with callers.

pub mod token;
pub mod user;

pub use token::{Claims, TokenPair, TokenType};
pub use user::User;
