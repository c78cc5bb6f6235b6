//! Service Layer
//!
//! Domain services: credential hashing, identity validation and token
//! issuance/verification.

pub mod password;
pub mod tokens;
pub mod users;

pub use password::PasswordService;
pub use tokens::{GenerateToken, SecretMatch, TokenService};
pub use users::{Registration, UserService};
