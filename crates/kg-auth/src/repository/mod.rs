//! Repository Layer
//!
//! The user directory port and its adapters: MongoDB for production, an
//! in-memory map for tests and local development.

pub mod memory;
pub mod users;

pub use memory::InMemoryUserRepository;
pub use users::{MongoUserRepository, UserRepository};
