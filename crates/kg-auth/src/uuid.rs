//! User Identifier Generation
//!
//! UUIDv4 identifiers for user records, with format validation for ids
//! arriving from outside the core.

use uuid::Uuid;

pub struct UuidGenerator;

impl UuidGenerator {
    /// Generate a new random identifier.
    pub fn generate() -> String {
        Uuid::new_v4().to_string()
    }

    /// Check whether `id` is a well-formed UUID.
    pub fn validate(id: &str) -> bool {
        Uuid::parse_str(id).is_ok()
    }
}
