//! Session Use Cases
//!
//! The four state transitions of a session's lifecycle:
//! Anonymous -> Authenticated (authenticate), Authenticated -> Authenticated
//! (refresh, with rotation), Authenticated -> Anonymous (logout), plus user
//! registration. Validation failures always short-circuit before any
//! persistence mutation.

pub mod authenticate;
pub mod logout;
pub mod refresh;
pub mod register;

pub use authenticate::{AuthenticateUserUseCase, Credentials};
pub use logout::LogoutUserUseCase;
pub use refresh::RefreshAuthenticationUseCase;
pub use register::RegisterUserUseCase;
