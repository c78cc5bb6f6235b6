//! Session Lifecycle Integration Tests
//!
//! Exercises the full facade against the in-memory directory: registration
//! uniqueness, credential verification, refresh-token rotation and logout.

use std::sync::Arc;

use kg_auth::config::TokenConfig;
use kg_auth::error::{ErrorCode, ErrorKind};
use kg_auth::facade::{AuthFacade, AuthPort};
use kg_auth::repository::{InMemoryUserRepository, UserRepository};
use kg_auth::service::{PasswordService, Registration, TokenService, UserService};
use kg_auth::usecase::Credentials;

struct TestApp {
    auth: AuthFacade,
    repository: Arc<InMemoryUserRepository>,
    hasher: Arc<PasswordService>,
}

fn test_app() -> TestApp {
    let hasher = Arc::new(PasswordService::default());
    let repository = Arc::new(InMemoryUserRepository::new());
    let users = Arc::new(UserService::new(hasher.clone()));
    let tokens = Arc::new(TokenService::new(TokenConfig::default(), hasher.clone()));

    TestApp {
        auth: AuthFacade::new(repository.clone(), users, tokens),
        repository,
        hasher,
    }
}

fn john() -> Registration {
    Registration {
        name: "John Doe".to_string(),
        email: "john@x.com".to_string(),
        password: "123456".to_string(),
        confirm_password: "123456".to_string(),
    }
}

fn login(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn hasher_verification_is_idempotent_across_distinct_hashes() {
    let hasher = PasswordService::default();

    for secret in ["123456", "a much longer secret phrase", "√ünicode"] {
        let first = hasher.hash(secret).unwrap();
        let second = hasher.hash(secret).unwrap();
        assert_ne!(first, second, "salted hashing must not be deterministic");

        for _ in 0..3 {
            assert!(hasher.verify(secret, &first).unwrap());
            assert!(hasher.verify(secret, &second).unwrap());
        }
    }
}

#[tokio::test]
async fn register_returns_view_and_stores_hashed_password() {
    let app = test_app();

    let view = app.auth.register_user(&john()).await.unwrap();
    assert_eq!(view.email, "john@x.com");
    assert_eq!(view.name, "John Doe");

    let stored = app.repository.find_by_email("john@x.com").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "123456");
    assert!(app.hasher.verify("123456", &stored.password_hash).unwrap());
    assert!(stored.refresh_token_hash.is_none());
}

#[tokio::test]
async fn second_registration_with_same_email_fails() {
    let app = test_app();

    app.auth.register_user(&john()).await.unwrap();
    let err = app.auth.register_user(&john()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::BadModel);
    assert_eq!(err.code, ErrorCode::UserAlreadyExists);
}

#[tokio::test]
async fn authenticate_with_wrong_password_fails() {
    let app = test_app();
    app.auth.register_user(&john()).await.unwrap();

    let err = app
        .auth
        .authenticate_user(&login("john@x.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::BadModel);
    assert_eq!(err.code, ErrorCode::PasswordIncorrect);
}

#[tokio::test]
async fn authenticate_with_unknown_email_fails() {
    let app = test_app();

    let err = app
        .auth
        .authenticate_user(&login("ghost@x.com", "123456"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.code, ErrorCode::UserNotFound);
}

#[tokio::test]
async fn rotation_invalidates_the_prior_refresh_token() {
    let app = test_app();
    app.auth.register_user(&john()).await.unwrap();
    let first = app
        .auth
        .authenticate_user(&login("john@x.com", "123456"))
        .await
        .unwrap();

    let second = app.auth.refresh_authentication(&first.refresh_token).await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);

    // Replaying the rotated-away token must fail: its hash was overwritten.
    let err = app
        .auth
        .refresh_authentication(&first.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPermissions);
    assert_eq!(err.code, ErrorCode::TokenNotValid);

    // The current token still works.
    app.auth.refresh_authentication(&second.refresh_token).await.unwrap();
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = test_app();
    app.auth.register_user(&john()).await.unwrap();
    let pair = app
        .auth
        .authenticate_user(&login("john@x.com", "123456"))
        .await
        .unwrap();

    app.auth.logout_user(&pair.access_token).await.unwrap();

    let stored = app.repository.find_by_email("john@x.com").await.unwrap().unwrap();
    assert!(stored.refresh_token_hash.is_none());

    // The session's last-issued refresh token is dead after logout.
    let err = app
        .auth
        .refresh_authentication(&pair.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPermissions);
    assert_eq!(err.code, ErrorCode::UserNotAuthenticated);
}

#[tokio::test]
async fn logout_with_refresh_token_in_place_of_access_token_fails() {
    let app = test_app();
    app.auth.register_user(&john()).await.unwrap();
    let pair = app
        .auth
        .authenticate_user(&login("john@x.com", "123456"))
        .await
        .unwrap();

    // Signed with the refresh secret, it fails access-token verification.
    let err = app.auth.logout_user(&pair.refresh_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidPermissions);
    assert_eq!(err.code, ErrorCode::TokenNotValid);

    // The session is untouched.
    let stored = app.repository.find_by_email("john@x.com").await.unwrap().unwrap();
    assert!(stored.refresh_token_hash.is_some());
}

#[tokio::test]
async fn full_lifecycle_register_login_refresh_logout() {
    let app = test_app();

    app.auth.register_user(&john()).await.unwrap();
    let pair = app
        .auth
        .authenticate_user(&login("john@x.com", "123456"))
        .await
        .unwrap();
    assert_eq!(pair.scope, "");
    assert!(pair.expires_in > 0);

    let rotated = app.auth.refresh_authentication(&pair.refresh_token).await.unwrap();
    app.auth.logout_user(&rotated.access_token).await.unwrap();

    // Back to Anonymous: refresh is no longer possible.
    let err = app
        .auth
        .refresh_authentication(&rotated.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UserNotAuthenticated);

    // But credentials still authenticate a new session.
    app.auth
        .authenticate_user(&login("john@x.com", "123456"))
        .await
        .unwrap();
}
