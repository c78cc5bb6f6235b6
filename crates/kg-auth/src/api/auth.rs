//! Auth API Endpoints
//!
//! - POST /auth/register - Create a user account
//! - POST /auth/login - Password-based login, returns a token pair
//! - GET /auth/refresh - Rotate the pair (bearer = refresh token)
//! - GET /auth/logout - End the session (bearer = access token)

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::TokenType;
use crate::error::{AuthError, ErrorCode, Result};
use crate::facade::{AuthPort, TokenPairView, UserView};
use crate::service::Registration;
use crate::usecase::Credentials;

/// Registration request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registered user view; the id and password hash are never exposed
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUserRequest {
    pub email: String,
    pub password: String,
}

/// Token pair response, OAuth-style field names
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
    pub token_type: TokenType,
    pub refresh_token: String,
    pub scope: String,
}

impl From<TokenPairView> for TokenResponse {
    fn from(view: TokenPairView) -> Self {
        Self {
            access_token: view.access_token,
            expires_in: view.expires_in,
            token_type: view.token_type,
            refresh_token: view.refresh_token,
            scope: view.scope,
        }
    }
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            email: view.email,
            name: view.name,
        }
    }
}

/// Auth API state
#[derive(Clone)]
pub struct AuthApiState {
    pub auth: Arc<dyn AuthPort>,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid registration data", body = crate::api::ErrorBody)
    )
)]
pub async fn register_user(
    State(state): State<AuthApiState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse> {
    let registration = Registration {
        name: req.name,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };

    let user = state.auth.register_user(&registration).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginUserRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Incorrect password", body = crate::api::ErrorBody),
        (status = 404, description = "Unknown user", body = crate::api::ErrorBody)
    )
)]
pub async fn authenticate_user(
    State(state): State<AuthApiState>,
    Json(req): Json<LoginUserRequest>,
) -> Result<Json<TokenResponse>> {
    let credentials = Credentials {
        email: req.email,
        password: req.password,
    };

    let pair = state.auth.authenticate_user(&credentials).await?;
    Ok(Json(TokenResponse::from(pair)))
}

/// Rotate the token pair
///
/// The bearer token must be the refresh token. The previous refresh token
/// is invalidated.
#[utoipa::path(
    get,
    path = "/refresh",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token pair rotated", body = TokenResponse),
        (status = 401, description = "Invalid or reused refresh token", body = crate::api::ErrorBody)
    )
)]
pub async fn refresh_authentication(
    State(state): State<AuthApiState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>> {
    let refresh_token = extract_bearer_token(&headers)?;
    let pair = state.auth.refresh_authentication(refresh_token).await?;
    Ok(Json(TokenResponse::from(pair)))
}

/// Logout
///
/// The bearer token must be the access token, not the refresh token.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "Invalid token or no live session", body = crate::api::ErrorBody)
    )
)]
pub async fn logout_user(
    State(state): State<AuthApiState>,
    headers: HeaderMap,
) -> Result<StatusCode> {
    let access_token = extract_bearer_token(&headers)?;
    state.auth.logout_user(access_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::bad_model(ErrorCode::AuthHeaderNotProvided))
}

/// Create the auth router
pub fn auth_router(state: AuthApiState) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(authenticate_user))
        .route("/refresh", get(refresh_authentication))
        .route("/logout", get(logout_user))
        .with_state(state)
}
