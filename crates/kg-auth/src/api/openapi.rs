//! OpenAPI Documentation

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::auth;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Keygate Auth API",
        description = "Credential and token lifecycle: registration, login, refresh-token rotation and logout"
    ),
    paths(
        auth::register_user,
        auth::authenticate_user,
        auth::refresh_authentication,
        auth::logout_user,
    ),
    components(schemas(
        auth::RegisterUserRequest,
        auth::LoginUserRequest,
        auth::UserResponse,
        auth::TokenResponse,
        crate::api::ErrorBody,
        crate::domain::TokenType,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "auth", description = "Session lifecycle endpoints")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
