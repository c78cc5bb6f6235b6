//! Application Facade
//!
//! Single inbound port exposing the four use cases to adapters. The views
//! translate internal models into external shapes: a registered user is
//! reported as email + name only - the id and password hash never leave the
//! core.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{TokenPair, TokenType, User};
use crate::error::Result;
use crate::repository::UserRepository;
use crate::service::{Registration, TokenService, UserService};
use crate::usecase::{
    AuthenticateUserUseCase, Credentials, LogoutUserUseCase, RefreshAuthenticationUseCase,
    RegisterUserUseCase,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub email: String,
    pub name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairView {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: TokenType,
    pub refresh_token: String,
    pub scope: String,
}

impl From<TokenPair> for TokenPairView {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            expires_in: pair.expires_in,
            token_type: pair.token_type,
            refresh_token: pair.refresh_token,
            scope: pair.scope,
        }
    }
}

/// Inbound port consumed by HTTP (and other) adapters.
#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn register_user(&self, registration: &Registration) -> Result<UserView>;

    async fn authenticate_user(&self, credentials: &Credentials) -> Result<TokenPairView>;

    async fn refresh_authentication(&self, refresh_token: &str) -> Result<TokenPairView>;

    async fn logout_user(&self, access_token: &str) -> Result<()>;
}

pub struct AuthFacade {
    register: RegisterUserUseCase,
    authenticate: AuthenticateUserUseCase,
    refresh: RefreshAuthenticationUseCase,
    logout: LogoutUserUseCase,
}

impl AuthFacade {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        users: Arc<UserService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            register: RegisterUserUseCase::new(repository.clone(), users.clone()),
            authenticate: AuthenticateUserUseCase::new(
                repository.clone(),
                users,
                tokens.clone(),
            ),
            refresh: RefreshAuthenticationUseCase::new(repository.clone(), tokens.clone()),
            logout: LogoutUserUseCase::new(repository, tokens),
        }
    }
}

#[async_trait]
impl AuthPort for AuthFacade {
    async fn register_user(&self, registration: &Registration) -> Result<UserView> {
        let user = self.register.execute(registration).await?;
        Ok(UserView::from(&user))
    }

    async fn authenticate_user(&self, credentials: &Credentials) -> Result<TokenPairView> {
        let pair = self.authenticate.execute(credentials).await?;
        Ok(pair.into())
    }

    async fn refresh_authentication(&self, refresh_token: &str) -> Result<TokenPairView> {
        let pair = self.refresh.execute(refresh_token).await?;
        Ok(pair.into())
    }

    async fn logout_user(&self, access_token: &str) -> Result<()> {
        self.logout.execute(access_token).await
    }
}
