//! Keygate Auth Server
//!
//! Production server for the session lifecycle REST API:
//! - POST /auth/register, POST /auth/login
//! - GET /auth/refresh (bearer = refresh token)
//! - GET /auth/logout (bearer = access token)
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KG_API_PORT` | `8080` | HTTP API port |
//! | `KG_STORE` | `mongo` | User store: `mongo` or `memory` (dev only) |
//! | `KG_MONGO_URL` | `mongodb://localhost:27017` | MongoDB connection URL |
//! | `KG_MONGO_DB` | `keygate` | MongoDB database name |
//! | `KG_JWT_ACCESS_SECRET` | dev secret | Access-token signing secret |
//! | `KG_JWT_REFRESH_SECRET` | dev secret | Refresh-token signing secret |
//! | `KG_JWT_ACCESS_EXPIRY_SECS` | `900` | Access-token lifetime |
//! | `KG_JWT_REFRESH_EXPIRY_SECS` | `86400` | Refresh-token lifetime |
//! | `RUST_LOG` | `info` | Log level |

use std::sync::Arc;

use anyhow::Result;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use kg_auth::api::{auth_router, ApiDoc, AuthApiState};
use kg_auth::config::TokenConfig;
use kg_auth::facade::AuthFacade;
use kg_auth::repository::{InMemoryUserRepository, MongoUserRepository, UserRepository};
use kg_auth::service::{PasswordService, TokenService, UserService};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Keygate Auth Server");

    // Configuration from environment
    let api_port: u16 = env_or_parse("KG_API_PORT", 8080);
    let store = env_or("KG_STORE", "mongo");

    let defaults = TokenConfig::default();
    let token_config = TokenConfig {
        access_secret: env_or("KG_JWT_ACCESS_SECRET", &defaults.access_secret),
        refresh_secret: env_or("KG_JWT_REFRESH_SECRET", &defaults.refresh_secret),
        access_expiry_secs: env_or_parse("KG_JWT_ACCESS_EXPIRY_SECS", defaults.access_expiry_secs),
        refresh_expiry_secs: env_or_parse(
            "KG_JWT_REFRESH_EXPIRY_SECS",
            defaults.refresh_expiry_secs,
        ),
    };
    if token_config.access_secret == defaults.access_secret
        || token_config.refresh_secret == defaults.refresh_secret
    {
        warn!("Using development signing secrets; set KG_JWT_ACCESS_SECRET and KG_JWT_REFRESH_SECRET in production");
    }

    // Select the user store
    let repository: Arc<dyn UserRepository> = match store.as_str() {
        "memory" => {
            warn!("Using the in-memory user store; all users are lost on restart");
            Arc::new(InMemoryUserRepository::new())
        }
        _ => {
            let mongo_url = env_or("KG_MONGO_URL", "mongodb://localhost:27017");
            let mongo_db = env_or("KG_MONGO_DB", "keygate");
            info!("Connecting to MongoDB: {}/{}", mongo_url, mongo_db);

            let mongo_client = mongodb::Client::with_uri_str(&mongo_url).await?;
            let db = mongo_client.database(&mongo_db);

            let repository = MongoUserRepository::new(&db);
            repository.ensure_indexes().await?;
            Arc::new(repository)
        }
    };
    info!("User store initialized ({})", store);

    // Compose services and the facade
    let hasher = Arc::new(PasswordService::default());
    let users = Arc::new(UserService::new(hasher.clone()));
    let tokens = Arc::new(TokenService::new(token_config, hasher));
    let facade = Arc::new(AuthFacade::new(repository, users, tokens));
    info!("Auth services initialized");

    let auth_state = AuthApiState { auth: facade };

    let app = Router::new()
        .nest("/auth", auth_router(auth_state))
        .route("/health", get(health_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);

    let listener = TcpListener::bind(&api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Keygate Auth Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
