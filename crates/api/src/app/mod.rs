//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store selection (in-memory vs Postgres) + service wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use ledgerly_auth::TokenSigner;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// Fails if the configured store cannot be reached or prepared; the caller
/// decides whether that is fatal (it is, at startup).
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let tokens = TokenSigner::new(config.jwt_secret.as_bytes(), config.token_ttl_secs);
    let services = Arc::new(services::build_services(config, tokens.clone()).await?);
    let auth_state = middleware::AuthState { tokens };

    // Protected routes: require a verified bearer token.
    let protected = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .nest("/api/budgets", routes::budgets::router())
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/auth/signup", post(routes::auth::signup))
        .route("/api/auth/login", post(routes::auth::login))
        .merge(protected)
        .layer(Extension(services))
        .layer(cors_layer(config)?))
}

fn cors_layer(config: &ApiConfig) -> anyhow::Result<CorsLayer> {
    match &config.cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin.parse().context("invalid CORS_ORIGIN")?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
        }
        None => Ok(CorsLayer::permissive()),
    }
}
