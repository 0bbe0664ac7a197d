//! Process configuration.
//!
//! Built once from the environment at startup and passed to the services
//! that need it; nothing reads environment variables after this point.

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Postgres connection string. Absent means in-memory stores (dev).
    pub database_url: Option<String>,
    /// Secret for signing and verifying access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub token_ttl_secs: i64,
    /// Listen port.
    pub port: u16,
    /// Allowed cross-origin request source. Absent means permissive CORS.
    pub cors_origin: Option<String>,
}

/// Default access token lifetime: one hour.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

const DEFAULT_PORT: u16 = 4000;

impl ApiConfig {
    /// Read configuration from the environment.
    ///
    /// Missing optional values fall back to dev defaults with a warning
    /// where the fallback is insecure.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            database_url: std::env::var("DATABASE_URL").ok(),
            jwt_secret,
            token_ttl_secs,
            port,
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
        }
    }
}
