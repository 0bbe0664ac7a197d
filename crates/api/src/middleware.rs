use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use ledgerly_auth::TokenSigner;

use crate::app::errors::json_error;
use crate::context::CurrentUser;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenSigner,
}

/// Verify the bearer token and attach the caller's identity to the request.
///
/// Verification is signature + expiry only; no store read happens here.
/// Handlers that need the fresh record load it themselves.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(resp) => return resp,
    };

    match state.tokens.verify(token) {
        Ok(identity) => {
            req.extensions_mut().insert(CurrentUser {
                user_id: identity.user_id,
                email: identity.email,
            });
            next.run(req).await
        }
        Err(_) => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "invalid or expired token",
        ),
    }
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let missing = || json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing bearer token");

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(missing)?;

    let header = header.to_str().map_err(|_| missing())?;

    let token = header.strip_prefix("Bearer ").ok_or_else(missing)?.trim();
    if token.is_empty() {
        return Err(missing());
    }

    Ok(token)
}
