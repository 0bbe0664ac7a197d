use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::dto::{self, SessionResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SignupRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(rejection),
    };

    let result = services
        .auth
        .register(
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
            body.name,
        )
        .await;

    match result {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(session))).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(rejection),
    };

    let result = services
        .auth
        .login(
            body.email.as_deref().unwrap_or(""),
            body.password.as_deref().unwrap_or(""),
        )
        .await;

    match result {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

/// The token was verified by the middleware; this loads the fresh record,
/// which can be gone even though the token is structurally valid.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> axum::response::Response {
    match services.auth.current_user(current.user_id).await {
        Ok(user) => (StatusCode::OK, Json(serde_json::json!({ "user": user }))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
