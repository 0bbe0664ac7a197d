use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ledgerly_core::DomainError;

/// Map a domain error onto an HTTP status and a stable error code.
///
/// Internal failures respond with a generic body; the underlying cause is
/// logged server-side only. Ownership violations arrive here already
/// collapsed into `NotFound` so nothing about other users' data leaks.
pub fn error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Authentication(msg) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Internal(msg) => {
            tracing::error!(error = %msg, "request failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            )
        }
    }
}

/// Map a body that failed to parse or deserialize onto the same shape as
/// domain validation failures. Handlers take `Result<Json<T>, _>` so the
/// framework's built-in 422 rejection never reaches clients.
pub fn bad_json(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
