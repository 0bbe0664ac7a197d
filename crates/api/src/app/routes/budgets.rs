use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use ledgerly_budgets::summary;
use ledgerly_core::BudgetId;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/summary", get(get_summary))
        .route("/:id", put(update).delete(delete_entry))
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> axum::response::Response {
    match services.budgets.list(current.user_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    body: Result<Json<dto::BudgetEntryRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(rejection),
    };
    let draft = match body.into_draft() {
        Ok(draft) => draft,
        Err(e) => return errors::error_to_response(e),
    };

    match services.budgets.create(current.user_id, draft).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<dto::BudgetEntryRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: BudgetId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid budget id"),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::bad_json(rejection),
    };
    let patch = match body.into_patch() {
        Ok(patch) => patch,
        Err(e) => return errors::error_to_response(e),
    };

    match services.budgets.update(current.user_id, id, patch).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn delete_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BudgetId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid budget id"),
    };

    match services.budgets.delete(current.user_id, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Budget deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

/// Server-side rendition of the dashboard numbers: overall totals plus the
/// per-category expense breakdown.
pub async fn get_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> axum::response::Response {
    match services.budgets.list(current.user_id).await {
        Ok(entries) => {
            let body = serde_json::json!({
                "totals": summary::totals(&entries),
                "expensesByCategory": summary::expenses_by_category(&entries),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}
