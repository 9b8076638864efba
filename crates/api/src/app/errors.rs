use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use expiry_ai::RecipeError;
use expiry_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
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

/// Error body used by the recipe proxy: `{ "error": "<message>" }`.
pub fn proxy_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}

pub fn recipe_error_to_response(err: RecipeError) -> axum::response::Response {
    match err {
        RecipeError::EmptyItems => proxy_error(StatusCode::BAD_REQUEST, err.to_string()),
        RecipeError::MissingApiKey => proxy_error(StatusCode::INTERNAL_SERVER_ERROR, "Missing GROQ_API_KEY"),
        other => proxy_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}
