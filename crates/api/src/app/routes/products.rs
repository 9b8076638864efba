use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use expiry_core::{DomainError, ProductId};
use expiry_inventory::{PantryCommand, ProductDraft};

use crate::app::errors;
use crate::app::services::{AppServices, today};

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(add_product))
        .route("/products/:id/increment", post(increment_product))
        .route("/products/:id/decrement", post(decrement_product))
        .route("/products/:id/consume", post(consume_product))
}

/// The board: every product with its urgency, after pruning expired ones.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let today = today();
    let mut session = services.session().lock().await;
    session.refresh(today).await;
    (StatusCode::OK, Json(session.board(today))).into_response()
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> axum::response::Response {
    let Json(draft) = match body {
        Ok(v) => v,
        Err(rejection) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text());
        }
    };

    let today = today();
    let mut session = services.session().lock().await;
    session.refresh(today).await;

    let pantry = match session.execute(&PantryCommand::Add { draft }).await {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // `add` appends, so the new product is last.
    let Some(entry) = pantry.board(today).pop() else {
        return errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "product missing after add",
        );
    };

    tracing::info!(product_id = %entry.product.id_typed(), name = entry.product.name(), "product added");
    (StatusCode::CREATED, Json(entry)).into_response()
}

pub async fn increment_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    apply_to_id(&services, &id, |id| PantryCommand::Increment { id }).await
}

pub async fn decrement_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    apply_to_id(&services, &id, |id| PantryCommand::Decrement { id }).await
}

pub async fn consume_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    apply_to_id(&services, &id, |id| PantryCommand::Consume { id }).await
}

async fn apply_to_id(
    services: &AppServices,
    raw_id: &str,
    command: impl FnOnce(ProductId) -> PantryCommand,
) -> axum::response::Response {
    let id: ProductId = match raw_id.parse() {
        Ok(v) => v,
        Err(e @ DomainError::InvalidId(_)) => return errors::domain_error_to_response(e),
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let today = today();
    let mut session = services.session().lock().await;
    session.refresh(today).await;

    match session.execute(&command(id)).await {
        Ok(pantry) => (StatusCode::OK, Json(pantry.board(today))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
