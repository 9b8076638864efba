use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use expiry_ai::{RECIPE_FALLBACK, RecipeError, RecipeSuggester, suggest_or_fallback};

use crate::app::dto::{PantryRecipes, RecipeReply, RecipeRequest};
use crate::app::errors;
use crate::app::services::{AppServices, today};

pub const NOTHING_EXPIRING: &str = "No products are expiring soon.";

pub fn router() -> Router {
    Router::new()
        .route("/api/ai", post(recipe_proxy).fallback(method_not_allowed))
        .route("/products/recipes", get(pantry_recipes))
}

/// Forwards `{items}` to the upstream chat model and answers `{reply}`.
pub async fn recipe_proxy(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RecipeRequest>, JsonRejection>,
) -> axum::response::Response {
    let Some(chat) = services.chat() else {
        return errors::recipe_error_to_response(RecipeError::MissingApiKey);
    };
    let Json(req) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::proxy_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let items = req.items.map(|i| i.names()).unwrap_or_default();
    match chat.suggest(&items).await {
        Ok(reply) => (StatusCode::OK, Json(RecipeReply { reply })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "recipe proxy request failed");
            errors::recipe_error_to_response(err)
        }
    }
}

async fn method_not_allowed() -> axum::response::Response {
    errors::proxy_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Recipe ideas for whatever is about to expire.
///
/// The session lock is released before the remote call.
pub async fn pantry_recipes(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let today = today();
    let items = {
        let mut session = services.session().lock().await;
        session.refresh(today).await;
        session.expiring_names(today)
    };

    if items.is_empty() {
        return (
            StatusCode::OK,
            Json(PantryRecipes {
                items,
                reply: NOTHING_EXPIRING.to_string(),
            }),
        )
            .into_response();
    }

    let reply = match services.recipes() {
        Some(suggester) => suggest_or_fallback(suggester.as_ref(), &items).await,
        None => {
            tracing::warn!("no recipe service configured");
            RECIPE_FALLBACK.to_string()
        }
    };

    (StatusCode::OK, Json(PantryRecipes { items, reply })).into_response()
}
