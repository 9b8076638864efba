use axum::Router;

pub mod products;
pub mod recipes;
pub mod system;

/// Router for all application endpoints (health is mounted separately).
pub fn router() -> Router {
    Router::new()
        .merge(products::router())
        .merge(recipes::router())
}
