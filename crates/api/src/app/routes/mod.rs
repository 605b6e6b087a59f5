use axum::{routing::get, Router};

pub mod catalog;
pub mod orders;
pub mod system;

/// Router for the whole API surface.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/orders", orders::router())
        .nest("/catalog", catalog::router())
}
