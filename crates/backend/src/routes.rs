use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // UseCase u601: Generate documentation
        .route("/api/u601/info", get(handlers::usecases::u601_info))
        .route(
            "/api/u601/generate-docs",
            post(handlers::usecases::u601_generate_docs),
        )
}
