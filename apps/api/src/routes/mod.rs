pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::options::handlers as options;
use crate::review::handlers as reviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Option catalogs
        .route("/api/v1/options", get(options::handle_get_options))
        .route(
            "/api/v1/options/custom",
            get(options::handle_list_custom_options).post(options::handle_add_custom_option),
        )
        .route(
            "/api/v1/options/custom/:kind/:id",
            delete(options::handle_delete_custom_option),
        )
        .route("/api/v1/quotes", get(options::handle_list_quotes))
        // Reviews
        .route("/api/v1/reviews", get(reviews::handle_list_reviews))
        .route("/api/v1/reviews/generate", post(reviews::handle_generate))
        .route("/api/v1/reviews/preview", post(reviews::handle_preview))
        .route(
            "/api/v1/reviews/:id",
            get(reviews::handle_get_review)
                .put(reviews::handle_update_review)
                .delete(reviews::handle_delete_review),
        )
        .with_state(state)
}
