//! HTTP surface: router construction, shared state, and error mapping.

pub mod errors;
pub mod handlers;
pub mod state;

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use handlers::items;
use state::AppState;

/// Build the application router with the full middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{id}",
            get(items::get_item)
                .put(items::update_item)
                .patch(items::patch_item)
                .delete(items::delete_item),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any unmatched route.
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Rota não encontrada" })),
    )
}
