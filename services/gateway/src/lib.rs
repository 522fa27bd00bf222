pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use web::{
    delete_chat_handler, gate_pages, get_chat_handler, get_preview_handler, log_requests,
    login_handler, pages, post_message_handler, state::AppState, update_code_handler,
};

/// Builds the gateway router: the `/api/*` proxy routes plus the gated page routes.
pub fn router(state: Arc<AppState>) -> Router {
    // Proxy routes are never gated; the backend authorizes them itself.
    let api_routes = Router::new()
        .route("/api/login", post(login_handler))
        .route(
            "/api/chat/{id}",
            get(get_chat_handler).delete(delete_chat_handler),
        )
        .route("/api/chat/{id}/message", post(post_message_handler))
        .route("/api/chat/{id}/code", put(update_code_handler))
        .route("/api/preview/{id}", get(get_preview_handler));

    let page_routes = Router::new()
        .route("/", get(pages::home_page))
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/chat", get(pages::chat_index))
        .route("/chat/{id}", get(pages::chat_page))
        .route("/preview", get(pages::preview_page))
        .layer(axum_middleware::from_fn(gate_pages));

    Router::new()
        .merge(api_routes)
        .merge(page_routes)
        .layer(axum_middleware::from_fn(log_requests))
        .with_state(state)
}
