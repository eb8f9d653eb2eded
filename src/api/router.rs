use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::briefing;
use super::chat;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Public API; unsupported methods answer 405 with an Allow header
        .route(
            "/api/briefing",
            get(briefing::get_briefing).fallback(briefing::briefing_method_not_allowed),
        )
        .route(
            "/api/chat",
            post(chat::post_chat)
                .options(chat::chat_options)
                .fallback(chat::chat_method_not_allowed),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(logging_middleware)),
        )
}
