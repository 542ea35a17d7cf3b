pub mod dto;
pub mod rest;
pub mod state;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post},
    Router,
};
use rest::*;
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the REST router over the shared state, with CORS restricted to the
/// configured origin. The Swagger UI is merged in by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_allow_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    Router::new()
        .route("/items", get(list_items_handler))
        .route("/items/new", get(new_arrivals_handler))
        .route("/items/{id}", get(get_item_handler))
        .route("/items/{id}/favorite", post(toggle_favorite_handler))
        .route("/items/{id}/reservations", post(reserve_item_handler))
        .route("/items/{id}/reviews", post(add_review_handler))
        .route("/reservations/{id}", delete(cancel_reservation_handler))
        .route("/events", get(list_events_handler))
        .route("/events/{id}/registrations", post(register_event_handler))
        .route("/me", get(profile_handler))
        .route("/stats", get(stats_handler))
        .route(
            "/chat/messages",
            get(list_messages_handler).post(send_message_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
