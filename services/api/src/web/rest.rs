//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{dto::*, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use biblio_core::{
    catalog::{new_arrivals, search_items, CatalogFilter},
    outcome::{ReserveOutcome, ReviewOutcome},
    stats::BUSY_MONTH_THRESHOLD,
};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;

type HandlerResult<T> = Result<Json<T>, (StatusCode, String)>;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_items_handler,
        new_arrivals_handler,
        get_item_handler,
        toggle_favorite_handler,
        reserve_item_handler,
        cancel_reservation_handler,
        add_review_handler,
        list_events_handler,
        register_event_handler,
        profile_handler,
        stats_handler,
        list_messages_handler,
        send_message_handler,
    ),
    components(
        schemas(
            ItemResponse, ReviewResponse, EventResponse, LoanResponse, ReservationResponse,
            ProfileResponse, NoticeResponse, ActionResponse, TrafficPointResponse,
            StatsResponse, ChatMessageResponse, AddReviewRequest, SendMessageRequest
        )
    ),
    tags(
        (name = "Campus Library API", description = "Catalog, account, events and the BiblioBot assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Catalog Handlers
//=========================================================================================

/// List the catalog, optionally narrowed by a category pill and a search query.
#[utoipa::path(
    get,
    path = "/items",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Matching items in catalog order", body = [ItemResponse]),
        (status = 400, description = "Unknown filter label")
    )
)]
pub async fn list_items_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> HandlerResult<Vec<ItemResponse>> {
    let filter = query
        .filter
        .as_deref()
        .unwrap_or_default()
        .parse::<CatalogFilter>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let store = app_state.store.read().await;
    let items = search_items(store.items(), query.q.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|item| filter.matches(item))
        .map(|item| ItemResponse::from_store(item, &store))
        .collect();
    Ok(Json(items))
}

/// List the items flagged as new arrivals.
#[utoipa::path(
    get,
    path = "/items/new",
    responses((status = 200, description = "New arrivals", body = [ItemResponse]))
)]
pub async fn new_arrivals_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<ItemResponse>> {
    let store = app_state.store.read().await;
    let items = new_arrivals(store.items())
        .into_iter()
        .map(|item| ItemResponse::from_store(item, &store))
        .collect();
    Json(items)
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Catalog item id")),
    responses(
        (status = 200, description = "Item detail", body = ItemResponse),
        (status = 404, description = "No such item")
    )
)]
pub async fn get_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> HandlerResult<ItemResponse> {
    let store = app_state.store.read().await;
    store
        .item(&id)
        .map(|item| Json(ItemResponse::from_store(item, &store)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Item {} not found", id)))
}

/// Add the item to the favorites, or remove it if it is already there.
#[utoipa::path(
    post,
    path = "/items/{id}/favorite",
    params(("id" = String, Path, description = "Catalog item id")),
    responses((status = 200, description = "Favorite toggled", body = ActionResponse))
)]
pub async fn toggle_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ActionResponse> {
    let mut store = app_state.store.write().await;
    let outcome = store.toggle_favorite(&id);
    Json(ActionResponse::new(&outcome, store.revision()))
}

/// Reserve an item for the current student.
#[utoipa::path(
    post,
    path = "/items/{id}/reservations",
    params(("id" = String, Path, description = "Catalog item id")),
    responses((
        status = 200,
        description = "`reserved`, `already_reserved` or `ignored`",
        body = ActionResponse
    ))
)]
pub async fn reserve_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ActionResponse> {
    let mut store = app_state.store.write().await;
    let outcome = store.reserve_item(&id);
    let mut response = ActionResponse::new(&outcome, store.revision());
    if let ReserveOutcome::Reserved(reservation) = &outcome {
        response.reservation = Some(ReservationResponse::new(reservation, &store));
    }
    Json(response)
}

#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    params(("id" = String, Path, description = "Reservation id")),
    responses((status = 200, description = "`cancelled` or `ignored`", body = ActionResponse))
)]
pub async fn cancel_reservation_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ActionResponse> {
    let mut store = app_state.store.write().await;
    let outcome = store.cancel_reservation(&id);
    Json(ActionResponse::new(&outcome, store.revision()))
}

/// Post a review signed by the current student. The rating must be within 1..=5.
#[utoipa::path(
    post,
    path = "/items/{id}/reviews",
    params(("id" = String, Path, description = "Catalog item id")),
    request_body = AddReviewRequest,
    responses((
        status = 200,
        description = "`review_added`, `invalid_rating` or `ignored`",
        body = ActionResponse
    ))
)]
pub async fn add_review_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AddReviewRequest>,
) -> Json<ActionResponse> {
    let mut store = app_state.store.write().await;
    let outcome = store.add_review(&id, &request.comment, request.rating);
    let mut response = ActionResponse::new(&outcome, store.revision());
    if let ReviewOutcome::Added(review) = &outcome {
        response.review = Some(ReviewResponse::from(review));
    }
    Json(response)
}

//=========================================================================================
// Event, Account and Statistics Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/events",
    responses((status = 200, description = "Upcoming events", body = [EventResponse]))
)]
pub async fn list_events_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<EventResponse>> {
    let store = app_state.store.read().await;
    let events = store
        .events()
        .iter()
        .map(|event| EventResponse::new(event, store.is_registered(&event.id)))
        .collect();
    Json(events)
}

#[utoipa::path(
    post,
    path = "/events/{id}/registrations",
    params(("id" = String, Path, description = "Event id")),
    responses((
        status = 200,
        description = "`registered`, `already_registered` or `ignored`",
        body = ActionResponse
    ))
)]
pub async fn register_event_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ActionResponse> {
    let mut store = app_state.store.write().await;
    let outcome = store.register_event(&id);
    Json(ActionResponse::new(&outcome, store.revision()))
}

/// The "Mon Compte" screen: loans, reservations, favorites and events.
#[utoipa::path(
    get,
    path = "/me",
    responses((status = 200, description = "Profile of the current student", body = ProfileResponse))
)]
pub async fn profile_handler(State(app_state): State<Arc<AppState>>) -> Json<ProfileResponse> {
    let store = app_state.store.read().await;
    Json(ProfileResponse::from_store(&store))
}

#[utoipa::path(
    get,
    path = "/stats",
    responses((status = 200, description = "Attendance statistics", body = StatsResponse))
)]
pub async fn stats_handler(State(app_state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse::new(&app_state.stats, BUSY_MONTH_THRESHOLD))
}

//=========================================================================================
// Chat Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/chat/messages",
    responses((status = 200, description = "Chat transcript, oldest first", body = [ChatMessageResponse]))
)]
pub async fn list_messages_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<ChatMessageResponse>> {
    let messages = app_state.conversation.messages().await;
    Json(messages.iter().map(ChatMessageResponse::from).collect())
}

/// Send a message to BiblioBot and wait for its reply.
///
/// Backend failures never surface as errors; the reply then carries a fallback text.
#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "The assistant's reply", body = ChatMessageResponse),
        (status = 400, description = "Blank message")
    )
)]
pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SendMessageRequest>,
) -> HandlerResult<ChatMessageResponse> {
    match app_state.conversation.submit(&request.text).await {
        Some(reply) => {
            info!(chars = request.text.chars().count(), "Chat exchange completed.");
            Ok(Json(ChatMessageResponse::from(&reply)))
        }
        None => {
            warn!("Rejected a blank chat message.");
            Err((
                StatusCode::BAD_REQUEST,
                "Message text must not be empty".to_string(),
            ))
        }
    }
}
