//! services/api/src/bin/api.rs

use biblio_api_lib::{
    adapters::{OpenAiChatBackend, SystemClock, TracingChangeListener},
    config::Config,
    error::ApiError,
    web::{rest::ApiDoc, router, state::AppState},
};
use biblio_core::{seed, ChatAssistant, Conversation, LibraryStore};
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Build the Library Store from Seed Data ---
    let clock = Arc::new(SystemClock::new());
    let mut store = LibraryStore::seeded(clock.clone())?;
    store.subscribe(Arc::new(TracingChangeListener));
    info!(
        items = store.items().len(),
        events = store.events().len(),
        "Library store seeded."
    );

    // --- 3. Initialize the Chat Assistant ---
    if config.chat_api_key.is_none() {
        warn!("No chat API key configured; BiblioBot will answer with its fallback message.");
    }
    let backend = Arc::new(OpenAiChatBackend::new(
        config.chat_api_key.clone(),
        config.chat_api_base.clone(),
    ));
    let assistant = Arc::new(ChatAssistant::new(backend, config.chat_model.clone()));
    let conversation = Conversation::new(assistant, clock);

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        config.clone(),
        store,
        conversation,
        seed::attendance(),
    ));

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
