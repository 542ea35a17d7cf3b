//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use biblio_core::{AttendanceStats, Conversation, LibraryStore};
use std::sync::Arc;
use tokio::sync::RwLock;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The store is the single source of truth for catalog, user and events; every
/// mutation goes through its write lock so revisions are strictly ordered.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<LibraryStore>>,
    pub conversation: Arc<Conversation>,
    pub stats: Arc<AttendanceStats>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        store: LibraryStore,
        conversation: Conversation,
        stats: AttendanceStats,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            conversation: Arc::new(conversation),
            stats: Arc::new(stats),
            config,
        }
    }
}
