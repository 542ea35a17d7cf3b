//! crates/biblio_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the boundary of the core.
//! The store and the chat assistant only talk to the outside world through these
//! traits, so adapters (remote chat backend, system clock, loggers) can be swapped
//! for fakes in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::store::StoreChange;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, API).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Testability Ports
//=========================================================================================

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Observer of committed store mutations.
///
/// Called synchronously, after the change has been fully applied, with the new
/// revision of the store.
#[cfg_attr(test, mockall::automock)]
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, change: &StoreChange, revision: u64);
}

//=========================================================================================
// Chat Ports
//=========================================================================================

/// Settings a chat session is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSessionConfig {
    pub model: String,
    pub system_instruction: String,
}

/// The payload returned by the generation backend. `text` may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub text: Option<String>,
}

#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Sends one user message within the running conversation.
    async fn send_message(&self, message: &str) -> PortResult<ChatReply>;
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Opens a new session. Fails with `PortError::Unauthorized` when no credential
    /// is configured.
    async fn start_session(&self, config: &ChatSessionConfig) -> PortResult<Arc<dyn ChatSession>>;
}
