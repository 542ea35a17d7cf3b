//! crates/biblio_core/src/chat.rs
//!
//! The BiblioBot assistant: a lazily opened session with a text-generation backend.
//!
//! `ChatAssistant::send` never fails. Whatever goes wrong (no credential, network
//! error, empty reply) the student gets one of the fixed fallback messages below.

use std::sync::Arc;

use futures::lock::Mutex;
use tracing::{error, info, warn};

use crate::ports::{ChatBackend, ChatReply, ChatSession, ChatSessionConfig};

/// Default model identifier of the generation backend.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const SYSTEM_INSTRUCTION: &str = r#"You are "BiblioBot", an AI assistant for the IUT Dijon Library.
Your goal is to help students with information about the library.

Key Information from the Library Database:
- **Location**: IUT Dijon.
- **Resources**: 580 DVDs, 715 books bought/year, 27 DVDs bought/year, 42 journal subscriptions.
- **Annual Traffic**: 70,830 entries in 2024.
- **Peak Times**: The library is busiest between 12:30 and 13:30.
- **Busy Afternoons**: Attendance is generally high between 14:00 and 17:00.
- **Busy Months**: October, November, December (avg 550 entries/day, peaks > 700).
- **Services**: Loan books, DVDs, CDs, Comics, VR Headsets. Connection via ENT identifiers (Primo catalog).
- **Events**: CV Workshops, Author Meetings, 3D Printing demos.
- **Tone**: Helpful, friendly, student-oriented, encouraging.

Answer questions concisely. If asked about specific book availability, pretend to check the "real-time database" and give a plausible answer based on the type of book (e.g., "Yes, we have 2 copies of that manual.").
If asked about late fees or returns, remind them they can check their "Mon Compte" tab in this app.
"#;

/// Returned when no session could be opened (missing credential, backend down).
pub const FALLBACK_NO_CONNECTION: &str =
    "Désolé, je ne peux pas me connecter au service d'IA pour le moment. Veuillez vérifier votre clé API.";

/// Returned when the session exists but the remote call failed.
pub const FALLBACK_CONNECTION_ERROR: &str =
    "Une erreur est survenue lors de la communication avec l'assistant.";

/// Returned when the backend answered without any text.
pub const FALLBACK_NO_REPLY: &str = "Désolé, je n'ai pas compris.";

/// Holds at most one session for its whole lifetime.
///
/// The session is opened on the first `send`. If opening fails the assistant stays
/// uninitialized and tries again on the next call; once open, it is reused forever.
pub struct ChatAssistant {
    backend: Arc<dyn ChatBackend>,
    config: ChatSessionConfig,
    session: Mutex<Option<Arc<dyn ChatSession>>>,
}

impl ChatAssistant {
    /// Creates an assistant briefed with the BiblioBot persona.
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self::with_config(
            backend,
            ChatSessionConfig {
                model: model.into(),
                system_instruction: SYSTEM_INSTRUCTION.to_string(),
            },
        )
    }

    pub fn with_config(backend: Arc<dyn ChatBackend>, config: ChatSessionConfig) -> Self {
        Self {
            backend,
            config,
            session: Mutex::new(None),
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Returns the live session, opening it if needed.
    async fn session(&self) -> Option<Arc<dyn ChatSession>> {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_ref() {
            return Some(Arc::clone(session));
        }

        match self.backend.start_session(&self.config).await {
            Ok(session) => {
                info!(model = %self.config.model, "Chat session opened.");
                *slot = Some(Arc::clone(&session));
                Some(session)
            }
            Err(e) => {
                warn!(error = %e, "Could not open chat session.");
                None
            }
        }
    }

    /// Forwards the student's text and returns the reply, or a fallback message.
    pub async fn send(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return FALLBACK_NO_REPLY.to_string();
        }

        let Some(session) = self.session().await else {
            return FALLBACK_NO_CONNECTION.to_string();
        };

        match session.send_message(text).await {
            Ok(ChatReply { text: Some(reply) }) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!("Chat backend returned an empty reply.");
                FALLBACK_NO_REPLY.to_string()
            }
            Err(e) => {
                error!(error = %e, "Chat backend call failed.");
                FALLBACK_CONNECTION_ERROR.to_string()
            }
        }
    }
}
