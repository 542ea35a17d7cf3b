//! crates/biblio_core/src/conversation.rs
//!
//! The chat widget's transcript and the exchange cycle around `ChatAssistant`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::lock::Mutex;

use crate::chat::ChatAssistant;
use crate::domain::new_id;
use crate::ports::Clock;

pub const WELCOME_MESSAGE: &str = "Bonjour ! Je suis BiblioBot. Je peux vous renseigner sur les horaires, l'affluence ou nos services. Comment puis-je vous aider ?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

/// Ordered messages of one chat widget, starting with the welcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new(opened_at: DateTime<Utc>) -> Self {
        Self {
            messages: vec![ChatMessage {
                id: "welcome".to_string(),
                text: WELCOME_MESSAGE.to_string(),
                sender: Sender::Bot,
                timestamp: opened_at,
            }],
        }
    }

    /// Appends the student's message. Blank text is ignored.
    pub fn push_user(&mut self, text: &str, at: DateTime<Utc>) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        Some(self.push(text.to_string(), Sender::User, at))
    }

    pub fn push_bot(&mut self, text: String, at: DateTime<Utc>) -> ChatMessage {
        self.push(text, Sender::Bot, at)
    }

    fn push(&mut self, text: String, sender: Sender, at: DateTime<Utc>) -> ChatMessage {
        let message = ChatMessage {
            id: new_id(),
            text,
            sender,
            timestamp: at,
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// A transcript wired to an assistant.
///
/// The transcript lock is never held while waiting for the assistant, so reading
/// the transcript (or sending another message) stays possible during a pending reply.
pub struct Conversation {
    assistant: Arc<ChatAssistant>,
    transcript: Mutex<ChatTranscript>,
    clock: Arc<dyn Clock>,
}

impl Conversation {
    pub fn new(assistant: Arc<ChatAssistant>, clock: Arc<dyn Clock>) -> Self {
        let transcript = ChatTranscript::new(clock.now());
        Self {
            assistant,
            transcript: Mutex::new(transcript),
            clock,
        }
    }

    /// Appends the student's message, waits for the assistant and appends its reply.
    ///
    /// Returns the bot message, or `None` when the text was blank. If the returned
    /// future is dropped before the reply arrives, the student's message stays.
    pub async fn submit(&self, text: &str) -> Option<ChatMessage> {
        self.transcript
            .lock()
            .await
            .push_user(text, self.clock.now())?;

        let reply = self.assistant.send(text).await;

        Some(self.transcript.lock().await.push_bot(reply, self.clock.now()))
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.lock().await.messages().to_vec()
    }
}
