//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the BiblioBot chat model.
//! It implements the `ChatBackend` and `ChatSession` ports from the `core` crate on top
//! of an OpenAI-compatible chat-completions endpoint (Gemini's by default).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use biblio_core::ports::{
    ChatBackend, ChatReply, ChatSession, ChatSessionConfig, PortError, PortResult,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

fn unexpected(e: impl std::fmt::Display) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// The Backend (session factory)
//=========================================================================================

/// Opens chat sessions against an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiChatBackend {
    api_key: Option<String>,
    api_base: String,
}

impl OpenAiChatBackend {
    /// Creates a new `OpenAiChatBackend`. A missing key is accepted here; it is
    /// reported each time a session is requested.
    pub fn new(api_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            api_key,
            api_base: api_base.into(),
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatBackend {
    async fn start_session(&self, config: &ChatSessionConfig) -> PortResult<Arc<dyn ChatSession>> {
        let Some(api_key) = self.api_key.as_ref() else {
            warn!("Chat API key not found in environment variables");
            return Err(PortError::Unauthorized(
                "chat API key is not configured".to_string(),
            ));
        };

        let openai_config = OpenAIConfig::new()
            .with_api_base(&self.api_base)
            .with_api_key(api_key);
        let client = Client::with_config(openai_config);

        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(config.system_instruction.as_str())
            .build()
            .map_err(unexpected)?
            .into();

        Ok(Arc::new(OpenAiChatSession {
            client,
            model: config.model.clone(),
            history: Mutex::new(vec![system_message]),
        }))
    }
}

//=========================================================================================
// The Session
//=========================================================================================

/// A running conversation. The history starts with the system instruction and
/// grows with every answered exchange.
pub struct OpenAiChatSession {
    client: Client<OpenAIConfig>,
    model: String,
    history: Mutex<Vec<ChatCompletionRequestMessage>>,
}

#[async_trait]
impl ChatSession for OpenAiChatSession {
    async fn send_message(&self, message: &str) -> PortResult<ChatReply> {
        let user_message: ChatCompletionRequestMessage =
            ChatCompletionRequestUserMessageArgs::default()
                .content(message)
                .build()
                .map_err(unexpected)?
                .into();

        // Held for the whole exchange so turns are recorded in order.
        let mut history = self.history.lock().await;
        let mut messages = history.clone();
        messages.push(user_message.clone());

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(unexpected)?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        // Unanswered turns are left out of the history.
        if let Some(reply) = text.as_deref().filter(|t| !t.trim().is_empty()) {
            let assistant_message = ChatCompletionRequestAssistantMessageArgs::default()
                .content(reply)
                .build()
                .map_err(unexpected)?
                .into();
            history.push(user_message);
            history.push(assistant_message);
            debug!(turns = history.len(), "Chat history updated.");
        }

        Ok(ChatReply { text })
    }
}
