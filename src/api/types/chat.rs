//! Analyst chat payloads and history normalization

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CompletionResult, DomainError, Message, MessageRole};

/// Only the most recent turns are forwarded upstream
pub const MAX_HISTORY_MESSAGES: usize = 12;

pub const EMPTY_MESSAGES_MESSAGE: &str = "At least one message is required.";
pub const NO_USER_MESSAGE_MESSAGE: &str = "At least one user message is required.";

/// Inbound chat body: `{ messages: [...] }` or `{ history: [...] }`
///
/// Entries stay untyped until [`ChatPayload::into_history`] so one
/// malformed entry is dropped instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub messages: Option<Value>,
    #[serde(default)]
    pub history: Option<Value>,
}

impl ChatPayload {
    /// Reads the payload from any JSON value; non-objects carry no messages
    pub fn from_value(body: Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    /// `messages` wins over `history` when both are arrays
    fn entries(&self) -> &[Value] {
        [&self.messages, &self.history]
            .into_iter()
            .find_map(|field| field.as_ref().and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Validated conversation, oldest first, ready to send upstream.
    ///
    /// Client `system` entries, unknown roles and blank contents are
    /// dropped; the server owns the system prompt.
    pub fn into_history(self) -> Result<Vec<Message>, DomainError> {
        let entries = self.entries();

        if entries.is_empty() {
            return Err(DomainError::validation(EMPTY_MESSAGES_MESSAGE));
        }

        let mut history: Vec<Message> = entries.iter().filter_map(conversation_turn).collect();

        if history.len() > MAX_HISTORY_MESSAGES {
            history.drain(..history.len() - MAX_HISTORY_MESSAGES);
        }

        if !history.iter().any(|m| m.role == MessageRole::User) {
            return Err(DomainError::validation(NO_USER_MESSAGE_MESSAGE));
        }

        Ok(history)
    }
}

fn conversation_turn(entry: &Value) -> Option<Message> {
    let role = entry.get("role").and_then(Value::as_str).and_then(MessageRole::parse)?;
    let content = entry.get("content").and_then(Value::as_str)?.trim();

    match role {
        MessageRole::System => None,
        _ if content.is_empty() => None,
        _ => Some(Message::new(role, content)),
    }
}

/// Successful chat reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub provider: String,
    pub attempted_providers: Vec<String>,
    pub generated_at: String,
}

impl ChatResponse {
    pub fn from_result(result: CompletionResult, generated_at: String) -> Self {
        Self {
            reply: result.text,
            provider: result.provider_used,
            attempted_providers: result.attempted_providers,
            generated_at,
        }
    }
}
