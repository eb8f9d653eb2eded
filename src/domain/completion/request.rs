use serde::{Deserialize, Serialize};

use super::{Message, MessageRole};

/// A request for a single text completion, independent of any provider wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages,
        }
    }

    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }

    /// Messages in chat-completions order: the system prompt (when set) followed by the conversation
    pub fn chat_messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);

        if !self.system_prompt.trim().is_empty() {
            messages.push(Message::system(self.system_prompt.clone()));
        }

        messages.extend(self.messages.iter().cloned());
        messages
    }

    /// Renders the conversation as a single prompt body.
    ///
    /// A lone user message is passed through verbatim; anything longer is
    /// flattened into `Speaker: content` lines.
    pub fn conversation_text(&self) -> String {
        match self.messages.as_slice() {
            [only] if only.role == MessageRole::User => only.content.clone(),
            messages => messages
                .iter()
                .map(|m| format!("{}: {}", m.speaker(), m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// `{system}\n\n{conversation}` for prompt-completion style providers
    pub fn prompt_text(&self) -> String {
        let conversation = self.conversation_text();

        if self.system_prompt.trim().is_empty() {
            conversation
        } else {
            format!("{}\n\n{}", self.system_prompt, conversation)
        }
    }
}

/// Builder for [`CompletionRequest`]
#[derive(Debug, Default)]
pub struct CompletionRequestBuilder {
    system_prompt: String,
    messages: Vec<Message>,
}

impl CompletionRequestBuilder {
    pub fn system(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn build(self) -> CompletionRequest {
        CompletionRequest::new(self.system_prompt, self.messages)
    }
}
