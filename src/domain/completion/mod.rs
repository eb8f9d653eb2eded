//! Completion domain models, provider trait and fallback chain

mod extract;
mod fallback;
mod message;
mod provider;
mod request;
mod result;

pub use extract::{first_text, string_at, TextExtractor};
pub use fallback::complete_with_fallback;
pub use message::{Message, MessageRole};
pub use provider::CompletionProvider;
pub use request::{CompletionRequest, CompletionRequestBuilder};
pub use result::{
    truncate_message, CompletionResult, ProviderError, DEFAULT_ERROR_STATUS,
    MAX_ERROR_MESSAGE_CHARS,
};

#[cfg(test)]
pub use provider::mock::ScriptedProvider;
