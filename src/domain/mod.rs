//! Domain layer - completion model, provider selection and caching contracts

pub mod cache;
pub mod completion;
pub mod error;
pub mod provider;

pub use cache::{Cache, CacheExt, CacheKeyGenerator, CacheKeyParams, DefaultKeyGenerator};
pub use completion::{
    complete_with_fallback, first_text, string_at, truncate_message, CompletionProvider,
    CompletionRequest, CompletionRequestBuilder, CompletionResult, Message, MessageRole,
    ProviderError, TextExtractor, DEFAULT_ERROR_STATUS, MAX_ERROR_MESSAGE_CHARS,
};
pub use error::DomainError;
pub use provider::{is_truthy, resolve_chain, ProviderConfig, ProviderKind, ProviderSelection};
