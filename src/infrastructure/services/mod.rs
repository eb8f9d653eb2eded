//! Infrastructure services

mod completion_service;
mod response_cache_service;

pub use completion_service::{CompletionService, CompletionServiceTrait};
pub use response_cache_service::{ResponseCacheConfig, ResponseCacheService};

#[cfg(test)]
pub use completion_service::MockCompletionServiceTrait;
