//! Application state shared by the request handlers

use std::sync::Arc;

use crate::config::FeaturesConfig;
use crate::infrastructure::services::{CompletionServiceTrait, ResponseCacheService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub completion_service: Arc<dyn CompletionServiceTrait>,
    pub response_cache: ResponseCacheService,
    pub features: FeaturesConfig,
}

impl AppState {
    pub fn new(
        completion_service: Arc<dyn CompletionServiceTrait>,
        response_cache: ResponseCacheService,
        features: FeaturesConfig,
    ) -> Self {
        Self {
            completion_service,
            response_cache,
            features,
        }
    }
}
