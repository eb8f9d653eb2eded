use async_trait::async_trait;
use std::fmt::Debug;

use super::{CompletionRequest, ProviderError};

/// Trait for upstream text-completion providers (Workers AI, Hugging Face, gateways)
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Perform one completion call; never retried by the provider itself
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;

    /// Stable provider name reported in results and errors
    fn name(&self) -> &str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that replays a fixed outcome and counts its calls
    #[derive(Debug)]
    pub struct ScriptedProvider {
        name: String,
        outcome: Result<String, ProviderError>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        pub fn succeeding(name: impl Into<String>, text: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                outcome: Ok(text.into()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(name: impl Into<String>, status: u16, message: impl AsRef<str>) -> Self {
            let name = name.into();
            Self {
                outcome: Err(ProviderError::new(name.clone(), message, status)),
                name,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        fn name(&self) -> &str {
            &self.name
        }
    }
}
