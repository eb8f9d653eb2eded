//! Daily briefing payloads

use serde::{Deserialize, Serialize};

use crate::domain::CompletionResult;

/// Successful briefing; also the cached representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefingResponse {
    pub markdown: String,
    pub provider: String,
    pub attempted_providers: Vec<String>,
    pub generated_at: String,
}

impl BriefingResponse {
    pub fn from_result(result: CompletionResult, generated_at: String) -> Self {
        Self {
            markdown: result.text,
            provider: result.provider_used,
            attempted_providers: result.attempted_providers,
            generated_at,
        }
    }
}
