//! Request and response types for the public endpoints

pub mod briefing;
pub mod chat;
pub mod error;
pub mod json;
pub mod query;

pub use briefing::BriefingResponse;
pub use chat::{ChatPayload, ChatResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use query::ProviderQuery;
