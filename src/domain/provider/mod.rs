//! Provider identity, connection settings and chain selection

mod config;
mod kind;
mod selection;

pub use config::ProviderConfig;
pub use kind::ProviderKind;
pub use selection::{is_truthy, resolve_chain, ProviderSelection};
