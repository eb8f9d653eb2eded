//! Cache infrastructure

mod in_memory;

pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
