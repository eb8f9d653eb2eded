//! Cache domain - response caching abstraction

mod key;
mod repository;

pub use key::{CacheKeyGenerator, CacheKeyParams, DefaultKeyGenerator};
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::MockCache;
