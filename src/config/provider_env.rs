//! Flat key/value snapshot of provider credentials and overrides

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Environment-style settings handed explicitly to provider discovery.
///
/// Values are trimmed on read and blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct ProviderEnvironment {
    values: BTreeMap<String, String>,
}

impl ProviderEnvironment {
    /// Snapshots the current process environment
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Builds a snapshot from raw OS pairs, skipping any that are not valid UTF-8
    pub fn from_os_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_pairs(
            pairs
                .into_iter()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Trimmed, non-empty value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// First non-empty value among `keys`, in order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }
}
