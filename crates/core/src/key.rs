//! Cache entry identifiers derived from query text

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;

/// File extension of cache entries.
pub const ENTRY_EXTENSION: &str = "json";

/// Identifier of a cache entry: SHA-256 of the exact query bytes, hex encoded.
///
/// No normalization is applied, so queries that differ only in whitespace or
/// variable names get different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Compute the key for a query text
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        let hash = Sha256::digest(query.as_bytes());
        Self(hex::encode(hash))
    }

    /// Create from hex string (validation)
    ///
    /// # Errors
    ///
    /// Returns error if the hex string is invalid or wrong length
    pub fn from_hex(hex: impl Into<String>) -> Result<Self> {
        let s = hex.into();
        if s.len() != 64 {
            return Err(Error::configuration(format!(
                "Cache key must be 64 hex characters, got {}",
                s.len()
            )));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::configuration(
                "Cache key must contain only hex digits",
            ));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Parse the key out of a cache entry file name (`<hex>.json`)
    ///
    /// Only lowercase names match, since that is how entries are written.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(ENTRY_EXTENSION)?.strip_suffix('.')?;
        if stem.bytes().any(|b| b.is_ascii_uppercase()) {
            return None;
        }
        Self::from_hex(stem).ok()
    }

    /// Get the hex representation
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// File name of the cache entry for this key
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{ENTRY_EXTENSION}", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
