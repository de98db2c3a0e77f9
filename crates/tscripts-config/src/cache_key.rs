//! Cache key derivation using BLAKE3 over a canonical serialization.
//!
//! The key is a generation token for the bundler's persistent cache: equal
//! environments give equal keys on any machine, any field change gives a new
//! key.

use blake3::Hasher;
use serde_json::{Map, Value};

use crate::environment::BuildEnvironment;

/// Current cache key format version. Increment when the canonical form changes.
const CACHE_FORMAT_VERSION: u32 = 1;

/// Content-addressed cache key (256-bit BLAKE3, lowercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Length of every key in hex characters.
    pub const HEX_LEN: usize = 64;

    /// Hash an arbitrary JSON value after canonicalizing object key order.
    pub fn from_value(value: &Value) -> Self {
        let canonical = canonicalize(value);
        let mut hasher = Hasher::new();
        hasher.update(&CACHE_FORMAT_VERSION.to_le_bytes());
        hasher.update(canonical.to_string().as_bytes());
        Self(hasher.finalize().to_hex().to_string())
    }

    /// Get the cache key as a hex string.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// First `len` hex characters, for display.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the cache key for a build environment.
pub fn derive_key(environment: &BuildEnvironment) -> CacheKey {
    // BuildEnvironment only holds strings, paths, bools and maps with string
    // keys, so conversion to a JSON value cannot fail; Null still hashes.
    let value = serde_json::to_value(environment).unwrap_or(Value::Null);
    CacheKey::from_value(&value)
}

/// Rebuild a JSON value with every object's keys in sorted order.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
