//! Content-based configuration signatures.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// The key addressing a cached design baseline.
///
/// Derived from the topology key and the canonical JSON of the full resolved
/// parameter tree, so two requests that differ in any override get distinct
/// baselines. Keying narrower than the full tree silently reuses a baseline
/// solved under different conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn of(topology_key: &str, resolved: &Value) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(topology_key.as_bytes());
        hasher.update([0u8]);

        // serde_json maps are key-ordered, so this serialization is canonical.
        let resolved_json = serde_json::to_string(resolved).unwrap_or_default();
        hasher.update(resolved_json.as_bytes());

        let result = hasher.finalize();
        Self(format!("{:x}", result))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
