//! Workspace Identity Types
//!
//! A workspace is a tenant account on an upstream platform, addressed by an
//! opaque bearer credential. The credential maps to exactly one workspace
//! for its whole lifetime, which is what makes identity caching safe.

use serde::{Deserialize, Serialize};

/// Opaque bearer token for one upstream workspace. Immutable once loaded.
///
/// `Display` and `Debug` redact the token so credentials never end up in
/// logs or serialized output by accident.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw bearer token, for Authorization headers and cache keys.
    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the last four characters, not bytes: the token may end in
        // multibyte text and a byte slice could split a char.
        let skip = self.0.chars().count().saturating_sub(4);
        let tail: String = self.0.chars().skip(skip).collect();
        write!(f, "****{tail}")
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({self})")
    }
}

/// Canonical identity of a workspace as resolved from its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceIdentity {
    pub canonical_id: String,
    pub display_name: String,
}

impl WorkspaceIdentity {
    pub fn new(canonical_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            canonical_id: canonical_id.into(),
            display_name: display_name.into(),
        }
    }

    /// Identity used when upstream resolution fails: the roster label stands
    /// in for both the canonical id and the display name.
    pub fn from_label(label: &str) -> Self {
        Self::new(label, label)
    }
}
