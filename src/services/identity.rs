//! Identity Cache
//!
//! Process-wide memoization of credential -> workspace identity. Identity
//! is immutable for a given credential, so entries never need
//! invalidation; the cache is capacity-bounded only to keep long-lived
//! processes from growing without bound.
//!
//! An explicit object passed into the aggregator, not a global: callers
//! decide its lifetime.

use mini_moka::sync::Cache;

use outreach_pulse_core::{Credential, WorkspaceIdentity};
use outreach_pulse_platforms::{Platform, PlatformResult, RetryPolicy};

/// Maximum cached identities.
const MAX_CACHE_ENTRIES: u64 = 1024;

/// Credential-keyed identity memoization.
pub struct IdentityCache {
    cache: Cache<String, WorkspaceIdentity>,
    retry: RetryPolicy,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::with_retry(RetryPolicy::for_identity())
    }

    pub fn with_retry(retry: RetryPolicy) -> Self {
        Self {
            cache: Cache::builder().max_capacity(MAX_CACHE_ENTRIES).build(),
            retry,
        }
    }

    /// Resolve a credential's identity, consulting the cache first. Only
    /// successful lookups are cached; a failure is returned to the caller
    /// (who degrades to label-as-identity) and retried on the next run.
    pub async fn get_or_resolve(
        &self,
        platform: &dyn Platform,
        credential: &Credential,
    ) -> PlatformResult<WorkspaceIdentity> {
        let key = credential.token().to_string();
        if let Some(identity) = self.cache.get(&key) {
            return Ok(identity);
        }

        let identity = self
            .retry
            .call(|| platform.fetch_identity(credential))
            .await?;
        self.cache.insert(key, identity.clone());
        Ok(identity)
    }

    /// Number of cached identities, for diagnostics.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IdentityCache {
    fn default() -> Self {
        Self::new()
    }
}
