use std::sync::Arc;

use forms_types::{IdentityPatch, QueryKey, SubmissionResult};
use tracing::{debug, info};

use crate::{CacheStore, IdentityResolver, IdentityStore};

/// What [`CacheSyncBridge::on_success`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncReport {
    Applied {
        invalidated: usize,
        identity_merged: bool,
    },
    /// The result was not a success; nothing was touched.
    Skipped,
}

/// Applies the read-side effects of a successful submission.
pub struct CacheSyncBridge {
    cache: Arc<dyn CacheStore>,
    identity: Arc<dyn IdentityStore>,
    resolver: IdentityResolver,
}

impl CacheSyncBridge {
    pub fn new(cache: Arc<dyn CacheStore>, identity: Arc<dyn IdentityStore>) -> Self {
        Self {
            cache,
            identity,
            resolver: IdentityResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: IdentityResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn resolver(&self) -> &IdentityResolver {
        &self.resolver
    }

    /// The signed-in user's id, if there is a session and it carries one.
    pub fn current_id(&self) -> Option<String> {
        let record = self.identity.current_identity()?;
        self.resolver.resolve(&record.as_value())
    }

    /// True when `target_id` names the signed-in user.
    pub fn is_self(&self, target_id: &str) -> bool {
        self.identity
            .current_identity()
            .is_some_and(|record| self.resolver.is_same(&record.as_value(), target_id))
    }

    /// On success, invalidate each key once and merge `self_update` into the
    /// session record. Any other outcome is a no-op.
    ///
    /// A patch is dropped when nobody is signed in.
    pub fn on_success(
        &self,
        result: &SubmissionResult,
        keys: &[QueryKey],
        self_update: Option<&IdentityPatch>,
    ) -> SyncReport {
        if !result.is_success() {
            debug!(outcome = ?result.outcome, "Cache sync skipped");
            return SyncReport::Skipped;
        }

        let mut seen: Vec<&QueryKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if !seen.contains(&key) {
                self.cache.invalidate(key);
                seen.push(key);
            }
        }

        let identity_merged = match self_update {
            Some(patch) if !patch.is_empty() => self.merge_identity(patch),
            _ => false,
        };

        info!(
            invalidated = seen.len(),
            identity_merged, "Cache sync applied"
        );
        SyncReport::Applied {
            invalidated: seen.len(),
            identity_merged,
        }
    }

    fn merge_identity(&self, patch: &IdentityPatch) -> bool {
        match self.identity.current_identity() {
            Some(mut record) => {
                record.merge(patch);
                self.identity.update_identity(record);
                debug!(fields = patch.len(), "Session record patched");
                true
            }
            None => {
                debug!("No session record to patch");
                false
            }
        }
    }
}

impl std::fmt::Debug for CacheSyncBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSyncBridge")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
