use forms_types::{IdentityRecord, QueryKey, SubmissionResult};

/// Read cache of the embedding UI.
pub trait CacheStore: Send + Sync {
    /// Mark `key` stale so the next read refetches it.
    fn invalidate(&self, key: &QueryKey);
}

/// Process-wide record of the signed-in user.
pub trait IdentityStore: Send + Sync {
    fn current_identity(&self) -> Option<IdentityRecord>;

    fn update_identity(&self, record: IdentityRecord);
}

/// Where the single terminal outcome of each attempt is shown.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, result: &SubmissionResult);
}
