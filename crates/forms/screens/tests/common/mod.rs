#![allow(dead_code)]

use std::sync::Arc;

use forms_screens::mocks::MockAdminApi;
use forms_screens::{FormsConfig, FormsServices, StaticReferenceData};
use forms_sync::{CacheSyncBridge, MemoryCache, RecordingNotifier, SessionStore};
use forms_types::IdentityRecord;
use serde_json::json;

pub struct Harness {
    pub api: Arc<MockAdminApi>,
    pub cache: Arc<MemoryCache>,
    pub session: Arc<SessionStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub services: FormsServices,
}

/// Services around `api`, with user `me` signed in.
pub fn harness(api: MockAdminApi, config: FormsConfig) -> Harness {
    let api = Arc::new(api);
    let cache = Arc::new(MemoryCache::new());
    let session = Arc::new(SessionStore::signed_in(IdentityRecord::from_value(json!({
        "_id": "me",
        "nom": "Ancien",
        "role": "responsable"
    }))));
    let notifier = Arc::new(RecordingNotifier::new());
    let services = FormsServices {
        config,
        api: api.clone(),
        bridge: Arc::new(CacheSyncBridge::new(cache.clone(), session.clone())),
        notifier: notifier.clone(),
        reference: Arc::new(StaticReferenceData::personnel()),
    };
    Harness {
        api,
        cache,
        session,
        notifier,
        services,
    }
}

pub fn default_harness() -> Harness {
    harness(MockAdminApi::new(), FormsConfig::default())
}
