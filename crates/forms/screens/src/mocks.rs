//! Scripted [`AdminApi`] for tests and demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use forms_types::RemoteError;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

use crate::{AdminApi, Resource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Create,
    Update,
    ChangeCredential,
}

/// One recorded invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiCall {
    Create {
        resource: Resource,
        payload: Value,
    },
    Update {
        resource: Resource,
        id: String,
        payload: Value,
    },
    ChangeCredential {
        id: String,
        current: String,
        new: String,
    },
}

impl ApiCall {
    pub fn method(&self) -> ApiMethod {
        match self {
            ApiCall::Create { .. } => ApiMethod::Create,
            ApiCall::Update { .. } => ApiMethod::Update,
            ApiCall::ChangeCredential { .. } => ApiMethod::ChangeCredential,
        }
    }
}

/// In-memory API that records every call.
///
/// Succeeds unless a failure was scripted for the method. Created records
/// get ids `rec-1`, `rec-2`, and so on.
#[derive(Default)]
pub struct MockAdminApi {
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<ApiMethod, RemoteError>>,
    release: Option<Arc<Notify>>,
    next_id: AtomicUsize,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call waits for `release` before answering.
    pub fn blocked_until(release: Arc<Notify>) -> Self {
        Self {
            release: Some(release),
            ..Self::default()
        }
    }

    pub fn failing(self, method: ApiMethod, error: RemoteError) -> Self {
        self.failures.lock().insert(method, error);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn count(&self, method: ApiMethod) -> usize {
        self.calls.lock().iter().filter(|c| c.method() == method).count()
    }

    async fn record(&self, call: ApiCall) -> Result<(), RemoteError> {
        let method = call.method();
        self.calls.lock().push(call);
        if let Some(release) = &self.release {
            release.notified().await;
        }
        match self.failures.lock().get(&method) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn with_id(mut payload: Value, id: &str) -> Value {
    if let Value::Object(map) = &mut payload {
        map.insert("_id".to_string(), Value::String(id.to_string()));
    }
    payload
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn create_record(&self, resource: Resource, payload: Value) -> Result<Value, RemoteError> {
        self.record(ApiCall::Create {
            resource,
            payload: payload.clone(),
        })
        .await?;
        let id = format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        Ok(with_id(payload, &id))
    }

    async fn update_record(
        &self,
        resource: Resource,
        id: &str,
        payload: Value,
    ) -> Result<Value, RemoteError> {
        self.record(ApiCall::Update {
            resource,
            id: id.to_string(),
            payload: payload.clone(),
        })
        .await?;
        Ok(with_id(payload, id))
    }

    async fn change_credential(&self, id: &str, current: &str, new: &str) -> Result<(), RemoteError> {
        self.record(ApiCall::ChangeCredential {
            id: id.to_string(),
            current: current.to_string(),
            new: new.to_string(),
        })
        .await
    }
}
