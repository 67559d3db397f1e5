//! Administration API boundary and the phase calls built on it.

use std::sync::Arc;

use async_trait::async_trait;
use forms_fields::FieldState;
use forms_submission::{call_fn, PhaseOutput, RemoteCall};
use forms_types::RemoteError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record collections exposed by the administration API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Users,
    Equipment,
    Instruments,
    Tests,
    NonConformities,
}

impl Resource {
    /// Path segment of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Equipment => "equipements",
            Resource::Instruments => "instruments",
            Resource::Tests => "tests",
            Resource::NonConformities => "non-conformites",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote side of every screen. Implementations own transport, auth and
/// timeouts; any failure comes back as a [`RemoteError`].
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn create_record(&self, resource: Resource, payload: Value) -> Result<Value, RemoteError>;

    async fn update_record(
        &self,
        resource: Resource,
        id: &str,
        payload: Value,
    ) -> Result<Value, RemoteError>;

    async fn change_credential(&self, id: &str, current: &str, new: &str) -> Result<(), RemoteError>;
}

/// Create the record when `id` is `None`, update it otherwise. The phase
/// input is sent as a flat JSON object.
pub fn save_record(api: Arc<dyn AdminApi>, resource: Resource, id: Option<String>) -> Arc<dyn RemoteCall> {
    call_fn(move |input: FieldState| {
        let api = api.clone();
        let id = id.clone();
        async move {
            let payload = input.to_json();
            let response = match id {
                Some(id) => api.update_record(resource, &id, payload).await?,
                None => api.create_record(resource, payload).await?,
            };
            Ok::<_, RemoteError>(PhaseOutput::empty().with_payload(response))
        }
    })
}

/// Change the credential of user `id` from `current_password` to
/// `new_password`. On success the three password fields are cleared.
pub fn change_credential(api: Arc<dyn AdminApi>, id: String) -> Arc<dyn RemoteCall> {
    call_fn(move |input: FieldState| {
        let api = api.clone();
        let id = id.clone();
        async move {
            api.change_credential(
                &id,
                &input.text("current_password"),
                &input.text("new_password"),
            )
            .await?;
            Ok::<_, RemoteError>(
                PhaseOutput::empty()
                    .with_update("current_password", "")
                    .with_update("new_password", "")
                    .with_update("confirm_password", ""),
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{ApiCall, MockAdminApi};
    use serde_json::json;

    #[tokio::test]
    async fn save_without_id_creates() {
        let api = Arc::new(MockAdminApi::new());
        let call = save_record(api.clone(), Resource::Equipment, None);

        let output = call
            .call(&FieldState::from_pairs([("code", "EQ-1")]))
            .await
            .unwrap();

        assert_eq!(
            api.calls(),
            vec![ApiCall::Create {
                resource: Resource::Equipment,
                payload: json!({ "code": "EQ-1" })
            }]
        );
        assert_eq!(output.payload.unwrap()["_id"], "rec-1");
    }

    #[tokio::test]
    async fn credential_change_clears_password_fields() {
        let api = Arc::new(MockAdminApi::new());
        let call = change_credential(api.clone(), "u1".into());
        let input = FieldState::from_pairs([("current_password", "old"), ("new_password", "new")]);

        let output = call.call(&input).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![ApiCall::ChangeCredential {
                id: "u1".into(),
                current: "old".into(),
                new: "new".into()
            }]
        );
        assert_eq!(output.updates.len(), 3);
    }
}
