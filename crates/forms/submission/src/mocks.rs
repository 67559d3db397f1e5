use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use forms_fields::FieldState;
use forms_types::RemoteError;
use tokio::sync::Notify;

use crate::{PhaseOutput, RemoteCall};

/// Scripted remote call for tests.
///
/// Counts invocations and remembers the last input so tests can assert that
/// a call was (or was not) made and what it received.
pub struct MockCall {
    response: Result<PhaseOutput, RemoteError>,
    release: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_input: Mutex<Option<FieldState>>,
}

impl MockCall {
    pub fn succeed() -> Self {
        Self::respond(Ok(PhaseOutput::empty()))
    }

    pub fn succeed_with(output: PhaseOutput) -> Self {
        Self::respond(Ok(output))
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::respond(Err(RemoteError::new(message)))
    }

    /// Fails without a server message.
    pub fn fail_silently() -> Self {
        Self::respond(Err(RemoteError::silent()))
    }

    /// Succeeds only after `release` is notified.
    pub fn blocked_until(release: Arc<Notify>) -> Self {
        let mut mock = Self::succeed();
        mock.release = Some(release);
        mock
    }

    fn respond(response: Result<PhaseOutput, RemoteError>) -> Self {
        Self {
            response,
            release: None,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<FieldState> {
        self.last_input.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl RemoteCall for MockCall {
    async fn call(&self, input: &FieldState) -> Result<PhaseOutput, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_input.lock() {
            *last = Some(input.clone());
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_counts_and_records() {
        let mock = MockCall::fail("refusé");
        let input = FieldState::from_pairs([("nom", "A")]);

        let result = mock.call(&input).await;

        assert_eq!(result, Err(RemoteError::new("refusé")));
        assert_eq!(mock.calls(), 1);
        assert_eq!(mock.last_input(), Some(input));
    }
}
