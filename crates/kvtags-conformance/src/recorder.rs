// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Call recorder shared by the fake service clients.

use std::sync::{Arc, Mutex};

use kvtags::KeyValueTags;
use thiserror::Error;

/// Error returned by a fake client when a failure was injected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FakeError {
    /// The recorder was told to fail this attempt.
    #[error("injected failure on call {attempt} ({operation})")]
    Injected {
        /// 1-based attempt number.
        attempt: usize,
        /// Operation that failed.
        operation: &'static str,
    },
}

/// How a request carried the tags to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalShape {
    /// Native key-value tag elements.
    KeyValuePairs,
    /// Native key-only elements.
    KeyOnly,
    /// Plain key strings.
    Keys,
    /// A service-specific wrapper built by a custom expression.
    Custom,
}

/// One request as seen by a fake client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// API operation name.
    pub operation: &'static str,
    /// Identifier value(s) carried by the request.
    pub identifiers: Vec<String>,
    /// Resource-type discriminator, if sent.
    pub resource_type: Option<String>,
    /// Tags added or overwritten by the request.
    pub added: KeyValueTags,
    /// Keys removed by the request.
    pub removed: Vec<String>,
    /// Shape of the removal payload, if one was sent.
    pub removal_shape: Option<RemovalShape>,
}

impl Call {
    /// A call with no fields set.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            identifiers: Vec::new(),
            resource_type: None,
            added: KeyValueTags::new(),
            removed: Vec::new(),
            removal_shape: None,
        }
    }

    /// Record a scalar identifier field.
    pub fn identifier(mut self, identifier: Option<String>) -> Self {
        self.identifiers.extend(identifier);
        self
    }

    /// Record a sequence identifier field.
    pub fn identifiers(mut self, identifiers: Option<Vec<String>>) -> Self {
        self.identifiers.extend(identifiers.into_iter().flatten());
        self
    }

    /// Record the resource-type field.
    pub fn resource_type(mut self, resource_type: Option<String>) -> Self {
        self.resource_type = resource_type;
        self
    }

    /// Record the tags-to-add payload.
    pub fn added<I, K, V>(mut self, tags: Option<I>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Some(tags) = tags {
            self.added = tags.into_iter().collect();
        }
        self
    }

    /// Record the tags-to-remove payload.
    pub fn removed<I, K>(mut self, keys: Option<I>, shape: RemovalShape) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        if let Some(keys) = keys {
            self.removed = keys.into_iter().map(Into::into).collect();
            self.removal_shape = Some(shape);
        }
        self
    }
}

/// Shared log of the calls issued against fake clients.
///
/// Clones share state, so one recorder can back several clients and still
/// observe the global call order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    inner: Arc<Mutex<RecorderInner>>,
}

#[derive(Debug, Default)]
struct RecorderInner {
    calls: Vec<Call>,
    attempts: usize,
    fail_on_attempt: Option<usize>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `attempt`-th call (1-based) fail.
    pub fn fail_on_call(&self, attempt: usize) {
        self.lock().fail_on_attempt = Some(attempt);
    }

    /// Successful calls in issue order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Number of calls attempted, failed ones included.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    /// Register a call, failing it if a failure was injected for this attempt.
    pub fn record(&self, call: Call) -> Result<(), FakeError> {
        let mut inner = self.lock();
        inner.attempts += 1;
        if inner.fail_on_attempt == Some(inner.attempts) {
            return Err(FakeError::Injected {
                attempt: inner.attempts,
                operation: call.operation,
            });
        }
        inner.calls.push(call);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecorderInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
