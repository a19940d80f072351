// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Split operations limited to two tags per request, tags sent as a map.

use std::collections::HashMap;

use crate::recorder::{Call, FakeError, Recorder, RemovalShape};

/// Largest tag count one request accepts.
pub const MAX_TAGS_PER_CALL: usize = 2;

/// Request of `AddTagsToStream`.
#[derive(Debug, Default)]
pub struct AddTagsToStreamInput {
    /// Stream name.
    pub stream_name: Option<String>,
    /// Tags to create or overwrite.
    pub tags: Option<HashMap<String, String>>,
}

/// Request of `RemoveTagsFromStream`.
#[derive(Debug, Default)]
pub struct RemoveTagsFromStreamInput {
    /// Stream name.
    pub stream_name: Option<String>,
    /// Keys to delete.
    pub tag_keys: Option<Vec<String>>,
}

/// Request carried more tags than the service accepts.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {count} tags exceeds the limit of {MAX_TAGS_PER_CALL}")]
pub struct TooManyTags {
    operation: &'static str,
    count: usize,
}

/// Errors of the stream service.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Request over the per-call limit.
    #[error(transparent)]
    TooManyTags(#[from] TooManyTags),
    /// Injected failure.
    #[error(transparent)]
    Fake(#[from] FakeError),
}

/// Fake client.
#[derive(Debug, Clone, Default)]
pub struct Client {
    recorder: Recorder,
}

impl Client {
    /// Client reporting to `recorder`.
    pub fn new(recorder: &Recorder) -> Self {
        Self {
            recorder: recorder.clone(),
        }
    }

    fn send(&self, call: Call) -> Result<(), StreamError> {
        let count = call.added.len() + call.removed.len();
        if count > MAX_TAGS_PER_CALL {
            return Err(TooManyTags {
                operation: call.operation,
                count,
            }
            .into());
        }
        Ok(self.recorder.record(call)?)
    }

    /// `AddTagsToStream` operation.
    pub fn add_tags_to_stream(&self, input: AddTagsToStreamInput) -> Result<(), StreamError> {
        self.send(
            Call::new("AddTagsToStream")
                .identifier(input.stream_name)
                .added(input.tags),
        )
    }

    /// `RemoveTagsFromStream` operation.
    pub fn remove_tags_from_stream(
        &self,
        input: RemoveTagsFromStreamInput,
    ) -> Result<(), StreamError> {
        self.send(
            Call::new("RemoveTagsFromStream")
                .identifier(input.stream_name)
                .removed(input.tag_keys, RemovalShape::Keys),
        )
    }
}
