// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifiers sent as a list; removal needs full key-value pairs.

use kvtags::NativeTag;

use crate::recorder::{Call, FakeError, Recorder, RemovalShape};

/// Native tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl NativeTag for Tag {
    fn from_key_value(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Request of `CreateTags`.
#[derive(Debug, Default)]
pub struct CreateTagsInput {
    /// Resource IDs.
    pub resources: Option<Vec<String>>,
    /// Tags to create or overwrite.
    pub tags: Option<Vec<Tag>>,
}

/// Request of `DeleteTags`.
#[derive(Debug, Default)]
pub struct DeleteTagsInput {
    /// Resource IDs.
    pub resources: Option<Vec<String>>,
    /// Tags to delete.
    pub tags: Option<Vec<Tag>>,
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

    /// `CreateTags` operation.
    pub fn create_tags(&self, input: CreateTagsInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("CreateTags")
                .identifiers(input.resources)
                .added(input.tags.map(|tags| tags.into_iter().map(|t| (t.key, t.value)))),
        )
    }

    /// `DeleteTags` operation.
    pub fn delete_tags(&self, input: DeleteTagsInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("DeleteTags")
                .identifiers(input.resources)
                .removed(
                    input.tags.map(|tags| tags.into_iter().map(|t| t.key)),
                    RemovalShape::KeyValuePairs,
                ),
        )
    }
}
