// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifiers sent as a list; removal takes key-only elements.

use kvtags::{NativeTag, NativeTagKey};

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

/// Native key-only tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagKeyOnly {
    /// Tag key.
    pub key: String,
}

impl NativeTagKey for TagKeyOnly {
    fn from_key(key: &str) -> Self {
        Self {
            key: key.to_owned(),
        }
    }
}

/// Request of `AddTags`.
#[derive(Debug, Default)]
pub struct AddTagsInput {
    /// Load balancer names.
    pub load_balancer_names: Option<Vec<String>>,
    /// Tags to create or overwrite.
    pub tags: Option<Vec<Tag>>,
}

/// Request of `RemoveTags`.
#[derive(Debug, Default)]
pub struct RemoveTagsInput {
    /// Load balancer names.
    pub load_balancer_names: Option<Vec<String>>,
    /// Keys to delete.
    pub tags: Option<Vec<TagKeyOnly>>,
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

    /// `AddTags` operation.
    pub fn add_tags(&self, input: AddTagsInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("AddTags")
                .identifiers(input.load_balancer_names)
                .added(input.tags.map(|tags| tags.into_iter().map(|t| (t.key, t.value)))),
        )
    }

    /// `RemoveTags` operation.
    pub fn remove_tags(&self, input: RemoveTagsInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("RemoveTags")
                .identifiers(input.load_balancer_names)
                .removed(
                    input.tags.map(|tags| tags.into_iter().map(|t| t.key)),
                    RemovalShape::KeyOnly,
                ),
        )
    }
}
