// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Tag payloads wrapped in service-specific containers.

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

/// Container of tags.
#[derive(Debug, Default)]
pub struct Tags {
    /// Tags.
    pub items: Option<Vec<Tag>>,
}

/// Container of tag keys.
#[derive(Debug, Default)]
pub struct TagKeys {
    /// Keys.
    pub items: Option<Vec<String>>,
}

/// Request of `TagResource`.
#[derive(Debug, Default)]
pub struct TagResourceInput {
    /// Distribution ARN.
    pub resource: Option<String>,
    /// Tags to create or overwrite.
    pub tags: Option<Tags>,
}

/// Request of `UntagResource`.
#[derive(Debug, Default)]
pub struct UntagResourceInput {
    /// Distribution ARN.
    pub resource: Option<String>,
    /// Keys to delete.
    pub tag_keys: Option<TagKeys>,
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

    /// `TagResource` operation.
    pub fn tag_resource(&self, input: TagResourceInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("TagResource").identifier(input.resource).added(
                input
                    .tags
                    .and_then(|tags| tags.items)
                    .map(|items| items.into_iter().map(|t| (t.key, t.value))),
            ),
        )
    }

    /// `UntagResource` operation.
    pub fn untag_resource(&self, input: UntagResourceInput) -> Result<(), FakeError> {
        self.recorder.record(
            Call::new("UntagResource").identifier(input.resource).removed(
                input.tag_keys.and_then(|keys| keys.items),
                RemovalShape::Custom,
            ),
        )
    }
}
