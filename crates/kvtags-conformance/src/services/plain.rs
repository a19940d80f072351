// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Separate tag and untag operations with the default field names.

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

/// Request of `TagResource`.
#[derive(Debug, Default)]
pub struct TagResourceInput {
    /// Resource ARN.
    pub resource_arn: Option<String>,
    /// Tags to create or overwrite.
    pub tags: Option<Vec<Tag>>,
}

/// Request of `UntagResource`.
#[derive(Debug, Default)]
pub struct UntagResourceInput {
    /// Resource ARN.
    pub resource_arn: Option<String>,
    /// Keys to delete.
    pub tag_keys: Option<Vec<String>>,
}

pub(crate) fn tag_call(input: TagResourceInput) -> Call {
    Call::new("TagResource")
        .identifier(input.resource_arn)
        .added(input.tags.map(|tags| tags.into_iter().map(|t| (t.key, t.value))))
}

pub(crate) fn untag_call(input: UntagResourceInput) -> Call {
    Call::new("UntagResource")
        .identifier(input.resource_arn)
        .removed(input.tag_keys, RemovalShape::Keys)
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
        self.recorder.record(tag_call(input))
    }

    /// `UntagResource` operation.
    pub fn untag_resource(&self, input: UntagResourceInput) -> Result<(), FakeError> {
        self.recorder.record(untag_call(input))
    }
}
