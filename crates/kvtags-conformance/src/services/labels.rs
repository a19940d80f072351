// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One operation both adds and removes labels, qualified by resource type.

use kvtags::NativeTag;

use crate::recorder::{Call, FakeError, Recorder, RemovalShape};

/// Native label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label key.
    pub key: String,
    /// Label value.
    pub value: String,
}

impl NativeTag for Label {
    fn from_key_value(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Request of `SetLabels`.
#[derive(Debug, Default)]
pub struct SetLabelsInput {
    /// Resource identifier.
    pub resource_id: Option<String>,
    /// Resource kind.
    pub resource_type: Option<String>,
    /// Labels to create or overwrite.
    pub add_tags: Option<Vec<Label>>,
    /// Label keys to delete.
    pub remove_tag_keys: Option<Vec<String>>,
}

/// Response of `SetLabels`.
#[derive(Debug, Default)]
pub struct SetLabelsOutput {
    /// Change identifier assigned by the service.
    pub change_id: String,
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

    /// `SetLabels` operation.
    pub fn set_labels(&self, input: SetLabelsInput) -> Result<SetLabelsOutput, FakeError> {
        self.recorder.record(
            Call::new("SetLabels")
                .identifier(input.resource_id)
                .resource_type(input.resource_type)
                .added(
                    input
                        .add_tags
                        .map(|tags| tags.into_iter().map(|t| (t.key, t.value))),
                )
                .removed(input.remove_tag_keys, RemovalShape::Keys),
        )?;
        Ok(SetLabelsOutput {
            change_id: "change-1".to_owned(),
        })
    }
}
