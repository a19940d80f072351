// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A regional variant that reuses the request types of [`plain`](super::plain).

use super::plain::{self, TagResourceInput, UntagResourceInput};
use crate::recorder::{FakeError, Recorder};

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
        self.recorder.record(plain::tag_call(input))
    }

    /// `UntagResource` operation.
    pub fn untag_resource(&self, input: UntagResourceInput) -> Result<(), FakeError> {
        self.recorder.record(plain::untag_call(input))
    }
}
