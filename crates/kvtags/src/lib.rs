// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Runtime support for generated tag-update functions.
//!
//! Generated `<service>_update_tags` functions compute the tags to remove and
//! the tags to create or overwrite with [`KeyValueTags::removed`] and
//! [`KeyValueTags::updated`], convert them into the service's native request
//! shape, and report client failures as [`UpdateTagsError`].
#![forbid(unsafe_code)]

pub mod error;
pub mod tags;

pub use error::{BoxError, UpdateTagsError};
pub use tags::{
    FromKeyValueTags, FromTagKeys, Iter, KeyValueTags, NativeTag, NativeTagKey,
    AWS_TAG_KEY_PREFIX,
};
