// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generated tag-update functions compiled against recording service fakes.
//!
//! The build script runs the generator over [`table::specs`] and the result
//! is included as [`generated`]. Each fake client in [`services`] logs the
//! requests it receives into a shared [`Recorder`], so tests can check what a
//! generated function actually sends.
#![forbid(unsafe_code)]

pub mod recorder;
pub mod services;
pub mod table;

pub use recorder::{Call, FakeError, Recorder, RemovalShape};

/// Output of the generator for [`table::specs`].
#[allow(clippy::needless_update)]
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/update_tags_gen.rs"));
}

/// Source text of [`generated`].
pub const GENERATED_SOURCE: &str = include_str!(concat!(env!("OUT_DIR"), "/update_tags_gen.rs"));
