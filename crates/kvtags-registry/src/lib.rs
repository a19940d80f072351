// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Service metadata registry for tag-update code generation.
//!
//! Every service exposes tag mutation through its own API shape: one combined
//! call or separate add/remove calls, different field names, batch limits,
//! key-only or key-value removal, resource-type qualifiers and sequence-wrapped
//! identifiers. A [`ServiceDescriptor`] captures that shape; a [`Registry`]
//! maps service identifiers to descriptors and is handed to the synthesizer
//! explicitly (the built-in AWS table, or one loaded from JSON).
#![forbid(unsafe_code)]

pub mod builtin;
pub mod descriptor;
pub mod registry;
pub mod spec;

pub use builtin::UPDATE_TAGS_SERVICES;
pub use descriptor::{
    CallShape, Identifier, IdentifierShape, RemovalPayload, ServiceDescriptor, TagPayload,
};
pub use registry::{Registry, RegistryError};
pub use spec::{ServiceSpec, SpecError};
