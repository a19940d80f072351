// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fake service APIs, one module per request-shape family.
//!
//! Each module mirrors what an SDK exposes: request types with optional
//! fields and a `Default` impl, native tag types, and a `Client` whose
//! methods are named after the snake-cased operations. Clients report every
//! request to a shared [`Recorder`](crate::Recorder).

pub mod balancers;
pub mod distributions;
pub mod firewall;
pub mod instances;
pub mod labels;
pub mod plain;
pub mod streams;
