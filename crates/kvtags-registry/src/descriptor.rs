// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Validated per-service capability descriptors.
//!
//! A [`ServiceDescriptor`] is only obtainable through
//! [`ServiceSpec`](crate::ServiceSpec) conversion, so every descriptor in a
//! registry already satisfies the shape invariants: one call shape, one
//! identifier encoding, one addition payload and one removal payload.

use std::num::NonZeroUsize;

/// How a service exposes tag mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// One operation both adds and removes tags.
    Combined {
        /// Operation name (PascalCase, e.g. `ChangeTagsForResource`).
        operation: String,
    },
    /// Separate add and remove operations, optionally batched.
    Split {
        /// Operation adding or overwriting tags.
        tag_operation: String,
        /// Operation removing tags.
        untag_operation: String,
        /// Maximum tags per call; larger sets are chunked.
        batch_size: Option<NonZeroUsize>,
    },
}

/// How the resource identifier is carried in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierShape {
    /// A single string value.
    Scalar,
    /// A single-element sequence of strings.
    Sequence,
}

/// Request field carrying the resource identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Field name (PascalCase).
    pub field: String,
    /// Encoding of the identifier value.
    pub shape: IdentifierShape,
}

/// Payload shape for tags being added or overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPayload {
    /// The tag set converted into the service-native collection.
    Native,
    /// A literal Rust expression producing the field value.
    Custom(String),
}

/// Payload shape for tags being removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalPayload {
    /// A literal Rust expression producing the field value.
    Custom(String),
    /// Full key-value pairs in the service-native tag type.
    KeyValuePairs,
    /// Keys wrapped in the service-native key-only type.
    KeyOnly,
    /// A plain list of key strings.
    Keys,
}

/// Everything the synthesizer needs to render one service's update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub(crate) service_id: String,
    pub(crate) client_type: String,
    pub(crate) tag_package: String,
    pub(crate) calls: CallShape,
    pub(crate) identifier: Identifier,
    pub(crate) resource_type_field: Option<String>,
    pub(crate) tags_field: String,
    pub(crate) tag_payload: TagPayload,
    pub(crate) untag_tags_field: String,
    pub(crate) removal_payload: RemovalPayload,
}

impl ServiceDescriptor {
    /// Unique service identifier (e.g. `acm`).
    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Name of the generated function, `<service>_update_tags`.
    pub fn function_name(&self) -> String {
        format!("{}_update_tags", self.service_id)
    }

    /// Rust type of the client capability, taken by reference.
    pub fn client_type(&self) -> &str {
        &self.client_type
    }

    /// Path qualifying the request types.
    pub fn tag_package(&self) -> &str {
        &self.tag_package
    }

    /// Call shape of the service.
    pub fn calls(&self) -> &CallShape {
        &self.calls
    }

    /// Whether one operation carries both additions and removals.
    pub fn is_combined(&self) -> bool {
        matches!(self.calls, CallShape::Combined { .. })
    }

    /// Operation adding tags.
    pub fn tag_operation(&self) -> &str {
        match &self.calls {
            CallShape::Combined { operation } => operation,
            CallShape::Split { tag_operation, .. } => tag_operation,
        }
    }

    /// Operation removing tags. Equal to [`Self::tag_operation`] for combined calls.
    pub fn untag_operation(&self) -> &str {
        match &self.calls {
            CallShape::Combined { operation } => operation,
            CallShape::Split {
                untag_operation, ..
            } => untag_operation,
        }
    }

    /// Batch size for split-call services.
    pub fn batch_size(&self) -> Option<NonZeroUsize> {
        match self.calls {
            CallShape::Combined { .. } => None,
            CallShape::Split { batch_size, .. } => batch_size,
        }
    }

    /// Identifier field and encoding.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Request field carrying the identifier.
    pub fn identifier_field(&self) -> &str {
        &self.identifier.field
    }

    /// Whether the identifier is wrapped in a single-element sequence.
    pub fn identifier_requires_sequence(&self) -> bool {
        self.identifier.shape == IdentifierShape::Sequence
    }

    /// Resource-type discriminator field, when the service needs one.
    pub fn resource_type_field(&self) -> Option<&str> {
        self.resource_type_field.as_deref()
    }

    /// Request field carrying tags to add.
    pub fn tags_field(&self) -> &str {
        &self.tags_field
    }

    /// Shape of the tags-to-add payload.
    pub fn tag_payload(&self) -> &TagPayload {
        &self.tag_payload
    }

    /// Request field carrying tags to remove.
    pub fn untag_tags_field(&self) -> &str {
        &self.untag_tags_field
    }

    /// Shape of the tags-to-remove payload.
    pub fn removal_payload(&self) -> &RemovalPayload {
        &self.removal_payload
    }
}
