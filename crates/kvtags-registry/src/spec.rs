// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat authoring form of a service descriptor.
//!
//! Registry tables are written as [`ServiceSpec`] records: one column per
//! customization, each with the default most services share. Conversion into
//! a [`ServiceDescriptor`] checks that the columns describe exactly one shape.

use std::num::NonZeroUsize;

use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::descriptor::{
    CallShape, Identifier, IdentifierShape, RemovalPayload, ServiceDescriptor, TagPayload,
};

/// Default operation adding tags.
pub const DEFAULT_TAG_OPERATION: &str = "TagResource";
/// Default operation removing tags.
pub const DEFAULT_UNTAG_OPERATION: &str = "UntagResource";
/// Default identifier field.
pub const DEFAULT_IDENTIFIER_FIELD: &str = "ResourceArn";
/// Default field carrying tags to add.
pub const DEFAULT_TAGS_FIELD: &str = "Tags";
/// Default field carrying tags to remove.
pub const DEFAULT_UNTAG_TAGS_FIELD: &str = "TagKeys";

/// An authoring entry that does not describe a valid descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// Service identifiers must be lowercase snake case.
    #[error("invalid service identifier {0:?}: expected lowercase ASCII letters, digits or '_'")]
    InvalidServiceId(String),
    /// An operation or field name is empty or not an identifier.
    #[error("{service}: invalid {what} {name:?}")]
    InvalidName {
        /// Service being converted.
        service: String,
        /// Which column holds the name.
        what: &'static str,
        /// The rejected name.
        name: String,
    },
    /// More than one removal payload shape was selected.
    #[error("{service}: conflicting removal payload shapes ({shapes})")]
    ConflictingRemovalShapes {
        /// Service being converted.
        service: String,
        /// The selected shapes, comma separated.
        shapes: String,
    },
    /// A batch size only makes sense for split-call services.
    #[error("{service}: batch size set on combined-call operation {operation}")]
    BatchSizeOnCombinedCall {
        /// Service being converted.
        service: String,
        /// The shared operation name.
        operation: String,
    },
    /// Batch sizes must be at least one.
    #[error("{service}: batch size must be at least 1")]
    ZeroBatchSize {
        /// Service being converted.
        service: String,
    },
    /// A custom expression or type is blank.
    #[error("{service}: empty {what}")]
    EmptyOverride {
        /// Service being converted.
        service: String,
        /// Which column is blank.
        what: &'static str,
    },
    /// Two columns would set the same field of one request.
    #[error("{service}: {first} and {second} both map to request field {field:?}")]
    FieldCollision {
        /// Service being converted.
        service: String,
        /// First column.
        first: &'static str,
        /// Second column.
        second: &'static str,
        /// Snake-cased field name both columns produce.
        field: String,
    },
}

/// One row of a registry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSpec {
    /// Unique service identifier.
    pub service: String,
    /// Client capability type; defaults to `<service>::Client`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_type: Option<String>,
    /// Request type path; defaults to the service identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_package: Option<String>,
    /// Operation adding tags.
    #[serde(default = "default_tag_operation")]
    pub tag_operation: String,
    /// Operation removing tags. Equal to `tag_operation` for combined calls.
    #[serde(default = "default_untag_operation")]
    pub untag_operation: String,
    /// Maximum tags per call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    /// Request field carrying the identifier.
    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,
    /// Whether the identifier goes into a single-element sequence.
    #[serde(default, skip_serializing_if = "is_false")]
    pub identifier_requires_sequence: bool,
    /// Resource-type discriminator field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type_field: Option<String>,
    /// Request field carrying tags to add.
    #[serde(default = "default_tags_field")]
    pub tags_field: String,
    /// Literal expression replacing the native conversion of added tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_input_custom: Option<String>,
    /// Request field carrying tags to remove.
    #[serde(default = "default_untag_tags_field")]
    pub untag_tags_field: String,
    /// Removal sends full key-value pairs.
    #[serde(default, skip_serializing_if = "is_false")]
    pub untag_requires_tag_type: bool,
    /// Removal sends keys in a key-only native type.
    #[serde(default, skip_serializing_if = "is_false")]
    pub untag_requires_tag_key_type: bool,
    /// Literal expression replacing the removal payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untag_input_custom: Option<String>,
}

fn default_tag_operation() -> String {
    DEFAULT_TAG_OPERATION.to_owned()
}

fn default_untag_operation() -> String {
    DEFAULT_UNTAG_OPERATION.to_owned()
}

fn default_identifier_field() -> String {
    DEFAULT_IDENTIFIER_FIELD.to_owned()
}

fn default_tags_field() -> String {
    DEFAULT_TAGS_FIELD.to_owned()
}

fn default_untag_tags_field() -> String {
    DEFAULT_UNTAG_TAGS_FIELD.to_owned()
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl ServiceSpec {
    /// A row with every column at its default.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            client_type: None,
            tag_package: None,
            tag_operation: default_tag_operation(),
            untag_operation: default_untag_operation(),
            batch_size: None,
            identifier_field: default_identifier_field(),
            identifier_requires_sequence: false,
            resource_type_field: None,
            tags_field: default_tags_field(),
            tag_input_custom: None,
            untag_tags_field: default_untag_tags_field(),
            untag_requires_tag_type: false,
            untag_requires_tag_key_type: false,
            untag_input_custom: None,
        }
    }

    /// Override the client capability type.
    pub fn client_type(mut self, ty: impl Into<String>) -> Self {
        self.client_type = Some(ty.into());
        self
    }

    /// Take request types from another package.
    pub fn tag_package(mut self, package: impl Into<String>) -> Self {
        self.tag_package = Some(package.into());
        self
    }

    /// Separate add and remove operations.
    pub fn operations(mut self, tag: impl Into<String>, untag: impl Into<String>) -> Self {
        self.tag_operation = tag.into();
        self.untag_operation = untag.into();
        self
    }

    /// One operation carrying both additions and removals.
    pub fn combined(mut self, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        self.untag_operation.clone_from(&operation);
        self.tag_operation = operation;
        self
    }

    /// Chunk payloads into calls of at most `size` tags.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Scalar identifier field.
    pub fn identifier(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = field.into();
        self.identifier_requires_sequence = false;
        self
    }

    /// Identifier field wrapped in a single-element sequence.
    pub fn identifier_sequence(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = field.into();
        self.identifier_requires_sequence = true;
        self
    }

    /// Qualify requests with a resource-type field.
    pub fn resource_type_field(mut self, field: impl Into<String>) -> Self {
        self.resource_type_field = Some(field.into());
        self
    }

    /// Field carrying tags to add.
    pub fn tags_field(mut self, field: impl Into<String>) -> Self {
        self.tags_field = field.into();
        self
    }

    /// Literal expression for the tags-to-add payload.
    pub fn tag_input_custom(mut self, expr: impl Into<String>) -> Self {
        self.tag_input_custom = Some(expr.into());
        self
    }

    /// Field carrying tags to remove.
    pub fn untag_tags_field(mut self, field: impl Into<String>) -> Self {
        self.untag_tags_field = field.into();
        self
    }

    /// Removal sends full key-value pairs.
    pub fn untag_tag_type(mut self) -> Self {
        self.untag_requires_tag_type = true;
        self
    }

    /// Removal sends keys in a key-only native type.
    pub fn untag_tag_key_type(mut self) -> Self {
        self.untag_requires_tag_key_type = true;
        self
    }

    /// Literal expression for the tags-to-remove payload.
    pub fn untag_input_custom(mut self, expr: impl Into<String>) -> Self {
        self.untag_input_custom = Some(expr.into());
        self
    }

    fn check_name(&self, what: &'static str, name: &str) -> Result<String, SpecError> {
        let mut chars = name.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(name.to_owned())
        } else {
            Err(SpecError::InvalidName {
                service: self.service.clone(),
                what,
                name: name.to_owned(),
            })
        }
    }

    fn check_override(&self, what: &'static str, value: &str) -> Result<String, SpecError> {
        if value.trim().is_empty() {
            Err(SpecError::EmptyOverride {
                service: self.service.clone(),
                what,
            })
        } else {
            Ok(value.to_owned())
        }
    }

    fn calls(&self) -> Result<CallShape, SpecError> {
        let tag_operation = self.check_name("tag operation", &self.tag_operation)?;
        let untag_operation = self.check_name("untag operation", &self.untag_operation)?;

        if tag_operation == untag_operation {
            if self.batch_size.is_some() {
                return Err(SpecError::BatchSizeOnCombinedCall {
                    service: self.service.clone(),
                    operation: tag_operation,
                });
            }
            return Ok(CallShape::Combined {
                operation: tag_operation,
            });
        }

        let batch_size = match self.batch_size {
            None => None,
            Some(size) => Some(NonZeroUsize::new(size).ok_or_else(|| SpecError::ZeroBatchSize {
                service: self.service.clone(),
            })?),
        };

        Ok(CallShape::Split {
            tag_operation,
            untag_operation,
            batch_size,
        })
    }

    /// Every request sets the locator fields plus its payload field; a
    /// combined request carries both payload fields.
    fn check_field_collisions(&self, combined: bool) -> Result<(), SpecError> {
        let mut locator = vec![("identifier field", self.identifier_field.as_str())];
        if let Some(field) = &self.resource_type_field {
            locator.push(("resource type field", field.as_str()));
        }
        let tag_payload = [("tags field", self.tags_field.as_str())];
        let untag_payload = [("untag tags field", self.untag_tags_field.as_str())];

        let requests: Vec<Vec<(&'static str, &str)>> = if combined {
            vec![locator
                .iter()
                .chain(&tag_payload)
                .chain(&untag_payload)
                .copied()
                .collect()]
        } else {
            vec![
                locator.iter().chain(&tag_payload).copied().collect(),
                locator.iter().chain(&untag_payload).copied().collect(),
            ]
        };

        for fields in &requests {
            for (i, &(first, a)) in fields.iter().enumerate() {
                let field = a.to_snake_case();
                if let Some(&(second, _)) =
                    fields[i + 1..].iter().find(|(_, b)| b.to_snake_case() == field)
                {
                    return Err(SpecError::FieldCollision {
                        service: self.service.clone(),
                        first,
                        second,
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    fn removal_payload(&self) -> Result<RemovalPayload, SpecError> {
        let mut selected = Vec::new();
        if self.untag_input_custom.is_some() {
            selected.push("custom expression");
        }
        if self.untag_requires_tag_type {
            selected.push("key-value pairs");
        }
        if self.untag_requires_tag_key_type {
            selected.push("key-only type");
        }
        if selected.len() > 1 {
            return Err(SpecError::ConflictingRemovalShapes {
                service: self.service.clone(),
                shapes: selected.join(", "),
            });
        }

        if let Some(expr) = &self.untag_input_custom {
            return Ok(RemovalPayload::Custom(
                self.check_override("untag input expression", expr)?,
            ));
        }
        if self.untag_requires_tag_type {
            return Ok(RemovalPayload::KeyValuePairs);
        }
        if self.untag_requires_tag_key_type {
            return Ok(RemovalPayload::KeyOnly);
        }
        Ok(RemovalPayload::Keys)
    }
}

impl TryFrom<ServiceSpec> for ServiceDescriptor {
    type Error = SpecError;

    fn try_from(spec: ServiceSpec) -> Result<Self, Self::Error> {
        let id_ok = spec
            .service
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && spec
                .service
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !id_ok {
            return Err(SpecError::InvalidServiceId(spec.service));
        }

        let tag_package = match &spec.tag_package {
            Some(package) => spec.check_override("tag package", package)?,
            None => spec.service.clone(),
        };
        let client_type = match &spec.client_type {
            Some(ty) => spec.check_override("client type", ty)?,
            None => format!("{}::Client", spec.service),
        };
        let calls = spec.calls()?;
        let identifier = Identifier {
            field: spec.check_name("identifier field", &spec.identifier_field)?,
            shape: if spec.identifier_requires_sequence {
                IdentifierShape::Sequence
            } else {
                IdentifierShape::Scalar
            },
        };
        let resource_type_field = spec
            .resource_type_field
            .as_deref()
            .map(|field| spec.check_name("resource type field", field))
            .transpose()?;
        let tags_field = spec.check_name("tags field", &spec.tags_field)?;
        let tag_payload = match &spec.tag_input_custom {
            Some(expr) => TagPayload::Custom(spec.check_override("tag input expression", expr)?),
            None => TagPayload::Native,
        };
        let untag_tags_field = spec.check_name("untag tags field", &spec.untag_tags_field)?;
        let removal_payload = spec.removal_payload()?;
        spec.check_field_collisions(matches!(calls, CallShape::Combined { .. }))?;

        Ok(Self {
            service_id: spec.service,
            client_type,
            tag_package,
            calls,
            identifier,
            resource_type_field,
            tags_field,
            tag_payload,
            untag_tags_field,
            removal_payload,
        })
    }
}

impl From<&ServiceDescriptor> for ServiceSpec {
    fn from(descriptor: &ServiceDescriptor) -> Self {
        let mut spec = Self::new(descriptor.service_id());
        if descriptor.client_type() != format!("{}::Client", descriptor.service_id()) {
            spec.client_type = Some(descriptor.client_type().to_owned());
        }
        if descriptor.tag_package() != descriptor.service_id() {
            spec.tag_package = Some(descriptor.tag_package().to_owned());
        }
        spec.tag_operation = descriptor.tag_operation().to_owned();
        spec.untag_operation = descriptor.untag_operation().to_owned();
        spec.batch_size = descriptor.batch_size().map(NonZeroUsize::get);
        spec.identifier_field = descriptor.identifier_field().to_owned();
        spec.identifier_requires_sequence = descriptor.identifier_requires_sequence();
        spec.resource_type_field = descriptor.resource_type_field().map(str::to_owned);
        spec.tags_field = descriptor.tags_field().to_owned();
        if let TagPayload::Custom(expr) = descriptor.tag_payload() {
            spec.tag_input_custom = Some(expr.clone());
        }
        spec.untag_tags_field = descriptor.untag_tags_field().to_owned();
        match descriptor.removal_payload() {
            RemovalPayload::Custom(expr) => spec.untag_input_custom = Some(expr.clone()),
            RemovalPayload::KeyValuePairs => spec.untag_requires_tag_type = true,
            RemovalPayload::KeyOnly => spec.untag_requires_tag_key_type = true,
            RemovalPayload::Keys => {}
        }
        spec
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn convert(spec: ServiceSpec) -> Result<ServiceDescriptor, SpecError> {
        ServiceDescriptor::try_from(spec)
    }

    #[test]
    fn defaults_describe_split_unbatched_key_list() {
        let d = convert(ServiceSpec::new("amplify")).unwrap();
        assert_eq!(d.function_name(), "amplify_update_tags");
        assert_eq!(d.client_type(), "amplify::Client");
        assert_eq!(d.tag_package(), "amplify");
        assert_eq!(d.tag_operation(), "TagResource");
        assert_eq!(d.untag_operation(), "UntagResource");
        assert!(!d.is_combined());
        assert_eq!(d.batch_size(), None);
        assert_eq!(d.identifier_field(), "ResourceArn");
        assert!(!d.identifier_requires_sequence());
        assert_eq!(d.resource_type_field(), None);
        assert_eq!(d.tag_payload(), &TagPayload::Native);
        assert_eq!(d.untag_tags_field(), "TagKeys");
        assert_eq!(d.removal_payload(), &RemovalPayload::Keys);
    }

    #[test]
    fn equal_operations_select_combined_shape() {
        let d = convert(ServiceSpec::new("route53").combined("ChangeTagsForResource")).unwrap();
        assert!(d.is_combined());
        assert_eq!(d.tag_operation(), d.untag_operation());
    }

    #[test]
    fn removal_flags_are_mutually_exclusive() {
        let err = convert(ServiceSpec::new("ec2").untag_tag_type().untag_tag_key_type()).unwrap_err();
        assert!(matches!(err, SpecError::ConflictingRemovalShapes { .. }));

        let err = convert(
            ServiceSpec::new("cloudfront")
                .untag_tag_type()
                .untag_input_custom("removed_tags.keys()"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cloudfront: conflicting removal payload shapes (custom expression, key-value pairs)"
        );
    }

    #[test]
    fn removal_shape_is_total() {
        let shape = |spec: ServiceSpec| convert(spec).unwrap().removal_payload().clone();
        assert_eq!(shape(ServiceSpec::new("a")), RemovalPayload::Keys);
        assert_eq!(shape(ServiceSpec::new("a").untag_tag_type()), RemovalPayload::KeyValuePairs);
        assert_eq!(shape(ServiceSpec::new("a").untag_tag_key_type()), RemovalPayload::KeyOnly);
        assert_eq!(
            shape(ServiceSpec::new("a").untag_input_custom("x")),
            RemovalPayload::Custom("x".to_owned())
        );
    }

    #[test]
    fn batch_size_rules() {
        let err = convert(ServiceSpec::new("r").combined("Change").batch_size(5)).unwrap_err();
        assert!(matches!(err, SpecError::BatchSizeOnCombinedCall { .. }));
        let err = convert(ServiceSpec::new("k").batch_size(0)).unwrap_err();
        assert!(matches!(err, SpecError::ZeroBatchSize { .. }));
        let d = convert(ServiceSpec::new("k").batch_size(10)).unwrap();
        assert_eq!(d.batch_size().map(NonZeroUsize::get), Some(10));
    }

    #[test]
    fn field_collisions_are_rejected() {
        let err = convert(
            ServiceSpec::new("r")
                .combined("Change")
                .tags_field("Tags")
                .untag_tags_field("Tags"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SpecError::FieldCollision {
                service: "r".to_owned(),
                first: "tags field",
                second: "untag tags field",
                field: "tags".to_owned(),
            }
        );

        // Split requests carry one payload each, so a shared name is fine.
        assert!(convert(ServiceSpec::new("ec2").untag_tags_field("Tags")).is_ok());

        let err = convert(ServiceSpec::new("s").identifier("TagKeys")).unwrap_err();
        assert!(matches!(
            err,
            SpecError::FieldCollision { first: "identifier field", second: "untag tags field", .. }
        ));

        let err = convert(ServiceSpec::new("s").resource_type_field("ResourceARN")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "s: identifier field and resource type field both map to request field \"resource_arn\""
        );
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            convert(ServiceSpec::new("Acm")),
            Err(SpecError::InvalidServiceId(_))
        ));
        assert!(matches!(
            convert(ServiceSpec::new("acm").identifier("Certificate Arn")),
            Err(SpecError::InvalidName { what: "identifier field", .. })
        ));
        assert!(matches!(
            convert(ServiceSpec::new("acm").tag_input_custom("  ")),
            Err(SpecError::EmptyOverride { .. })
        ));
    }

    #[test]
    fn descriptor_converts_back_to_equivalent_spec() {
        let spec = ServiceSpec::new("wafregional")
            .tag_package("waf")
            .identifier("ResourceARN");
        let d = convert(spec.clone()).unwrap();
        assert_eq!(ServiceSpec::from(&d), spec);
    }

    #[test]
    fn json_columns_default_when_omitted() {
        let spec: ServiceSpec =
            serde_json::from_str(r#"{ "service": "kinesis", "batch_size": 10 }"#).unwrap();
        assert_eq!(spec, ServiceSpec::new("kinesis").batch_size(10));
        assert!(serde_json::from_str::<ServiceSpec>(r#"{ "service": "x", "bogus": 1 }"#).is_err());
    }
}
