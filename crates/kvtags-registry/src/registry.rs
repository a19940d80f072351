// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only service registry.

use std::collections::btree_map::{self, BTreeMap};

use thiserror::Error;
use tracing::debug;

use crate::builtin;
use crate::descriptor::ServiceDescriptor;
use crate::spec::{ServiceSpec, SpecError};

/// Errors raised while building or querying a [`Registry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A service was requested that has no descriptor.
    #[error("no tag-update descriptor registered for service {0:?}")]
    MissingDescriptor(String),
    /// Two table rows share one service identifier.
    #[error("service {0:?} is registered more than once")]
    DuplicateService(String),
    /// A table row failed validation.
    #[error("invalid service table entry: {0}")]
    InvalidSpec(#[from] SpecError),
    /// The table is not valid JSON.
    #[error("invalid service table json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mapping from service identifier to descriptor, ordered by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    services: BTreeMap<String, ServiceDescriptor>,
}

impl Registry {
    /// Validate and index a table of specs.
    pub fn from_specs<I>(specs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ServiceSpec>,
    {
        let mut services = BTreeMap::new();
        for spec in specs {
            let descriptor = ServiceDescriptor::try_from(spec)?;
            match services.entry(descriptor.service_id().to_owned()) {
                btree_map::Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateService(entry.key().clone()));
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(descriptor);
                }
            }
        }
        debug!(services = services.len(), "service registry built");
        Ok(Self { services })
    }

    /// Parse a JSON array of [`ServiceSpec`] rows.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let specs: Vec<ServiceSpec> = serde_json::from_str(json)?;
        Self::from_specs(specs)
    }

    /// Serialize the registry as a JSON array of [`ServiceSpec`] rows.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let specs: Vec<ServiceSpec> = self.services.values().map(ServiceSpec::from).collect();
        Ok(serde_json::to_string_pretty(&specs)?)
    }

    /// The hand-maintained table of AWS services.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_specs(builtin::specs())
    }

    /// Descriptor for `service`.
    pub fn get(&self, service: &str) -> Result<&ServiceDescriptor, RegistryError> {
        self.services
            .get(service)
            .ok_or_else(|| RegistryError::MissingDescriptor(service.to_owned()))
    }

    /// Whether `service` has a descriptor.
    pub fn contains(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }

    /// Registered service identifiers in sorted order.
    pub fn service_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.services.keys().map(String::as_str)
    }

    /// Descriptors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> + '_ {
        self.services.values()
    }

    /// Number of registered services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_service_is_an_error() {
        let registry = Registry::from_specs([ServiceSpec::new("acm")]).unwrap();
        assert!(registry.get("acm").is_ok());
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, RegistryError::MissingDescriptor(ref s) if s == "nope"));
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = Registry::from_specs([ServiceSpec::new("acm"), ServiceSpec::new("acm")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateService(ref s) if s == "acm"));
    }

    #[test]
    fn ids_are_sorted() {
        let registry = Registry::from_specs([
            ServiceSpec::new("sqs"),
            ServiceSpec::new("acm"),
            ServiceSpec::new("ec2"),
        ])
        .unwrap();
        assert_eq!(registry.service_ids().collect::<Vec<_>>(), ["acm", "ec2", "sqs"]);
    }

    #[test]
    fn json_round_trips_builtin_table() {
        let builtin = Registry::builtin().unwrap();
        let reloaded = Registry::from_json(&builtin.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, builtin);
    }

    #[test]
    fn invalid_json_row_names_service() {
        let err = Registry::from_json(
            r#"[{ "service": "ec2", "untag_requires_tag_type": true, "untag_requires_tag_key_type": true }]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ec2"), "{err}");
    }
}
