// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Registry describing the fake services.
//!
//! Compiled twice: by the build script, which generates the update functions
//! from it, and by the library, so tests can regenerate and compare.

use kvtags_registry::{Registry, RegistryError, ServiceSpec};

/// Module the generated code imports service packages from.
pub const SERVICE_ROOT: &str = "crate::services";

/// One row per fake service.
pub fn specs() -> Vec<ServiceSpec> {
    vec![
        ServiceSpec::new("balancers")
            .operations("AddTags", "RemoveTags")
            .identifier_sequence("LoadBalancerNames")
            .untag_tags_field("Tags")
            .untag_tag_key_type(),
        ServiceSpec::new("distributions")
            .identifier("Resource")
            .tag_input_custom("distributions::Tags { items: Some(updated_tags.native()) }")
            .untag_input_custom("distributions::TagKeys { items: Some(removed_tags.keys()) }"),
        ServiceSpec::new("firewall").tag_package("plain"),
        ServiceSpec::new("instances")
            .operations("CreateTags", "DeleteTags")
            .identifier_sequence("Resources")
            .untag_tags_field("Tags")
            .untag_tag_type(),
        ServiceSpec::new("labels")
            .combined("SetLabels")
            .identifier("ResourceId")
            .resource_type_field("ResourceType")
            .tags_field("AddTags")
            .untag_tags_field("RemoveTagKeys"),
        ServiceSpec::new("plain"),
        ServiceSpec::new("streams")
            .operations("AddTagsToStream", "RemoveTagsFromStream")
            .batch_size(2)
            .identifier("StreamName")
            .tag_input_custom("updated_tags.map()"),
    ]
}

/// Registry built from [`specs`].
pub fn registry() -> Result<Registry, RegistryError> {
    Registry::from_specs(specs())
}
