// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Code generator for tag-update functions.
//!
//! [`generate`] takes a [`Registry`] and a list of service identifiers and
//! renders one `<service>_update_tags` function per service into a single
//! Rust source file. The list is sorted first, so identical inputs always
//! produce byte-identical output. Every service is resolved before anything is
//! rendered: a missing descriptor or an unparsable override fails the whole
//! run and no partial output is produced.
//!
//! ```ignore
//! let registry = kvtags_registry::Registry::builtin()?;
//! let code = kvtags_gen::generate(
//!     &registry,
//!     kvtags_registry::UPDATE_TAGS_SERVICES,
//!     &kvtags_gen::GenerateOptions::default(),
//! )?;
//! std::fs::write("update_tags_gen.rs", code)?;
//! ```
#![forbid(unsafe_code)]

pub mod render;

use std::collections::BTreeSet;

use kvtags_registry::{Registry, RegistryError, ServiceDescriptor};
use proc_macro2::TokenStream;
use quote::quote;
use thiserror::Error;
use tracing::{debug, info};

pub use render::render_service;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by kvtags-gen; DO NOT EDIT.";

/// Default name of the generated file.
pub const DEFAULT_OUTPUT: &str = "update_tags_gen.rs";

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A listed service could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The service list names a service twice.
    #[error("service {0:?} is listed more than once")]
    DuplicateService(String),
    /// A descriptor value does not parse as the Rust syntax it stands for.
    #[error("{service}: {what} {text:?} is not valid Rust: {message}")]
    InvalidSyntax {
        /// Service being rendered.
        service: String,
        /// Which descriptor value failed.
        what: &'static str,
        /// The rejected text.
        text: String,
        /// Parser message.
        message: String,
    },
    /// A name does not map to a usable Rust identifier.
    #[error("{service}: {what} {name:?} does not map to a Rust identifier")]
    InvalidIdent {
        /// Service being rendered.
        service: String,
        /// Which descriptor value failed.
        what: &'static str,
        /// The rejected name.
        name: String,
    },
    /// A generation option is not a Rust path.
    #[error("invalid {what} path {text:?}: {message}")]
    InvalidOption {
        /// Which option failed.
        what: &'static str,
        /// The rejected text.
        text: String,
        /// Parser message.
        message: String,
    },
    /// The assembled file failed to parse.
    #[error("generated output is not valid Rust: {0}")]
    Parse(String),
}

/// Paths the generated file refers to.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    runtime_crate: syn::Path,
    service_root: Option<syn::Path>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            runtime_crate: syn::parse_quote!(kvtags),
            service_root: None,
        }
    }
}

impl GenerateOptions {
    /// Path to the crate providing `KeyValueTags` and `UpdateTagsError`.
    pub fn runtime_crate(mut self, path: &str) -> Result<Self, GenerateError> {
        self.runtime_crate = parse_option("runtime crate", path)?;
        Ok(self)
    }

    /// Module from which service packages are imported.
    ///
    /// When unset, the generated file expects the packages to be in scope at
    /// the place it is included.
    pub fn service_root(mut self, path: &str) -> Result<Self, GenerateError> {
        self.service_root = Some(parse_option("service root", path)?);
        Ok(self)
    }
}

fn parse_option(what: &'static str, text: &str) -> Result<syn::Path, GenerateError> {
    syn::parse_str(text).map_err(|err: syn::Error| GenerateError::InvalidOption {
        what,
        text: text.to_owned(),
        message: err.to_string(),
    })
}

/// Render the update functions for `services` into one source file.
pub fn generate<S: AsRef<str>>(
    registry: &Registry,
    services: &[S],
    options: &GenerateOptions,
) -> Result<String, GenerateError> {
    let mut ids: Vec<&str> = services.iter().map(AsRef::as_ref).collect();
    ids.sort_unstable();
    if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(GenerateError::DuplicateService(pair[0].to_owned()));
    }

    let descriptors = ids
        .iter()
        .map(|id| registry.get(id))
        .collect::<Result<Vec<_>, _>>()?;

    let runtime = &options.runtime_crate;
    let mut items: Vec<TokenStream> = vec![quote! {
        use #runtime::{KeyValueTags, UpdateTagsError};
    }];
    if let Some(root) = &options.service_root {
        let modules = service_modules(&descriptors)?;
        if !modules.is_empty() {
            let modules = modules.iter().map(|m| quote::format_ident!("{}", m));
            items.push(quote! {
                use #root::{#(#modules),*};
            });
        }
    }

    for descriptor in &descriptors {
        debug!(
            service = descriptor.service_id(),
            combined = descriptor.is_combined(),
            batch_size = descriptor.batch_size().map(std::num::NonZeroUsize::get),
            "rendering update function"
        );
        items.push(render_service(descriptor)?);
    }

    let file: syn::File = syn::parse2(quote! { #(#items)* })
        .map_err(|err| GenerateError::Parse(err.to_string()))?;
    info!(services = descriptors.len(), "generated tag-update functions");

    Ok(format!("{GENERATED_HEADER}\n\n{}", prettyplease::unparse(&file)))
}

/// Leading path segments that must be imported for the descriptors' request
/// and client types to resolve.
fn service_modules(
    descriptors: &[&ServiceDescriptor],
) -> Result<BTreeSet<String>, GenerateError> {
    let mut modules = BTreeSet::new();
    for descriptor in descriptors {
        let service = descriptor.service_id();
        let package: syn::Path = syn::parse_str(descriptor.tag_package()).map_err(|err| {
            GenerateError::InvalidSyntax {
                service: service.to_owned(),
                what: "tag package",
                text: descriptor.tag_package().to_owned(),
                message: err.to_string(),
            }
        })?;
        if package.leading_colon.is_none() {
            if let Some(first) = package.segments.first() {
                modules.insert(first.ident.to_string());
            }
        }

        let client: syn::Type = syn::parse_str(descriptor.client_type()).map_err(|err| {
            GenerateError::InvalidSyntax {
                service: service.to_owned(),
                what: "client type",
                text: descriptor.client_type().to_owned(),
                message: err.to_string(),
            }
        })?;
        if let syn::Type::Path(path) = client {
            let relative = path.qself.is_none() && path.path.leading_colon.is_none();
            if relative && path.path.segments.len() > 1 {
                if let Some(first) = path.path.segments.first() {
                    modules.insert(first.ident.to_string());
                }
            }
        }
    }
    Ok(modules)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use kvtags_registry::ServiceSpec;

    fn registry() -> Registry {
        Registry::from_specs([
            ServiceSpec::new("waf"),
            ServiceSpec::new("wafregional").tag_package("waf"),
            ServiceSpec::new("sqs").operations("TagQueue", "UntagQueue"),
        ])
        .unwrap()
    }

    #[test]
    fn output_is_sorted_and_stable() {
        let options = GenerateOptions::default();
        let a = generate(&registry(), &["wafregional", "sqs", "waf"], &options).unwrap();
        let b = generate(&registry(), &["waf", "wafregional", "sqs"], &options).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(GENERATED_HEADER));
        let sqs = a.find("pub fn sqs_update_tags").unwrap();
        let waf = a.find("pub fn waf_update_tags").unwrap();
        let wafregional = a.find("pub fn wafregional_update_tags").unwrap();
        assert!(sqs < waf && waf < wafregional);
    }

    #[test]
    fn service_root_imports_packages_and_client_modules() {
        let options = GenerateOptions::default()
            .service_root("crate::aws")
            .unwrap()
            .runtime_crate("::kvtags")
            .unwrap();
        let code = generate(&registry(), &["wafregional"], &options).unwrap();
        assert!(code.contains("use crate::aws::{waf, wafregional};"), "{code}");
        assert!(code.contains("use ::kvtags::{KeyValueTags, UpdateTagsError};"));
    }

    #[test]
    fn missing_service_fails_before_rendering() {
        let err =
            generate(&registry(), &["sqs", "nope"], &GenerateOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Registry(RegistryError::MissingDescriptor(ref s)) if s == "nope"
        ));
    }

    #[test]
    fn duplicate_listing_is_rejected() {
        let err =
            generate(&registry(), &["sqs", "sqs"], &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateService(ref s) if s == "sqs"));
    }

    #[test]
    fn bad_option_path() {
        assert!(matches!(
            GenerateOptions::default().service_root("crate::"),
            Err(GenerateError::InvalidOption { .. })
        ));
    }
}
