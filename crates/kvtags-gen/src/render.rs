// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering of one `<service>_update_tags` function from its descriptor.

use heck::ToSnakeCase;
use kvtags_registry::{RemovalPayload, ServiceDescriptor, TagPayload};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};

use crate::GenerateError;

/// Render the update function for one service.
pub fn render_service(descriptor: &ServiceDescriptor) -> Result<TokenStream, GenerateError> {
    ServiceRenderer::new(descriptor)?.render()
}

/// Which half of a reconciliation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Untag,
    Tag,
}

struct ServiceRenderer<'a> {
    descriptor: &'a ServiceDescriptor,
    package: syn::Path,
    client_type: syn::Type,
    identifier_field: Ident,
    resource_type_field: Option<Ident>,
    tags_field: Ident,
    untag_tags_field: Ident,
    tag_payload: TokenStream,
    removal_payload: TokenStream,
}

impl<'a> ServiceRenderer<'a> {
    fn new(descriptor: &'a ServiceDescriptor) -> Result<Self, GenerateError> {
        let service = descriptor.service_id();

        let package = parse_syntax::<syn::Path>(service, "tag package", descriptor.tag_package())?;
        let client_type =
            parse_syntax::<syn::Type>(service, "client type", descriptor.client_type())?;

        let tag_payload = match descriptor.tag_payload() {
            TagPayload::Native => quote! { updated_tags.native() },
            TagPayload::Custom(expr) => {
                let expr = parse_syntax::<syn::Expr>(service, "tag input expression", expr)?;
                quote! { #expr }
            }
        };
        let removal_payload = match descriptor.removal_payload() {
            RemovalPayload::Custom(expr) => {
                let expr = parse_syntax::<syn::Expr>(service, "untag input expression", expr)?;
                quote! { #expr }
            }
            RemovalPayload::KeyValuePairs => quote! { removed_tags.native() },
            RemovalPayload::KeyOnly => quote! { removed_tags.native_keys() },
            RemovalPayload::Keys => quote! { removed_tags.keys() },
        };

        Ok(Self {
            descriptor,
            package,
            client_type,
            identifier_field: snake_ident(service, "identifier field", descriptor.identifier_field())?,
            resource_type_field: descriptor
                .resource_type_field()
                .map(|field| snake_ident(service, "resource type field", field))
                .transpose()?,
            tags_field: snake_ident(service, "tags field", descriptor.tags_field())?,
            untag_tags_field: snake_ident(service, "untag tags field", descriptor.untag_tags_field())?,
            tag_payload,
            removal_payload,
        })
    }

    fn render(&self) -> Result<TokenStream, GenerateError> {
        let service = self.descriptor.service_id();
        let fn_name = format_ident!("{}", self.descriptor.function_name());
        let client_type = &self.client_type;
        let resource_type_param = self
            .resource_type_field
            .as_ref()
            .map(|_| quote! { resource_type: &str, });

        let body = if self.descriptor.is_combined() {
            self.combined_body()?
        } else {
            self.split_body()?
        };

        let summary = format!(" Updates {service} service tags.");
        Ok(quote! {
            #[doc = #summary]
            #[doc = ""]
            #[doc = " The identifier is typically the Amazon Resource Name (ARN), although"]
            #[doc = " it may also be a different identifier depending on the service."]
            pub fn #fn_name(
                conn: &#client_type,
                identifier: &str,
                #resource_type_param
                old_tags: &KeyValueTags,
                new_tags: &KeyValueTags,
            ) -> Result<(), UpdateTagsError> {
                #body
            }
        })
    }

    /// Identifier and resource-type fields shared by every request.
    fn locator_fields(&self) -> TokenStream {
        let identifier_field = &self.identifier_field;
        let identifier = if self.descriptor.identifier_requires_sequence() {
            quote! { #identifier_field: Some(vec![identifier.to_owned()]), }
        } else {
            quote! { #identifier_field: Some(identifier.to_owned()), }
        };
        let resource_type = self
            .resource_type_field
            .as_ref()
            .map(|field| quote! { #field: Some(resource_type.to_owned()), });
        quote! { #identifier #resource_type }
    }

    fn request_type(&self, operation: &str) -> Result<(TokenStream, Ident), GenerateError> {
        let service = self.descriptor.service_id();
        let package = &self.package;
        let input = format_ident!("{}Input", operation);
        let method = snake_ident(service, "operation", operation)?;
        Ok((quote! { #package::#input }, method))
    }

    fn combined_body(&self) -> Result<TokenStream, GenerateError> {
        let (input_type, method) = self.request_type(self.descriptor.tag_operation())?;
        let locator = self.locator_fields();
        let tags_field = &self.tags_field;
        let untag_tags_field = &self.untag_tags_field;
        let tag_payload = &self.tag_payload;
        let removal_payload = &self.removal_payload;

        Ok(quote! {
            let removed_tags = old_tags.removed(new_tags).ignore_aws();
            let updated_tags = old_tags.updated(new_tags).ignore_aws();

            if removed_tags.is_empty() && updated_tags.is_empty() {
                return Ok(());
            }

            let mut input = #input_type {
                #locator
                ..Default::default()
            };

            if !updated_tags.is_empty() {
                input.#tags_field = Some(#tag_payload);
            }

            if !removed_tags.is_empty() {
                input.#untag_tags_field = Some(#removal_payload);
            }

            conn.#method(input)
                .map_err(|err| UpdateTagsError::tagging(identifier, err))?;

            Ok(())
        })
    }

    fn split_body(&self) -> Result<TokenStream, GenerateError> {
        let untag = self.phase(Phase::Untag)?;
        let tag = self.phase(Phase::Tag)?;
        Ok(quote! {
            #untag
            #tag
            Ok(())
        })
    }

    fn phase(&self, phase: Phase) -> Result<TokenStream, GenerateError> {
        let (operation, tags, set_operation, field, payload, wrap) = match phase {
            Phase::Untag => (
                self.descriptor.untag_operation(),
                format_ident!("removed_tags"),
                format_ident!("removed"),
                &self.untag_tags_field,
                &self.removal_payload,
                format_ident!("untagging"),
            ),
            Phase::Tag => (
                self.descriptor.tag_operation(),
                format_ident!("updated_tags"),
                format_ident!("updated"),
                &self.tags_field,
                &self.tag_payload,
                format_ident!("tagging"),
            ),
        };
        let (input_type, method) = self.request_type(operation)?;
        let locator = self.locator_fields();

        let call = quote! {
            let input = #input_type {
                #locator
                #field: Some(#payload),
                ..Default::default()
            };

            conn.#method(input)
                .map_err(|err| UpdateTagsError::#wrap(identifier, err))?;
        };

        let issue = match self.descriptor.batch_size() {
            Some(size) => {
                let size = Literal::usize_unsuffixed(size.get());
                quote! {
                    for #tags in #tags.chunks(#size) {
                        #call
                    }
                }
            }
            None => call,
        };

        Ok(quote! {
            let #tags = old_tags.#set_operation(new_tags).ignore_aws();
            if !#tags.is_empty() {
                #issue
            }
        })
    }
}

fn parse_syntax<T: syn::parse::Parse>(
    service: &str,
    what: &'static str,
    text: &str,
) -> Result<T, GenerateError> {
    syn::parse_str::<T>(text).map_err(|err| GenerateError::InvalidSyntax {
        service: service.to_owned(),
        what,
        text: text.to_owned(),
        message: err.to_string(),
    })
}

/// Snake-case a PascalCase API name into a Rust identifier.
///
/// Keywords become raw identifiers (`Type` -> `r#type`).
pub fn snake_ident(service: &str, what: &'static str, name: &str) -> Result<Ident, GenerateError> {
    let snake = name.to_snake_case();
    if let Ok(ident) = syn::parse_str::<Ident>(&snake) {
        return Ok(ident);
    }
    let rawable = !snake.is_empty()
        && !matches!(snake.as_str(), "self" | "super" | "crate" | "_")
        && syn::parse_str::<Ident>(&format!("r#{snake}")).is_ok();
    if rawable {
        Ok(Ident::new_raw(&snake, Span::call_site()))
    } else {
        Err(GenerateError::InvalidIdent {
            service: service.to_owned(),
            what,
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use kvtags_registry::{Registry, ServiceSpec};

    fn render(spec: ServiceSpec) -> String {
        let registry = Registry::from_specs([spec]).unwrap();
        let descriptor = registry.iter().next().unwrap();
        let tokens = render_service(descriptor).unwrap();
        let file: syn::File = syn::parse2(tokens).unwrap();
        prettyplease::unparse(&file)
    }

    /// Whitespace and trailing commas removed, so assertions do not depend on
    /// where the pretty-printer breaks lines.
    fn squash(code: &str) -> String {
        let compact: String = code.chars().filter(|c| !c.is_whitespace()).collect();
        compact.replace(",}", "}").replace(",)", ")")
    }

    #[test]
    fn snake_idents() {
        let ident = |name| snake_ident("svc", "field", name).unwrap().to_string();
        assert_eq!(ident("CertificateArn"), "certificate_arn");
        assert_eq!(ident("ResourceARN"), "resource_arn");
        assert_eq!(ident("ARN"), "arn");
        assert_eq!(ident("Type"), "r#type");
        assert!(snake_ident("svc", "field", "Self").is_err());
    }

    #[test]
    fn combined_shape_issues_one_call() {
        let code = squash(&render(
            ServiceSpec::new("route53")
                .combined("ChangeTagsForResource")
                .identifier("ResourceId")
                .resource_type_field("ResourceType")
                .tags_field("AddTags")
                .untag_tags_field("RemoveTagKeys"),
        ));
        assert!(code.contains("resource_type:&str"));
        assert!(code.contains("letmutinput=route53::ChangeTagsForResourceInput{"));
        assert!(code.contains("resource_type:Some(resource_type.to_owned())"));
        assert!(code.contains("input.add_tags=Some(updated_tags.native());"));
        assert!(code.contains("input.remove_tag_keys=Some(removed_tags.keys());"));
        assert_eq!(code.matches("conn.change_tags_for_resource(").count(), 1);
        assert!(!code.contains("untagging"));
    }

    #[test]
    fn split_shape_removes_before_adding() {
        let code = squash(&render(ServiceSpec::new("sns")));
        let untag = code.find("conn.untag_resource(").unwrap();
        let tag = code.find("conn.tag_resource(").unwrap();
        assert!(untag < tag);
        assert!(!code.contains("resource_type"));
        assert!(!code.contains(".chunks("));
        assert!(code.contains("tag_keys:Some(removed_tags.keys())"));
        assert!(code.contains("resource_arn:Some(identifier.to_owned())"));
    }

    #[test]
    fn batch_size_wraps_both_phases_in_chunk_loops() {
        let code = squash(&render(
            ServiceSpec::new("kinesis")
                .operations("AddTagsToStream", "RemoveTagsFromStream")
                .batch_size(10)
                .identifier("StreamName")
                .tag_input_custom("updated_tags.map()"),
        ));
        assert!(code.contains("forremoved_tagsinremoved_tags.chunks(10){"));
        assert!(code.contains("forupdated_tagsinupdated_tags.chunks(10){"));
        assert!(code.contains("tags:Some(updated_tags.map())"));
    }

    #[test]
    fn removal_payload_shapes() {
        let ec2 = squash(&render(
            ServiceSpec::new("ec2")
                .operations("CreateTags", "DeleteTags")
                .identifier_sequence("Resources")
                .untag_tags_field("Tags")
                .untag_tag_type(),
        ));
        assert!(ec2.contains("resources:Some(vec![identifier.to_owned()])"));
        assert!(ec2.contains("tags:Some(removed_tags.native())"));

        let elb = squash(&render(ServiceSpec::new("elb").untag_tag_key_type()));
        assert!(elb.contains("tag_keys:Some(removed_tags.native_keys())"));

        let cloudfront = squash(&render(
            ServiceSpec::new("cloudfront")
                .untag_input_custom("cloudfront::TagKeys { items: Some(removed_tags.keys()) }"),
        ));
        assert!(cloudfront
            .contains("tag_keys:Some(cloudfront::TagKeys{items:Some(removed_tags.keys())})"));
    }

    #[test]
    fn custom_payload_survives_line_breaking() {
        let code = render(
            ServiceSpec::new("cloudfront")
                .tag_input_custom("cloudfront::Tags { items: Some(updated_tags.native()) }")
                .untag_input_custom("cloudfront::TagKeys { items: Some(removed_tags.keys()) }"),
        );
        assert!(code.contains("items: Some(removed_tags.keys())"), "{code}");
        assert!(code.contains("items: Some(updated_tags.native())"), "{code}");
        let code = squash(&code);
        assert!(code.contains("tags:Some(cloudfront::Tags{items:Some(updated_tags.native())})"));
    }

    #[test]
    fn malformed_override_is_a_render_error() {
        let registry =
            Registry::from_specs([ServiceSpec::new("pinpoint").tag_input_custom("TagsModel {")])
                .unwrap();
        let err = render_service(registry.get("pinpoint").unwrap()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::InvalidSyntax { what: "tag input expression", .. }
        ));
    }
}
