// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generation over the built-in registry.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use kvtags_gen::{generate, GenerateOptions};
use kvtags_registry::{Registry, UPDATE_TAGS_SERVICES};

fn builtin_code() -> String {
    let registry = Registry::builtin().unwrap();
    generate(&registry, UPDATE_TAGS_SERVICES, &GenerateOptions::default()).unwrap()
}

/// Source of one generated function, whitespace and trailing commas removed.
fn function(code: &str, service: &str) -> String {
    let file = syn::parse_file(code).unwrap();
    let name = format!("{service}_update_tags");
    let item = file
        .items
        .iter()
        .find(|item| matches!(item, syn::Item::Fn(f) if f.sig.ident == name))
        .unwrap_or_else(|| panic!("no function {name}"));
    let single = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: vec![item.clone()],
    };
    let compact: String = prettyplease::unparse(&single)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.replace(",}", "}").replace(",)", ")")
}

#[test]
fn one_function_per_service() {
    let code = builtin_code();
    let file = syn::parse_file(&code).unwrap();
    let functions = file
        .items
        .iter()
        .filter(|item| matches!(item, syn::Item::Fn(_)))
        .count();
    assert_eq!(functions, UPDATE_TAGS_SERVICES.len());
}

#[test]
fn regeneration_is_byte_identical() {
    assert_eq!(builtin_code(), builtin_code());
}

#[test]
fn combined_services_issue_a_single_call() {
    let code = builtin_code();
    let route53 = function(&code, "route53");
    assert!(route53.contains("resource_type:&str"));
    assert_eq!(route53.matches("conn.change_tags_for_resource(").count(), 1);
    assert!(route53.contains("ifremoved_tags.is_empty()&&updated_tags.is_empty(){returnOk(());}"));

    let beanstalk = function(&code, "elasticbeanstalk");
    assert!(beanstalk.contains("input.tags_to_add=Some(updated_tags.native());"));
    assert!(beanstalk.contains("input.tags_to_remove=Some(removed_tags.keys());"));
}

#[test]
fn split_services_follow_their_descriptor() {
    let code = builtin_code();

    let acm = function(&code, "acm");
    assert!(acm.contains("acm::RemoveTagsFromCertificateInput{certificate_arn:Some(identifier.to_owned()),tags:Some(removed_tags.native())"));
    assert!(acm.find("conn.remove_tags_from_certificate(") < acm.find("conn.add_tags_to_certificate("));

    let kinesis = function(&code, "kinesis");
    assert!(kinesis.contains("forremoved_tagsinremoved_tags.chunks(10){"));
    assert!(kinesis.contains("tags:Some(updated_tags.map())"));

    let elb = function(&code, "elb");
    assert!(elb.contains("load_balancer_names:Some(vec![identifier.to_owned()])"));
    assert!(elb.contains("tags:Some(removed_tags.native_keys())"));

    let ssm = function(&code, "ssm");
    assert!(ssm.contains("resource_type:Some(resource_type.to_owned())"));

    let wafregional = function(&code, "wafregional");
    assert!(wafregional.contains("conn:&wafregional::Client"));
    assert!(wafregional.contains("waf::TagResourceInput{resource_arn:Some(identifier.to_owned())"));

    let cloudfront = function(&code, "cloudfront");
    assert!(cloudfront.contains("tags:Some(cloudfront::Tags{items:Some(updated_tags.native())})"));
    assert!(cloudfront.contains("tag_keys:Some(cloudfront::TagKeys{items:Some(removed_tags.keys())})"));
}
