// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Built-in table of AWS service tagging APIs.
//!
//! Only the columns that differ from the [`ServiceSpec`] defaults are set.
//! Custom expressions are evaluated inside the generated function, where
//! `updated_tags` / `removed_tags` name the (chunk of the) tag set being sent.

use crate::spec::ServiceSpec;

/// Services that get a generated `<service>_update_tags` function.
pub const UPDATE_TAGS_SERVICES: &[&str] = &[
    "accessanalyzer",
    "acm",
    "acmpca",
    "amplify",
    "apigateway",
    "apigatewayv2",
    "appmesh",
    "appstream",
    "appsync",
    "athena",
    "backup",
    "cloud9",
    "cloudfront",
    "cloudhsmv2",
    "cloudtrail",
    "cloudwatch",
    "cloudwatchevents",
    "cloudwatchlogs",
    "codecommit",
    "codedeploy",
    "codepipeline",
    "codestarnotifications",
    "cognitoidentity",
    "cognitoidentityprovider",
    "configservice",
    "databasemigrationservice",
    "dataexchange",
    "datapipeline",
    "datasync",
    "dax",
    "devicefarm",
    "directconnect",
    "directoryservice",
    "dlm",
    "docdb",
    "dynamodb",
    "ec2",
    "ecr",
    "ecs",
    "efs",
    "eks",
    "elasticache",
    "elasticbeanstalk",
    "elasticsearchservice",
    "elb",
    "elbv2",
    "emr",
    "firehose",
    "fsx",
    "gamelift",
    "glacier",
    "globalaccelerator",
    "glue",
    "guardduty",
    "greengrass",
    "imagebuilder",
    "iot",
    "iotanalytics",
    "iotevents",
    "kafka",
    "kinesis",
    "kinesisanalytics",
    "kinesisanalyticsv2",
    "kinesisvideo",
    "kms",
    "lambda",
    "licensemanager",
    "lightsail",
    "mediaconnect",
    "mediaconvert",
    "medialive",
    "mediapackage",
    "mediastore",
    "mq",
    "neptune",
    "networkmanager",
    "opsworks",
    "organizations",
    "pinpoint",
    "qldb",
    "quicksight",
    "ram",
    "rds",
    "redshift",
    "resourcegroups",
    "route53",
    "route53resolver",
    "sagemaker",
    "secretsmanager",
    "securityhub",
    "sfn",
    "sns",
    "sqs",
    "ssm",
    "storagegateway",
    "swf",
    "synthetics",
    "transfer",
    "waf",
    "wafregional",
    "wafv2",
    "workspaces",
];

const ADD_TAGS_TO_RESOURCE: (&str, &str) = ("AddTagsToResource", "RemoveTagsFromResource");
const ADD_TAGS: (&str, &str) = ("AddTags", "RemoveTags");
const CREATE_TAGS: (&str, &str) = ("CreateTags", "DeleteTags");

fn ops(spec: ServiceSpec, (tag, untag): (&str, &str)) -> ServiceSpec {
    spec.operations(tag, untag)
}

/// Rows of the built-in table, one per entry of [`UPDATE_TAGS_SERVICES`].
pub fn specs() -> Vec<ServiceSpec> {
    vec![
        ServiceSpec::new("accessanalyzer"),
        ServiceSpec::new("acm")
            .operations("AddTagsToCertificate", "RemoveTagsFromCertificate")
            .identifier("CertificateArn")
            .untag_tags_field("Tags")
            .untag_tag_type(),
        ServiceSpec::new("acmpca")
            .operations("TagCertificateAuthority", "UntagCertificateAuthority")
            .identifier("CertificateAuthorityArn")
            .untag_tags_field("Tags")
            .untag_tag_type(),
        ServiceSpec::new("amplify"),
        ServiceSpec::new("apigateway"),
        ServiceSpec::new("apigatewayv2"),
        ServiceSpec::new("appmesh"),
        ServiceSpec::new("appstream"),
        ServiceSpec::new("appsync"),
        ServiceSpec::new("athena").identifier("ResourceARN"),
        ServiceSpec::new("backup").untag_tags_field("TagKeyList"),
        ServiceSpec::new("cloud9").identifier("ResourceARN"),
        ServiceSpec::new("cloudfront")
            .identifier("Resource")
            .tag_input_custom("cloudfront::Tags { items: Some(updated_tags.native()) }")
            .untag_input_custom("cloudfront::TagKeys { items: Some(removed_tags.keys()) }"),
        ServiceSpec::new("cloudhsmv2")
            .identifier("ResourceId")
            .tags_field("TagList")
            .untag_tags_field("TagKeyList"),
        ServiceSpec::new("cloudtrail")
            .operations("AddTags", "RemoveTags")
            .identifier("ResourceId")
            .tags_field("TagsList")
            .untag_tags_field("TagsList")
            .untag_tag_type(),
        ServiceSpec::new("cloudwatch").identifier("ResourceARN"),
        ServiceSpec::new("cloudwatchevents").identifier("ResourceARN"),
        ServiceSpec::new("cloudwatchlogs")
            .operations("TagLogGroup", "UntagLogGroup")
            .identifier("LogGroupName")
            .untag_tags_field("Tags"),
        ServiceSpec::new("codecommit"),
        ServiceSpec::new("codedeploy"),
        ServiceSpec::new("codepipeline"),
        ServiceSpec::new("codestarnotifications").identifier("Arn"),
        ServiceSpec::new("cognitoidentity"),
        ServiceSpec::new("cognitoidentityprovider"),
        ServiceSpec::new("configservice"),
        ops(ServiceSpec::new("databasemigrationservice"), ADD_TAGS_TO_RESOURCE),
        ServiceSpec::new("dataexchange"),
        ops(ServiceSpec::new("datapipeline"), ADD_TAGS).identifier("PipelineId"),
        ServiceSpec::new("datasync").untag_tags_field("Keys"),
        ServiceSpec::new("dax").identifier("ResourceName"),
        ServiceSpec::new("devicefarm").identifier("ResourceARN"),
        ServiceSpec::new("directconnect"),
        ops(ServiceSpec::new("directoryservice"), ADD_TAGS_TO_RESOURCE).identifier("ResourceId"),
        ServiceSpec::new("dlm"),
        ops(ServiceSpec::new("docdb"), ADD_TAGS_TO_RESOURCE).identifier("ResourceName"),
        ServiceSpec::new("dynamodb"),
        ops(ServiceSpec::new("ec2"), CREATE_TAGS)
            .identifier_sequence("Resources")
            .untag_tags_field("Tags")
            .untag_tag_type(),
        ServiceSpec::new("ecr"),
        ServiceSpec::new("ecs"),
        ServiceSpec::new("efs").identifier("ResourceId"),
        ServiceSpec::new("eks"),
        ops(ServiceSpec::new("elasticache"), ADD_TAGS_TO_RESOURCE).identifier("ResourceName"),
        ServiceSpec::new("elasticbeanstalk")
            .combined("UpdateTagsForResource")
            .tags_field("TagsToAdd")
            .untag_tags_field("TagsToRemove"),
        ops(ServiceSpec::new("elasticsearchservice"), ADD_TAGS)
            .identifier("ARN")
            .tags_field("TagList"),
        ops(ServiceSpec::new("elb"), ADD_TAGS)
            .identifier_sequence("LoadBalancerNames")
            .untag_tags_field("Tags")
            .untag_tag_key_type(),
        ops(ServiceSpec::new("elbv2"), ADD_TAGS).identifier_sequence("ResourceArns"),
        ops(ServiceSpec::new("emr"), ADD_TAGS).identifier("ResourceId"),
        ServiceSpec::new("firehose")
            .operations("TagDeliveryStream", "UntagDeliveryStream")
            .identifier("DeliveryStreamName"),
        ServiceSpec::new("fsx").identifier("ResourceARN"),
        ServiceSpec::new("gamelift").identifier("ResourceARN"),
        ServiceSpec::new("glacier")
            .operations("AddTagsToVault", "RemoveTagsFromVault")
            .identifier("VaultName"),
        ServiceSpec::new("globalaccelerator"),
        ServiceSpec::new("glue")
            .tags_field("TagsToAdd")
            .untag_tags_field("TagsToRemove"),
        ServiceSpec::new("guardduty"),
        ServiceSpec::new("greengrass"),
        ServiceSpec::new("imagebuilder"),
        ServiceSpec::new("iot"),
        ServiceSpec::new("iotanalytics"),
        ServiceSpec::new("iotevents"),
        ServiceSpec::new("kafka"),
        // AddTagsToStream accepts at most 10 tags per request.
        ServiceSpec::new("kinesis")
            .operations("AddTagsToStream", "RemoveTagsFromStream")
            .batch_size(10)
            .identifier("StreamName")
            .tag_input_custom("updated_tags.map()"),
        ServiceSpec::new("kinesisanalytics").identifier("ResourceARN"),
        ServiceSpec::new("kinesisanalyticsv2").identifier("ResourceARN"),
        ServiceSpec::new("kinesisvideo")
            .operations("TagStream", "UntagStream")
            .identifier("StreamARN")
            .untag_tags_field("TagKeyList"),
        ServiceSpec::new("kms").identifier("KeyId"),
        ServiceSpec::new("lambda").identifier("Resource"),
        ServiceSpec::new("licensemanager"),
        ServiceSpec::new("lightsail").identifier("ResourceName"),
        ServiceSpec::new("mediaconnect"),
        ServiceSpec::new("mediaconvert").identifier("Arn"),
        ops(ServiceSpec::new("medialive"), CREATE_TAGS),
        ServiceSpec::new("mediapackage"),
        ServiceSpec::new("mediastore").identifier("Resource"),
        ops(ServiceSpec::new("mq"), CREATE_TAGS),
        ops(ServiceSpec::new("neptune"), ADD_TAGS_TO_RESOURCE).identifier("ResourceName"),
        ServiceSpec::new("networkmanager"),
        ServiceSpec::new("opsworks"),
        ServiceSpec::new("organizations").identifier("ResourceId"),
        ServiceSpec::new("pinpoint")
            .tags_field("TagsModel")
            .tag_input_custom("pinpoint::TagsModel { tags: Some(updated_tags.map()) }"),
        ServiceSpec::new("qldb"),
        ServiceSpec::new("quicksight"),
        ServiceSpec::new("ram").identifier("ResourceShareArn"),
        ops(ServiceSpec::new("rds"), ADD_TAGS_TO_RESOURCE).identifier("ResourceName"),
        ops(ServiceSpec::new("redshift"), CREATE_TAGS).identifier("ResourceName"),
        ServiceSpec::new("resourcegroups")
            .operations("Tag", "Untag")
            .identifier("Arn")
            .untag_tags_field("Keys"),
        ServiceSpec::new("route53")
            .combined("ChangeTagsForResource")
            .identifier("ResourceId")
            .resource_type_field("ResourceType")
            .tags_field("AddTags")
            .untag_tags_field("RemoveTagKeys"),
        ServiceSpec::new("route53resolver"),
        ServiceSpec::new("sagemaker").operations("AddTags", "DeleteTags"),
        ServiceSpec::new("secretsmanager").identifier("SecretId"),
        ServiceSpec::new("securityhub"),
        ServiceSpec::new("sfn"),
        ServiceSpec::new("sns"),
        ServiceSpec::new("sqs")
            .operations("TagQueue", "UntagQueue")
            .identifier("QueueUrl"),
        ops(ServiceSpec::new("ssm"), ADD_TAGS_TO_RESOURCE)
            .identifier("ResourceId")
            .resource_type_field("ResourceType"),
        ops(ServiceSpec::new("storagegateway"), ADD_TAGS_TO_RESOURCE).identifier("ResourceARN"),
        ServiceSpec::new("swf"),
        ServiceSpec::new("synthetics"),
        ServiceSpec::new("transfer").identifier("Arn"),
        ServiceSpec::new("waf").identifier("ResourceARN"),
        // WAF Regional reuses the global WAF request types.
        ServiceSpec::new("wafregional")
            .tag_package("waf")
            .identifier("ResourceARN"),
        ServiceSpec::new("wafv2").identifier("ResourceARN"),
        ops(ServiceSpec::new("workspaces"), CREATE_TAGS).identifier("ResourceId"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{CallShape, RemovalPayload, Registry};

    #[test]
    fn every_listed_service_has_a_row() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.len(), UPDATE_TAGS_SERVICES.len());
        for service in UPDATE_TAGS_SERVICES {
            assert!(registry.contains(service), "missing row for {service}");
        }
    }

    #[test]
    fn notable_customizations() {
        let registry = Registry::builtin().unwrap();

        let kinesis = registry.get("kinesis").unwrap();
        assert_eq!(kinesis.batch_size().map(std::num::NonZeroUsize::get), Some(10));

        let route53 = registry.get("route53").unwrap();
        assert!(route53.is_combined());
        assert_eq!(route53.resource_type_field(), Some("ResourceType"));

        let ec2 = registry.get("ec2").unwrap();
        assert!(ec2.identifier_requires_sequence());
        assert_eq!(ec2.removal_payload(), &RemovalPayload::KeyValuePairs);

        let elb = registry.get("elb").unwrap();
        assert_eq!(elb.removal_payload(), &RemovalPayload::KeyOnly);

        let cloudfront = registry.get("cloudfront").unwrap();
        assert!(matches!(cloudfront.removal_payload(), RemovalPayload::Custom(_)));

        let wafregional = registry.get("wafregional").unwrap();
        assert_eq!(wafregional.tag_package(), "waf");
        assert_eq!(wafregional.client_type(), "wafregional::Client");

        let combined: Vec<&str> = registry
            .iter()
            .filter(|d| matches!(d.calls(), CallShape::Combined { .. }))
            .map(|d| d.service_id())
            .collect();
        assert_eq!(combined, ["elasticbeanstalk", "route53"]);
    }
}
