//! Input configuration for the SES stack compiler.
//!
//! The raw structs mirror the loosely-typed configuration handed in by the
//! outer scaffold: every field optional, enum slots carried as strings, and
//! the defaulting rules left to [`RawStackConfig::normalize`]. Normalization
//! applies all documented defaults once and validates collect-all, producing
//! the canonical [`StackConfig`] the compiler passes consume.

use serde::{Deserialize, Serialize};

mod normalize;

pub(crate) use normalize::destination_display_name;

pub mod error;
pub use error::{ValidationError, ValidationIssue};

use crate::types::{
    ConfigurationSetSpec, DkimSigningKeyLength, DmarcSpec, EventDestinationSpec, Tag,
};

/// Raw, unvalidated stack configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStackConfig {
    /// Sending domain; may itself contain a `${...}` stack-parameter template.
    pub domain: Option<String>,
    /// DKIM signing key length in bits; must be 1024 or 2048.
    pub dkim_signing_key_length: Option<u32>,
    /// Subdomain used for the mail-from domain.
    pub mail_from_subdomain: Option<String>,
    /// Whether DNS records are emitted; requires a hosted-zone reference.
    pub manage_dns_records: Option<bool>,
    /// Configuration set section.
    pub configuration_set: Option<RawConfigurationSet>,
    /// Event destinations, in input order.
    pub event_destinations: Vec<RawEventDestination>,
    /// DMARC section; only meaningful when DNS records are managed.
    pub dmarc: Option<RawDmarc>,
}

/// Raw configuration set section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfigurationSet {
    /// Whether the configuration set is built at all.
    pub enabled: Option<bool>,
    /// Explicit set name.
    pub name: Option<String>,
    /// Whether reputation metrics are enabled.
    pub reputation_metrics: Option<bool>,
    /// Whether sending is enabled.
    pub sending_enabled: Option<bool>,
    /// TLS policy, `REQUIRE` or `OPTIONAL`.
    pub tls_policy: Option<String>,
    /// Suppression sub-section.
    pub suppression: Option<RawSuppression>,
}

/// Raw suppression sub-section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSuppression {
    /// Suppression reasons, `BOUNCE` and/or `COMPLAINT`.
    pub reasons: Option<Vec<String>>,
}

/// Raw event destination entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventDestination {
    /// Destination name.
    pub name: Option<String>,
    /// Whether this destination is emitted.
    pub enabled: Option<bool>,
    /// Destination type: `sns`, `cloudwatch`, `kinesis_firehose`, `eventbridge`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Subscribed event types.
    pub events: Option<Vec<String>>,
    /// SNS topic ARN (`sns` destinations).
    pub topic_arn: Option<String>,
    /// CloudWatch dimensions (`cloudwatch` destinations).
    pub dimensions: Option<Vec<RawDimension>>,
    /// Kinesis Firehose delivery stream ARN (`kinesis_firehose` destinations).
    pub delivery_stream_arn: Option<String>,
    /// IAM role ARN used to publish to the stream (`kinesis_firehose` destinations).
    pub iam_role_arn: Option<String>,
    /// EventBridge bus ARN (`eventbridge` destinations).
    pub event_bus_arn: Option<String>,
}

/// Raw CloudWatch dimension entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDimension {
    /// Dimension name (required).
    pub name: Option<String>,
    /// Dimension value source; defaults to `messageTag`.
    pub source: Option<String>,
    /// Default dimension value; defaults to `none`.
    pub default_value: Option<String>,
}

/// Raw DMARC section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDmarc {
    /// Policy: `none`, `quarantine`, or `reject`.
    pub policy: Option<String>,
    /// Aggregate report address.
    pub rua: Option<String>,
    /// Forensic report address.
    pub ruf: Option<String>,
    /// Percentage of messages the policy applies to, 0 to 100.
    pub pct: Option<u32>,
}

/// Canonical, validated stack configuration.
///
/// Immutable once produced; compilation is a pure function of this value and
/// the [`StackEnvironment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    /// Sending domain.
    pub domain: String,
    /// DKIM signing key length.
    pub dkim_signing_key_length: DkimSigningKeyLength,
    /// Subdomain used for the mail-from domain.
    pub mail_from_subdomain: String,
    /// Whether DNS record nodes are emitted.
    pub manage_dns_records: bool,
    /// Configuration set section with defaults applied.
    pub configuration_set: ConfigurationSetSpec,
    /// Event destinations, in input order.
    pub event_destinations: Vec<EventDestinationSpec>,
    /// DMARC section with defaults applied.
    pub dmarc: DmarcSpec,
}

impl StackConfig {
    /// Lowers the canonical form back into its raw representation.
    ///
    /// Normalizing the result yields this configuration again, which is how
    /// normalization idempotency is stated and tested.
    pub fn to_raw(&self) -> RawStackConfig {
        use crate::types::DestinationPayload;

        RawStackConfig {
            domain: Some(self.domain.clone()),
            dkim_signing_key_length: Some(self.dkim_signing_key_length.bits()),
            mail_from_subdomain: Some(self.mail_from_subdomain.clone()),
            manage_dns_records: Some(self.manage_dns_records),
            configuration_set: Some(RawConfigurationSet {
                enabled: Some(self.configuration_set.enabled),
                name: self.configuration_set.name.clone(),
                reputation_metrics: Some(self.configuration_set.reputation_metrics),
                sending_enabled: Some(self.configuration_set.sending_enabled),
                tls_policy: Some(self.configuration_set.tls_policy.as_str().to_string()),
                suppression: Some(RawSuppression {
                    reasons: Some(
                        self.configuration_set
                            .suppression_reasons
                            .iter()
                            .map(|reason| reason.as_str().to_string())
                            .collect(),
                    ),
                }),
            }),
            event_destinations: self
                .event_destinations
                .iter()
                .map(|dest| {
                    let mut raw = RawEventDestination {
                        name: dest.name.clone(),
                        enabled: Some(dest.enabled),
                        kind: Some(dest.payload.kind().to_string()),
                        events: Some(
                            dest.events
                                .iter()
                                .map(|event| event.as_str().to_string())
                                .collect(),
                        ),
                        ..RawEventDestination::default()
                    };
                    match &dest.payload {
                        DestinationPayload::Sns { topic_arn } => {
                            raw.topic_arn = Some(topic_arn.clone());
                        }
                        DestinationPayload::CloudWatch { dimensions } => {
                            raw.dimensions = Some(
                                dimensions
                                    .iter()
                                    .map(|dim| RawDimension {
                                        name: Some(dim.name.clone()),
                                        source: Some(dim.value_source.as_str().to_string()),
                                        default_value: Some(dim.default_value.clone()),
                                    })
                                    .collect(),
                            );
                        }
                        DestinationPayload::KinesisFirehose {
                            delivery_stream_arn,
                            iam_role_arn,
                        } => {
                            raw.delivery_stream_arn = Some(delivery_stream_arn.clone());
                            raw.iam_role_arn = Some(iam_role_arn.clone());
                        }
                        DestinationPayload::EventBridge { event_bus_arn } => {
                            raw.event_bus_arn = Some(event_bus_arn.clone());
                        }
                    }
                    raw
                })
                .collect(),
            dmarc: Some(RawDmarc {
                policy: Some(self.dmarc.policy.as_str().to_string()),
                rua: self.dmarc.rua.clone(),
                ruf: self.dmarc.ruf.clone(),
                pct: Some(u32::from(self.dmarc.pct)),
            }),
        }
    }
}

/// External inputs supplied by the outer parameter scaffold.
///
/// All strings are opaque to the compiler: they may be literals or `${...}`
/// template placeholders resolved by the provisioning engine. The defaults
/// are the placeholder forms, so generated names and export names render as
/// runtime-resolved templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackEnvironment {
    /// Environment name, used in generated names and export prefixes.
    pub environment_name: String,
    /// Environment type, used in default tags.
    pub environment_type: String,
    /// Hosted-zone identifier; required when DNS records are managed.
    pub hosted_zone_id: Option<String>,
    /// Additional tags appended after the default Environment tags.
    pub tags: Vec<Tag>,
}

impl Default for StackEnvironment {
    fn default() -> Self {
        Self {
            environment_name: "${EnvironmentName}".to_string(),
            environment_type: "${EnvironmentType}".to_string(),
            hosted_zone_id: None,
            tags: Vec::new(),
        }
    }
}

impl StackEnvironment {
    /// Create an environment with explicit name and type.
    pub fn new(environment_name: impl Into<String>, environment_type: impl Into<String>) -> Self {
        Self {
            environment_name: environment_name.into(),
            environment_type: environment_type.into(),
            ..Self::default()
        }
    }

    /// Set the hosted-zone identifier.
    pub fn with_hosted_zone(mut self, hosted_zone_id: impl Into<String>) -> Self {
        self.hosted_zone_id = Some(hosted_zone_id.into());
        self
    }

    /// Append a tag to the mapping.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    /// The full tag list applied to taggable resources.
    ///
    /// The default `Environment` and `EnvironmentType` tags come first,
    /// followed by the supplied mapping in order.
    pub fn resource_tags(&self) -> Vec<Tag> {
        let mut tags = vec![
            Tag::new("Environment", &self.environment_name),
            Tag::new("EnvironmentType", &self.environment_type),
        ];
        tags.extend(self.tags.iter().cloned());
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_are_placeholders() {
        let env = StackEnvironment::default();
        assert_eq!(env.environment_name, "${EnvironmentName}");
        assert_eq!(env.environment_type, "${EnvironmentType}");
        assert!(env.hosted_zone_id.is_none());
    }

    #[test]
    fn test_resource_tags_order() {
        let env = StackEnvironment::new("prod", "production")
            .with_tag("Team", "platform")
            .with_tag("CostCenter", "1234");
        let tags = env.resource_tags();
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[0], Tag::new("Environment", "prod"));
        assert_eq!(tags[1], Tag::new("EnvironmentType", "production"));
        assert_eq!(tags[2], Tag::new("Team", "platform"));
        assert_eq!(tags[3], Tag::new("CostCenter", "1234"));
    }

    #[test]
    fn test_raw_config_deserializes_from_json() {
        let raw: RawStackConfig = serde_json::from_str(
            r#"{
                "domain": "example.com",
                "event_destinations": [
                    {"type": "sns", "topic_arn": "arn:aws:sns:us-east-1:123456789012:alerts"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(raw.domain.as_deref(), Some("example.com"));
        assert_eq!(raw.event_destinations.len(), 1);
        assert_eq!(raw.event_destinations[0].kind.as_deref(), Some("sns"));
    }
}
