//! Normalization: defaults and collect-all validation for raw configurations.

use std::collections::HashMap;

use crate::config::{
    RawConfigurationSet, RawDmarc, RawEventDestination, RawStackConfig, StackConfig,
    ValidationError, ValidationIssue,
};
use crate::graph::sanitize_logical_id;
use crate::types::{
    ConfigurationSetSpec, DestinationPayload, DimensionConfiguration, DimensionValueSource,
    DkimSigningKeyLength, DmarcPolicy, DmarcSpec, EventDestinationSpec, EventType,
    SuppressionListReason, TlsPolicy,
};

impl RawStackConfig {
    /// Validates and defaults this raw configuration into canonical form.
    ///
    /// Every documented default is applied here, once, so the compiler passes
    /// never see an absent field. Validation is collect-all: the returned
    /// [`ValidationError`] lists every violated constraint rather than
    /// stopping at the first. Pure; the input is consumed, nothing else is
    /// touched.
    pub fn normalize(self) -> Result<StackConfig, ValidationError> {
        let mut issues = Vec::new();

        let domain = match self.domain {
            Some(domain) if !domain.trim().is_empty() => domain,
            _ => {
                issues.push(ValidationIssue::new("domain", "a sending domain is required"));
                String::new()
            }
        };

        let dkim_signing_key_length = match self.dkim_signing_key_length {
            None => DkimSigningKeyLength::default(),
            Some(bits) => DkimSigningKeyLength::from_bits(bits).unwrap_or_else(|| {
                issues.push(ValidationIssue::new(
                    "dkim_signing_key_length",
                    format!("must be 1024 or 2048, got {bits}"),
                ));
                DkimSigningKeyLength::default()
            }),
        };

        let mail_from_subdomain = self
            .mail_from_subdomain
            .unwrap_or_else(|| "mail".to_string());

        let configuration_set =
            normalize_configuration_set(self.configuration_set.unwrap_or_default(), &mut issues);

        check_identifier_collisions(&self.event_destinations, &mut issues);

        let event_destinations = self
            .event_destinations
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| normalize_destination(index, raw, &mut issues))
            .collect();

        let dmarc = normalize_dmarc(self.dmarc.unwrap_or_default(), &mut issues);

        if issues.is_empty() {
            Ok(StackConfig {
                domain,
                dkim_signing_key_length,
                mail_from_subdomain,
                manage_dns_records: self.manage_dns_records.unwrap_or(false),
                configuration_set,
                event_destinations,
                dmarc,
            })
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

fn normalize_configuration_set(
    raw: RawConfigurationSet,
    issues: &mut Vec<ValidationIssue>,
) -> ConfigurationSetSpec {
    let tls_policy = match raw.tls_policy.as_deref() {
        None => TlsPolicy::default(),
        Some(name) => TlsPolicy::from_name(name).unwrap_or_else(|| {
            issues.push(ValidationIssue::new(
                "configuration_set.tls_policy",
                format!("unknown TLS policy '{name}' (expected REQUIRE or OPTIONAL)"),
            ));
            TlsPolicy::default()
        }),
    };

    let suppression_reasons = match raw.suppression.and_then(|s| s.reasons) {
        None => vec![SuppressionListReason::Bounce, SuppressionListReason::Complaint],
        Some(names) => names
            .iter()
            .filter_map(|name| {
                SuppressionListReason::from_name(name).or_else(|| {
                    issues.push(ValidationIssue::new(
                        "configuration_set.suppression.reasons",
                        format!("unknown suppression reason '{name}'"),
                    ));
                    None
                })
            })
            .collect(),
    };

    ConfigurationSetSpec {
        enabled: raw.enabled.unwrap_or(true),
        name: raw.name,
        reputation_metrics: raw.reputation_metrics.unwrap_or(true),
        sending_enabled: raw.sending_enabled.unwrap_or(true),
        tls_policy,
        suppression_reasons,
    }
}

/// Derives the display name a destination resolves to: the explicit name, or
/// `destination<index>` when absent.
pub(crate) fn destination_display_name(name: Option<&str>, index: usize) -> String {
    name.map_or_else(|| format!("destination{index}"), str::to_string)
}

/// Two destinations must not collapse to the same sanitized logical id;
/// colliding ids would silently shadow each other in the graph, so they are
/// an explicit error. Only enabled entries are checked, since disabled ones
/// emit nothing.
fn check_identifier_collisions(
    destinations: &[RawEventDestination],
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen: HashMap<String, String> = HashMap::new();
    for (index, raw) in destinations.iter().enumerate() {
        if !raw.enabled.unwrap_or(true) {
            continue;
        }
        let display = destination_display_name(raw.name.as_deref(), index);
        let logical = sanitize_logical_id(&display);
        if logical.is_empty() {
            issues.push(ValidationIssue::new(
                format!("event_destinations[{index}].name"),
                format!("'{display}' sanitizes to an empty identifier"),
            ));
            continue;
        }
        match seen.get(&logical) {
            Some(previous) => issues.push(ValidationIssue::new(
                format!("event_destinations[{index}].name"),
                format!("'{display}' and '{previous}' collapse to the same identifier '{logical}'"),
            )),
            None => {
                seen.insert(logical, display);
            }
        }
    }
}

fn normalize_destination(
    index: usize,
    raw: RawEventDestination,
    issues: &mut Vec<ValidationIssue>,
) -> Option<EventDestinationSpec> {
    let path = |field: &str| format!("event_destinations[{index}].{field}");

    let events = match raw.events {
        None => EventType::default_set(),
        Some(names) => names
            .iter()
            .filter_map(|name| {
                EventType::from_name(name).or_else(|| {
                    issues.push(ValidationIssue::new(
                        path("events"),
                        format!("unknown event type '{name}'"),
                    ));
                    None
                })
            })
            .collect(),
    };

    let payload = match raw.kind.as_deref() {
        None => {
            issues.push(ValidationIssue::new(path("type"), "a destination type is required"));
            None
        }
        Some("sns") => match raw.topic_arn {
            Some(topic_arn) => Some(DestinationPayload::Sns { topic_arn }),
            None => {
                issues.push(ValidationIssue::new(
                    path("topic_arn"),
                    "sns destinations require a topic ARN",
                ));
                None
            }
        },
        Some("cloudwatch") => {
            let dimensions = raw
                .dimensions
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .filter_map(|(dim_index, dim)| {
                    let name = match dim.name {
                        Some(name) => name,
                        None => {
                            issues.push(ValidationIssue::new(
                                path(&format!("dimensions[{dim_index}].name")),
                                "a dimension name is required",
                            ));
                            return None;
                        }
                    };
                    let value_source = match dim.source.as_deref() {
                        None => DimensionValueSource::default(),
                        Some(source) => {
                            DimensionValueSource::from_name(source).unwrap_or_else(|| {
                                issues.push(ValidationIssue::new(
                                    path(&format!("dimensions[{dim_index}].source")),
                                    format!("unknown dimension value source '{source}'"),
                                ));
                                DimensionValueSource::default()
                            })
                        }
                    };
                    Some(DimensionConfiguration {
                        name,
                        value_source,
                        default_value: dim.default_value.unwrap_or_else(|| "none".to_string()),
                    })
                })
                .collect();
            Some(DestinationPayload::CloudWatch { dimensions })
        }
        Some("kinesis_firehose") => {
            let delivery_stream_arn = raw.delivery_stream_arn.or_else(|| {
                issues.push(ValidationIssue::new(
                    path("delivery_stream_arn"),
                    "kinesis_firehose destinations require a delivery stream ARN",
                ));
                None
            });
            let iam_role_arn = raw.iam_role_arn.or_else(|| {
                issues.push(ValidationIssue::new(
                    path("iam_role_arn"),
                    "kinesis_firehose destinations require an IAM role ARN",
                ));
                None
            });
            match (delivery_stream_arn, iam_role_arn) {
                (Some(delivery_stream_arn), Some(iam_role_arn)) => {
                    Some(DestinationPayload::KinesisFirehose {
                        delivery_stream_arn,
                        iam_role_arn,
                    })
                }
                _ => None,
            }
        }
        Some("eventbridge") => match raw.event_bus_arn {
            Some(event_bus_arn) => Some(DestinationPayload::EventBridge { event_bus_arn }),
            None => {
                issues.push(ValidationIssue::new(
                    path("event_bus_arn"),
                    "eventbridge destinations require an event bus ARN",
                ));
                None
            }
        },
        Some(unknown) => {
            issues.push(ValidationIssue::new(
                path("type"),
                format!(
                    "unknown destination type '{unknown}' (expected sns, cloudwatch, kinesis_firehose, or eventbridge)"
                ),
            ));
            None
        }
    };

    Some(EventDestinationSpec {
        name: raw.name,
        enabled: raw.enabled.unwrap_or(true),
        events,
        payload: payload?,
    })
}

fn normalize_dmarc(raw: RawDmarc, issues: &mut Vec<ValidationIssue>) -> DmarcSpec {
    let policy = match raw.policy.as_deref() {
        None => DmarcPolicy::default(),
        Some(name) => DmarcPolicy::from_name(name).unwrap_or_else(|| {
            issues.push(ValidationIssue::new(
                "dmarc.policy",
                format!("unknown DMARC policy '{name}' (expected none, quarantine, or reject)"),
            ));
            DmarcPolicy::default()
        }),
    };

    let pct = match raw.pct {
        None => 100,
        Some(pct) if pct <= 100 => pct as u8,
        Some(pct) => {
            issues.push(ValidationIssue::new(
                "dmarc.pct",
                format!("must be within 0..=100, got {pct}"),
            ));
            100
        }
    };

    // An empty report address means "no clause", same as absent.
    let non_empty = |value: Option<String>| value.filter(|s| !s.is_empty());

    DmarcSpec {
        policy,
        rua: non_empty(raw.rua),
        ruf: non_empty(raw.ruf),
        pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawDimension, RawSuppression};

    fn minimal_raw() -> RawStackConfig {
        RawStackConfig {
            domain: Some("example.com".to_string()),
            ..RawStackConfig::default()
        }
    }

    fn sns_destination(name: &str) -> RawEventDestination {
        RawEventDestination {
            name: Some(name.to_string()),
            kind: Some("sns".to_string()),
            topic_arn: Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
            ..RawEventDestination::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let config = minimal_raw().normalize().unwrap();
        assert_eq!(config.domain, "example.com");
        assert_eq!(config.dkim_signing_key_length, DkimSigningKeyLength::Rsa2048Bit);
        assert_eq!(config.mail_from_subdomain, "mail");
        assert!(!config.manage_dns_records);
        assert!(config.configuration_set.enabled);
        assert!(config.event_destinations.is_empty());
        assert_eq!(config.dmarc, DmarcSpec::default());
    }

    #[test]
    fn test_missing_domain_is_an_error() {
        let err = RawStackConfig::default().normalize().unwrap_err();
        assert!(err.mentions("domain"));
    }

    #[test]
    fn test_collect_all_reports_every_violation() {
        let raw = RawStackConfig {
            domain: None,
            dkim_signing_key_length: Some(4096),
            configuration_set: Some(RawConfigurationSet {
                tls_policy: Some("MAYBE".to_string()),
                suppression: Some(RawSuppression {
                    reasons: Some(vec!["BOUNCE".to_string(), "SPAM".to_string()]),
                }),
                ..RawConfigurationSet::default()
            }),
            event_destinations: vec![RawEventDestination {
                kind: Some("pigeon".to_string()),
                ..RawEventDestination::default()
            }],
            dmarc: Some(RawDmarc {
                pct: Some(250),
                ..RawDmarc::default()
            }),
            ..RawStackConfig::default()
        };
        let err = raw.normalize().unwrap_err();
        assert!(err.mentions("domain"));
        assert!(err.mentions("dkim_signing_key_length"));
        assert!(err.mentions("configuration_set.tls_policy"));
        assert!(err.mentions("configuration_set.suppression.reasons"));
        assert!(err.mentions("event_destinations[0].type"));
        assert!(err.mentions("dmarc.pct"));
        assert_eq!(err.issues.len(), 6);
    }

    #[test]
    fn test_sns_requires_topic_arn() {
        let mut raw = minimal_raw();
        raw.event_destinations = vec![RawEventDestination {
            kind: Some("sns".to_string()),
            ..RawEventDestination::default()
        }];
        let err = raw.normalize().unwrap_err();
        assert!(err.mentions("event_destinations[0].topic_arn"));
    }

    #[test]
    fn test_kinesis_firehose_requires_both_arns() {
        let mut raw = minimal_raw();
        raw.event_destinations = vec![RawEventDestination {
            kind: Some("kinesis_firehose".to_string()),
            ..RawEventDestination::default()
        }];
        let err = raw.normalize().unwrap_err();
        assert!(err.mentions("event_destinations[0].delivery_stream_arn"));
        assert!(err.mentions("event_destinations[0].iam_role_arn"));
    }

    #[test]
    fn test_identifier_collision_is_an_error() {
        let mut raw = minimal_raw();
        raw.event_destinations = vec![sns_destination("primary"), sns_destination("Primary!")];
        let err = raw.normalize().unwrap_err();
        assert!(err.mentions("event_destinations[1].name"));
        let issue = &err.issues[0];
        assert!(issue.message.contains("'Primary'"), "{}", issue.message);
    }

    #[test]
    fn test_disabled_destinations_do_not_collide() {
        let mut raw = minimal_raw();
        let mut disabled = sns_destination("primary");
        disabled.enabled = Some(false);
        raw.event_destinations = vec![disabled, sns_destination("Primary!")];
        let config = raw.normalize().unwrap();
        assert_eq!(config.event_destinations.len(), 2);
    }

    #[test]
    fn test_cloudwatch_dimension_defaults() {
        let mut raw = minimal_raw();
        raw.event_destinations = vec![RawEventDestination {
            kind: Some("cloudwatch".to_string()),
            dimensions: Some(vec![RawDimension {
                name: Some("campaign".to_string()),
                ..RawDimension::default()
            }]),
            ..RawEventDestination::default()
        }];
        let config = raw.normalize().unwrap();
        match &config.event_destinations[0].payload {
            DestinationPayload::CloudWatch { dimensions } => {
                assert_eq!(
                    dimensions[0],
                    DimensionConfiguration::new("campaign", DimensionValueSource::MessageTag, "none")
                );
            }
            other => panic!("expected cloudwatch payload, got {other:?}"),
        }
    }

    #[test]
    fn test_dmarc_empty_addresses_dropped() {
        let mut raw = minimal_raw();
        raw.dmarc = Some(RawDmarc {
            policy: Some("reject".to_string()),
            rua: Some("ops@example.com".to_string()),
            ruf: Some(String::new()),
            pct: Some(50),
        });
        let config = raw.normalize().unwrap();
        assert_eq!(config.dmarc.rua.as_deref(), Some("ops@example.com"));
        assert!(config.dmarc.ruf.is_none());
        assert_eq!(config.dmarc.pct, 50);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = RawStackConfig {
            domain: Some("example.com".to_string()),
            dkim_signing_key_length: Some(1024),
            mail_from_subdomain: Some("bounce".to_string()),
            manage_dns_records: Some(true),
            configuration_set: Some(RawConfigurationSet {
                name: Some("custom-set".to_string()),
                tls_policy: Some("OPTIONAL".to_string()),
                ..RawConfigurationSet::default()
            }),
            event_destinations: vec![
                sns_destination("alerts"),
                RawEventDestination {
                    name: Some("metrics".to_string()),
                    kind: Some("cloudwatch".to_string()),
                    dimensions: Some(vec![]),
                    ..RawEventDestination::default()
                },
            ],
            dmarc: Some(RawDmarc {
                policy: Some("quarantine".to_string()),
                rua: Some("agg@example.com".to_string()),
                ..RawDmarc::default()
            }),
        };
        let canonical = raw.normalize().unwrap();
        let again = canonical.to_raw().normalize().unwrap();
        assert_eq!(canonical, again);
    }
}
