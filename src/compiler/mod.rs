//! The compiler: turns a canonical configuration into a resource graph.
//!
//! Passes run in a fixed order — identity, configuration set, event
//! destinations, DNS records, outputs — and later passes may reference nodes
//! created by earlier ones, never the other way around. Compilation is a pure
//! function of the configuration and environment: single-threaded, single
//! pass, no partial success.

mod configuration_set;
mod destinations;
mod dns;
mod identity;
mod outputs;

use serde_json::{json, Value};

use crate::config::{RawStackConfig, StackConfig, StackEnvironment};
use crate::graph::ResourceGraph;

/// Compiles a canonical configuration into a resource graph.
///
/// Node emission order is deterministic and matches input order, which the
/// provisioning engine may rely on for display and diffing.
///
/// # Errors
///
/// [`CompileError::Configuration`](crate::CompileError::Configuration) when
/// `manage_dns_records` is set but the environment carries no hosted-zone id.
pub fn compile(config: &StackConfig, env: &StackEnvironment) -> crate::Result<ResourceGraph> {
    let span = tracing::debug_span!("compile", domain = %config.domain);
    let _guard = span.enter();

    let mut graph = ResourceGraph::new();

    identity::build(config, env, &mut graph);

    let config_set_id = configuration_set::build(config, env, &mut graph);
    if let Some(id) = config_set_id {
        destinations::build(config, id, &mut graph);
    }

    if config.manage_dns_records {
        dns::build(config, env, &mut graph)?;
    }

    outputs::export(config, env, config_set_id, &mut graph);

    tracing::debug!(
        nodes = graph.nodes.len(),
        outputs = graph.outputs.len(),
        "compilation complete"
    );
    Ok(graph)
}

/// Normalizes a raw configuration and compiles it in one step.
///
/// # Errors
///
/// [`CompileError::Validation`](crate::CompileError::Validation) listing every
/// violated input constraint, or the errors of [`compile`].
pub fn compile_raw(raw: RawStackConfig, env: &StackEnvironment) -> crate::Result<ResourceGraph> {
    let config = raw.normalize()?;
    compile(&config, env)
}

/// The environment's tag list as a JSON property value.
pub(crate) fn resource_tags_json(env: &StackEnvironment) -> Value {
    json!(env.resource_tags())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawConfigurationSet, RawDmarc, RawEventDestination, RawStackConfig};
    use crate::graph::ResourceKind;

    fn raw_with_destinations(destinations: Vec<RawEventDestination>) -> RawStackConfig {
        RawStackConfig {
            domain: Some("example.com".to_string()),
            event_destinations: destinations,
            ..RawStackConfig::default()
        }
    }

    fn sns(name: &str) -> RawEventDestination {
        RawEventDestination {
            name: Some(name.to_string()),
            kind: Some("sns".to_string()),
            topic_arn: Some("arn:aws:sns:us-east-1:123456789012:alerts".to_string()),
            ..RawEventDestination::default()
        }
    }

    #[test]
    fn test_exactly_one_identity_node() {
        let graph =
            compile_raw(raw_with_destinations(vec![]), &StackEnvironment::default()).unwrap();
        assert_eq!(graph.nodes_of_kind(ResourceKind::EmailIdentity).count(), 1);
    }

    #[test]
    fn test_emission_order_is_deterministic() {
        let graph = compile_raw(
            raw_with_destinations(vec![sns("alpha"), sns("beta")]),
            &StackEnvironment::default(),
        )
        .unwrap();
        let ids: Vec<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "EmailIdentity",
                "ConfigurationSet",
                "AlphaEventDestination",
                "BetaEventDestination",
            ]
        );
    }

    #[test]
    fn test_disabled_configuration_set_suppresses_destinations() {
        let mut raw = raw_with_destinations(vec![sns("alpha"), sns("beta")]);
        raw.configuration_set = Some(RawConfigurationSet {
            enabled: Some(false),
            ..RawConfigurationSet::default()
        });
        let graph = compile_raw(raw, &StackEnvironment::default()).unwrap();
        assert_eq!(graph.nodes_of_kind(ResourceKind::ConfigurationSet).count(), 0);
        assert_eq!(graph.nodes_of_kind(ResourceKind::EventDestination).count(), 0);
        assert!(graph.output("ConfigurationSetName").is_none());
    }

    #[test]
    fn test_no_dns_nodes_without_manage_flag() {
        let mut raw = raw_with_destinations(vec![]);
        raw.dmarc = Some(RawDmarc {
            policy: Some("reject".to_string()),
            rua: Some("ops@example.com".to_string()),
            ..RawDmarc::default()
        });
        let graph = compile_raw(raw, &StackEnvironment::default()).unwrap();
        assert_eq!(graph.nodes_of_kind(ResourceKind::DnsRecord).count(), 0);
    }

    #[test]
    fn test_dns_failure_leaves_no_partial_graph_exposed() {
        let mut raw = raw_with_destinations(vec![]);
        raw.manage_dns_records = Some(true);
        let err = compile_raw(raw, &StackEnvironment::default()).unwrap_err();
        assert!(matches!(err, crate::CompileError::Configuration { .. }));
    }

    #[test]
    fn test_validation_errors_propagate_from_compile_raw() {
        let err = compile_raw(RawStackConfig::default(), &StackEnvironment::default()).unwrap_err();
        assert!(err.validation_issues().is_some());
    }
}
