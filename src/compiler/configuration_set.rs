//! Configuration set builder.
//!
//! Runs only when the section is enabled; an absent section still yields an
//! enabled set with a generated name. When disabled, nothing is emitted and
//! every event destination downstream is skipped, since there is nothing to
//! attach them to.

use serde_json::json;

use crate::compiler::resource_tags_json;
use crate::config::{StackConfig, StackEnvironment};
use crate::graph::{ResourceGraph, ResourceKind, ResourceNode};

/// Fixed id of the configuration set node.
pub(crate) const CONFIGURATION_SET_ID: &str = "ConfigurationSet";

/// Emits the configuration set node, returning its id, or `None` when the
/// section is disabled.
pub(crate) fn build(
    config: &StackConfig,
    env: &StackEnvironment,
    graph: &mut ResourceGraph,
) -> Option<&'static str> {
    let spec = &config.configuration_set;
    if !spec.enabled {
        tracing::debug!("configuration set disabled, skipping set and destinations");
        return None;
    }

    let name = spec
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-ses-config", env.environment_name));
    tracing::debug!(%name, "building configuration set");

    let reasons: Vec<&str> = spec
        .suppression_reasons
        .iter()
        .map(|reason| reason.as_str())
        .collect();

    let node = ResourceNode::new(CONFIGURATION_SET_ID, ResourceKind::ConfigurationSet)
        .with_property("name", json!(name))
        .with_property(
            "reputationOptions",
            json!({ "reputationMetricsEnabled": spec.reputation_metrics }),
        )
        .with_property("sendingOptions", json!({ "sendingEnabled": spec.sending_enabled }))
        .with_property("deliveryOptions", json!({ "tlsPolicy": spec.tls_policy.as_str() }))
        .with_property("suppressionOptions", json!({ "suppressedReasons": reasons }))
        .with_property("tags", resource_tags_json(env));
    graph.push_node(node);
    Some(CONFIGURATION_SET_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawConfigurationSet, RawStackConfig};

    fn config_with_set(section: Option<RawConfigurationSet>) -> StackConfig {
        RawStackConfig {
            domain: Some("example.com".to_string()),
            configuration_set: section,
            ..RawStackConfig::default()
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_absent_section_yields_default_named_set() {
        let config = config_with_set(None);
        let env = StackEnvironment::default();
        let mut graph = ResourceGraph::new();
        assert_eq!(build(&config, &env, &mut graph), Some(CONFIGURATION_SET_ID));

        let node = graph.node(CONFIGURATION_SET_ID).unwrap();
        assert_eq!(node.properties["name"], "${EnvironmentName}-ses-config");
        assert_eq!(
            node.properties["reputationOptions"]["reputationMetricsEnabled"],
            true
        );
        assert_eq!(node.properties["sendingOptions"]["sendingEnabled"], true);
        assert_eq!(node.properties["deliveryOptions"]["tlsPolicy"], "REQUIRE");
        assert_eq!(
            node.properties["suppressionOptions"]["suppressedReasons"],
            serde_json::json!(["BOUNCE", "COMPLAINT"])
        );
    }

    #[test]
    fn test_explicit_name_wins() {
        let config = config_with_set(Some(RawConfigurationSet {
            name: Some("marketing-sends".to_string()),
            ..RawConfigurationSet::default()
        }));
        let mut graph = ResourceGraph::new();
        build(&config, &StackEnvironment::new("prod", "production"), &mut graph);
        let node = graph.node(CONFIGURATION_SET_ID).unwrap();
        assert_eq!(node.properties["name"], "marketing-sends");
    }

    #[test]
    fn test_disabled_section_emits_nothing() {
        let config = config_with_set(Some(RawConfigurationSet {
            enabled: Some(false),
            ..RawConfigurationSet::default()
        }));
        let mut graph = ResourceGraph::new();
        assert_eq!(build(&config, &StackEnvironment::default(), &mut graph), None);
        assert!(graph.nodes.is_empty());
    }
}
