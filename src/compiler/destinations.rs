//! Event destination compiler.
//!
//! One node per enabled destination, in input order, each wired to the
//! configuration set by reference. Runs only when a configuration set node
//! exists. Payload-field presence and identifier collisions were validated
//! during normalization, so emission cannot fail.

use serde_json::{json, Value};

use crate::config::{destination_display_name, StackConfig};
use crate::graph::{sanitize_logical_id, Reference, ResourceGraph, ResourceKind, ResourceNode};
use crate::types::{DestinationPayload, DimensionConfiguration, DimensionValueSource};

/// The dimension synthesized for a `cloudwatch` destination configured with
/// an empty dimension list.
fn default_dimension() -> DimensionConfiguration {
    DimensionConfiguration::new(
        "ses:configuration-set",
        DimensionValueSource::MessageTag,
        "default",
    )
}

fn dimension_json(dim: &DimensionConfiguration) -> Value {
    json!({
        "dimensionName": dim.name,
        "dimensionValueSource": dim.value_source.as_str(),
        "defaultDimensionValue": dim.default_value,
    })
}

pub(crate) fn build(config: &StackConfig, config_set_id: &str, graph: &mut ResourceGraph) {
    for (index, dest) in config.event_destinations.iter().enumerate() {
        if !dest.enabled {
            continue;
        }
        let display_name = destination_display_name(dest.name.as_deref(), index);
        let logical_id = format!("{}EventDestination", sanitize_logical_id(&display_name));
        tracing::debug!(%logical_id, kind = dest.payload.kind(), "building event destination");

        let events: Vec<&str> = dest.events.iter().map(|event| event.as_str()).collect();
        let mut payload = json!({
            "name": display_name,
            "enabled": true,
            "matchingEventTypes": events,
        });

        match &dest.payload {
            DestinationPayload::Sns { topic_arn } => {
                payload["snsDestination"] = json!({ "topicArn": topic_arn });
            }
            DestinationPayload::CloudWatch { dimensions } => {
                let configs: Vec<Value> = if dimensions.is_empty() {
                    vec![dimension_json(&default_dimension())]
                } else {
                    dimensions.iter().map(dimension_json).collect()
                };
                payload["cloudWatchDestination"] =
                    json!({ "dimensionConfigurations": configs });
            }
            DestinationPayload::KinesisFirehose {
                delivery_stream_arn,
                iam_role_arn,
            } => {
                payload["kinesisFirehoseDestination"] = json!({
                    "deliveryStreamArn": delivery_stream_arn,
                    "iamRoleArn": iam_role_arn,
                });
            }
            DestinationPayload::EventBridge { event_bus_arn } => {
                payload["eventBridgeDestination"] = json!({ "eventBusArn": event_bus_arn });
            }
        }

        let node = ResourceNode::new(logical_id, ResourceKind::EventDestination)
            .with_property("eventDestination", payload)
            .with_reference(Reference::by_id("configurationSetName", config_set_id));
        graph.push_node(node);
    }
}
