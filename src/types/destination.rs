//! Event destination types.
//!
//! An event destination routes notifications about delivery lifecycle events
//! to a telemetry target. The payload is a closed tagged variant over the four
//! supported destination kinds, so an unsupported kind cannot be represented.

use serde::{Deserialize, Serialize};

/// Delivery lifecycle events a destination can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Message accepted for sending.
    Send,
    /// Message rejected before sending.
    Reject,
    /// Message bounced.
    Bounce,
    /// Recipient complained.
    Complaint,
    /// Message delivered.
    Delivery,
    /// Message opened.
    Open,
    /// Link in the message clicked.
    Click,
    /// Template rendering failed.
    RenderingFailure,
}

impl EventType {
    /// Returns the string representation used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Send => "SEND",
            EventType::Reject => "REJECT",
            EventType::Bounce => "BOUNCE",
            EventType::Complaint => "COMPLAINT",
            EventType::Delivery => "DELIVERY",
            EventType::Open => "OPEN",
            EventType::Click => "CLICK",
            EventType::RenderingFailure => "RENDERING_FAILURE",
        }
    }

    /// Parses the schema string representation.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SEND" => Some(EventType::Send),
            "REJECT" => Some(EventType::Reject),
            "BOUNCE" => Some(EventType::Bounce),
            "COMPLAINT" => Some(EventType::Complaint),
            "DELIVERY" => Some(EventType::Delivery),
            "OPEN" => Some(EventType::Open),
            "CLICK" => Some(EventType::Click),
            "RENDERING_FAILURE" => Some(EventType::RenderingFailure),
            _ => None,
        }
    }

    /// The default event subscription: send, delivery, bounce, complaint.
    pub fn default_set() -> Vec<EventType> {
        vec![
            EventType::Send,
            EventType::Delivery,
            EventType::Bounce,
            EventType::Complaint,
        ]
    }
}

/// Source of a CloudWatch dimension value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionValueSource {
    /// Read from a message tag.
    MessageTag,
    /// Read from an email header.
    EmailHeader,
    /// Read from a link tag.
    LinkTag,
}

impl DimensionValueSource {
    /// Returns the string representation used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionValueSource::MessageTag => "messageTag",
            DimensionValueSource::EmailHeader => "emailHeader",
            DimensionValueSource::LinkTag => "linkTag",
        }
    }

    /// Parses the schema string representation.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "messageTag" => Some(DimensionValueSource::MessageTag),
            "emailHeader" => Some(DimensionValueSource::EmailHeader),
            "linkTag" => Some(DimensionValueSource::LinkTag),
            _ => None,
        }
    }
}

impl Default for DimensionValueSource {
    fn default() -> Self {
        DimensionValueSource::MessageTag
    }
}

/// CloudWatch dimension configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfiguration {
    /// Dimension name.
    pub name: String,
    /// Where the dimension value is read from.
    pub value_source: DimensionValueSource,
    /// Value used when the source provides none.
    pub default_value: String,
}

impl DimensionConfiguration {
    /// Create a new dimension configuration.
    pub fn new(
        name: impl Into<String>,
        value_source: DimensionValueSource,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value_source,
            default_value: default_value.into(),
        }
    }
}

/// Type-specific destination payload.
///
/// Each variant carries only the fields its destination kind requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DestinationPayload {
    /// Publish events to an SNS topic.
    Sns {
        /// ARN of the SNS topic.
        topic_arn: String,
    },
    /// Publish events as CloudWatch metrics.
    #[serde(rename = "cloudwatch")]
    CloudWatch {
        /// Dimension configurations; an empty list gets a synthesized default
        /// dimension at emission time.
        dimensions: Vec<DimensionConfiguration>,
    },
    /// Stream events to a Kinesis Firehose delivery stream.
    KinesisFirehose {
        /// ARN of the delivery stream.
        delivery_stream_arn: String,
        /// ARN of the IAM role used to publish to the stream.
        iam_role_arn: String,
    },
    /// Publish events to an EventBridge bus.
    #[serde(rename = "eventbridge")]
    EventBridge {
        /// ARN of the event bus.
        event_bus_arn: String,
    },
}

impl DestinationPayload {
    /// Returns the destination type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            DestinationPayload::Sns { .. } => "sns",
            DestinationPayload::CloudWatch { .. } => "cloudwatch",
            DestinationPayload::KinesisFirehose { .. } => "kinesis_firehose",
            DestinationPayload::EventBridge { .. } => "eventbridge",
        }
    }
}

/// Canonical event destination entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDestinationSpec {
    /// Destination name; `destination<index>` is used when absent.
    pub name: Option<String>,
    /// Whether this destination emits a resource node.
    pub enabled: bool,
    /// Subscribed event types, in input order.
    pub events: Vec<EventType>,
    /// Type-specific payload.
    pub payload: DestinationPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parsing() {
        assert_eq!(EventType::from_name("SEND"), Some(EventType::Send));
        assert_eq!(
            EventType::from_name("RENDERING_FAILURE"),
            Some(EventType::RenderingFailure)
        );
        assert_eq!(EventType::from_name("DELIVERY_DELAY"), None);
        assert_eq!(EventType::Click.as_str(), "CLICK");
    }

    #[test]
    fn test_default_event_set() {
        assert_eq!(
            EventType::default_set(),
            vec![
                EventType::Send,
                EventType::Delivery,
                EventType::Bounce,
                EventType::Complaint
            ]
        );
    }

    #[test]
    fn test_dimension_value_source() {
        assert_eq!(
            DimensionValueSource::from_name("messageTag"),
            Some(DimensionValueSource::MessageTag)
        );
        assert_eq!(DimensionValueSource::from_name("MESSAGE_TAG"), None);
        assert_eq!(DimensionValueSource::default().as_str(), "messageTag");
    }

    #[test]
    fn test_payload_kind_tags() {
        let sns = DestinationPayload::Sns {
            topic_arn: "arn:aws:sns:us-east-1:123456789012:alerts".to_string(),
        };
        assert_eq!(sns.kind(), "sns");

        let cw = DestinationPayload::CloudWatch { dimensions: vec![] };
        assert_eq!(cw.kind(), "cloudwatch");

        let firehose = DestinationPayload::KinesisFirehose {
            delivery_stream_arn: "arn:aws:firehose:us-east-1:123456789012:deliverystream/s".into(),
            iam_role_arn: "arn:aws:iam::123456789012:role/ses-firehose".into(),
        };
        assert_eq!(firehose.kind(), "kinesis_firehose");

        let bus = DestinationPayload::EventBridge {
            event_bus_arn: "arn:aws:events:us-east-1:123456789012:event-bus/default".into(),
        };
        assert_eq!(bus.kind(), "eventbridge");
    }

    #[test]
    fn test_payload_serde_tag() {
        let payload = DestinationPayload::EventBridge {
            event_bus_arn: "arn:aws:events:us-east-1:123456789012:event-bus/default".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "eventbridge");

        let parsed: DestinationPayload = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, payload);
    }
}
