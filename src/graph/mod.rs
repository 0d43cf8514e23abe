//! Resource graph model.
//!
//! Compilation produces a graph of resource node declarations plus reference
//! edges, serializable to whatever declarative format the provisioning engine
//! speaks. Nodes are write-once and insertion-ordered; the engine may use
//! declaration order for display and diffing, so order is part of the
//! contract.
//!
//! A referenced property (a node id or an attribute resolved at apply time)
//! appears only as a [`Reference`] edge, never as a literal in `properties`;
//! the engine splices the resolved value at the edge's `property_path`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Kind of a resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    /// Domain identity (DKIM + mail-from policy).
    EmailIdentity,
    /// Delivery-configuration bundle.
    ConfigurationSet,
    /// Notification destination wired to the configuration set.
    EventDestination,
    /// DNS record in the hosted zone.
    DnsRecord,
}

impl ResourceKind {
    /// Returns the kind name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::EmailIdentity => "EmailIdentity",
            ResourceKind::ConfigurationSet => "ConfigurationSet",
            ResourceKind::EventDestination => "EventDestination",
            ResourceKind::DnsRecord => "DnsRecord",
        }
    }
}

/// A reference edge from a node property to another node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Where the resolved value is spliced into the owning node's properties.
    pub property_path: String,
    /// Id of the referenced node.
    pub target_id: String,
    /// Attribute looked up on the target; `None` means the target's own
    /// generated identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_attribute: Option<String>,
}

impl Reference {
    /// Reference the target node's generated identifier.
    pub fn by_id(property_path: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            target_id: target_id.into(),
            target_attribute: None,
        }
    }

    /// Reference an attribute the target node exposes at apply time.
    pub fn by_attribute(
        property_path: impl Into<String>,
        target_id: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            target_id: target_id.into(),
            target_attribute: Some(attribute.into()),
        }
    }
}

/// A single resource declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    /// Unique id, derived deterministically from the resource's logical name.
    pub id: String,
    /// Resource kind.
    pub kind: ResourceKind,
    /// Literal properties, in insertion order.
    pub properties: Map<String, Value>,
    /// Reference edges, in insertion order.
    pub references: Vec<Reference>,
}

impl ResourceNode {
    /// Create an empty node.
    pub fn new(id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            properties: Map::new(),
            references: Vec::new(),
        }
    }

    /// Append a literal property.
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Append a reference edge.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }
}

/// Value of an exported output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputValue {
    /// Literal string, possibly containing `${...}` placeholders resolved by
    /// the engine.
    Template(String),
    /// The generated identifier of a node.
    Ref {
        /// Id of the referenced node.
        target_id: String,
    },
    /// An attribute a node exposes at apply time.
    Attribute {
        /// Id of the referenced node.
        target_id: String,
        /// Attribute name on the target.
        attribute: String,
    },
}

/// A named value handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedValue {
    /// Output name, stable across recompilations of the same configuration.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// The exported value.
    pub value: OutputValue,
    /// Cross-stack export name, when the value is exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_name: Option<String>,
}

/// The compiled resource graph: nodes, edges, and exported values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGraph {
    /// Resource nodes in emission order.
    pub nodes: Vec<ResourceNode>,
    /// Exported values in emission order.
    pub outputs: Vec<ExportedValue>,
}

impl ResourceGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    ///
    /// Ids are unique by construction: fixed ids for the singleton builders,
    /// collision-validated ids for destinations.
    pub fn push_node(&mut self, node: ResourceNode) {
        debug_assert!(
            self.node(&node.id).is_none(),
            "duplicate node id '{}'",
            node.id
        );
        self.nodes.push(node);
    }

    /// Append an exported value.
    pub fn push_output(&mut self, output: ExportedValue) {
        self.outputs.push(output);
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Iterate over nodes of the given kind, in emission order.
    pub fn nodes_of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// Look up an output by name.
    pub fn output(&self, name: &str) -> Option<&ExportedValue> {
        self.outputs.iter().find(|output| output.name == name)
    }
}

/// Derives a safe resource identifier from a free-form name.
///
/// Strips every non-alphanumeric character, then uppercases the first
/// remaining character and lowercases the rest, so `"primary"`, `"Primary!"`,
/// and `"PRIMARY"` all yield `"Primary"`. The lossiness is safe because
/// normalization rejects two destinations that collapse to the same
/// identifier.
///
/// ```
/// use ses_synth::sanitize_logical_id;
///
/// assert_eq!(sanitize_logical_id("Primary!"), "Primary");
/// assert_eq!(sanitize_logical_id("bounce-alerts"), "Bouncealerts");
/// ```
pub fn sanitize_logical_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for c in name.chars().filter(char::is_ascii_alphanumeric) {
        if id.is_empty() {
            id.push(c.to_ascii_uppercase());
        } else {
            id.push(c.to_ascii_lowercase());
        }
    }
    id
}
