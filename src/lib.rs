//! SES Stack Compiler
//!
//! Compiles a structured email-sending configuration — a single domain, its
//! DKIM/SPF/DMARC posture, a delivery-telemetry configuration, and zero or
//! more event-notification destinations — into a graph of provisioning
//! resource declarations and their cross-references, ready for submission to
//! an infrastructure-provisioning engine.
//!
//! # Features
//!
//! - **Collect-all validation**: normalization reports every violated input
//!   constraint at once, never just the first
//! - **Closed destination kinds**: the four destination types are a tagged
//!   variant, so an unsupported kind cannot be represented
//! - **Deterministic output**: node emission order matches input order and is
//!   stable across recompilations, as are all exported names
//! - **Reference edges**: values resolved by the engine at apply time (DKIM
//!   tokens, the configuration-set name) are recorded as references, never
//!   guessed at
//!
//! # Quick Start
//!
//! ```rust
//! use ses_synth::{compile_raw, RawStackConfig, StackEnvironment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let raw: RawStackConfig = serde_json::from_str(
//!     r#"{
//!         "domain": "example.com",
//!         "event_destinations": [
//!             {"type": "sns", "topic_arn": "arn:aws:sns:us-east-1:123456789012:alerts"}
//!         ]
//!     }"#,
//! )?;
//!
//! let graph = compile_raw(raw, &StackEnvironment::default())?;
//! assert_eq!(graph.nodes.len(), 3); // identity, configuration set, destination
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Data flows one direction: raw configuration → normalization → the builder
//! passes (identity, configuration set, event destinations, DNS records) →
//! output export. Each pass appends nodes and reference edges to the shared
//! graph; later passes may reference nodes created by earlier ones but never
//! vice versa. The whole run either yields a complete, internally consistent
//! graph or a complete list of reasons it could not.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

// Module declarations
pub mod compiler;
pub mod config;
pub mod error;
pub mod graph;
pub mod types;

// Re-export the compiler entry points
pub use compiler::{compile, compile_raw};

// Re-export configuration types
pub use config::{
    RawConfigurationSet, RawDimension, RawDmarc, RawEventDestination, RawStackConfig,
    RawSuppression, StackConfig, StackEnvironment,
};

// Re-export error types
pub use error::{CompileError, ValidationError, ValidationIssue};

// Re-export graph types
pub use graph::{
    sanitize_logical_id, ExportedValue, OutputValue, Reference, ResourceGraph, ResourceKind,
    ResourceNode,
};

// Re-export domain types
pub use types::{
    BehaviorOnMxFailure,
    ConfigurationSetSpec,
    DestinationPayload,
    DimensionConfiguration,
    DimensionValueSource,
    DkimSigningKeyLength,
    DmarcPolicy,
    DmarcSpec,
    EventDestinationSpec,
    EventType,
    RecordType,
    SuppressionListReason,
    Tag,
    TlsPolicy,
};

/// Result type alias for compilation operations.
pub type Result<T> = std::result::Result<T, CompileError>;
