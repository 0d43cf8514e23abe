//! Canonical domain types for the SES stack compiler.
//!
//! These are the validated, defaulted forms produced by normalization; the
//! loosely-typed input counterparts live in [`crate::config`].

mod configuration;
mod destination;
mod dns;
mod identity;

pub use configuration::{ConfigurationSetSpec, SuppressionListReason, TlsPolicy};
pub use destination::{
    DestinationPayload, DimensionConfiguration, DimensionValueSource, EventDestinationSpec,
    EventType,
};
pub use dns::{DmarcPolicy, DmarcSpec, RecordType};
pub use identity::{BehaviorOnMxFailure, DkimSigningKeyLength, Tag};
