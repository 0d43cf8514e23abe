//! Configuration set types.
//!
//! A configuration set is a named policy bundle controlling delivery behavior
//! and telemetry for outbound messages.

use serde::{Deserialize, Serialize};

/// TLS policy for message delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TlsPolicy {
    /// Require TLS for all connections.
    Require,
    /// Use TLS if available, but allow unencrypted delivery.
    Optional,
}

impl TlsPolicy {
    /// Returns the string representation used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsPolicy::Require => "REQUIRE",
            TlsPolicy::Optional => "OPTIONAL",
        }
    }

    /// Parses the schema string representation.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "REQUIRE" => Some(TlsPolicy::Require),
            "OPTIONAL" => Some(TlsPolicy::Optional),
            _ => None,
        }
    }
}

impl Default for TlsPolicy {
    fn default() -> Self {
        TlsPolicy::Require
    }
}

/// Reasons for which recipient addresses are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuppressionListReason {
    /// The message bounced.
    Bounce,
    /// The recipient complained.
    Complaint,
}

impl SuppressionListReason {
    /// Returns the string representation used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuppressionListReason::Bounce => "BOUNCE",
            SuppressionListReason::Complaint => "COMPLAINT",
        }
    }

    /// Parses the schema string representation.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "BOUNCE" => Some(SuppressionListReason::Bounce),
            "COMPLAINT" => Some(SuppressionListReason::Complaint),
            _ => None,
        }
    }
}

/// Canonical configuration set section.
///
/// All defaults have been applied by normalization; an absent input section
/// still yields an enabled set with a generated name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSetSpec {
    /// Whether the configuration set (and everything attached to it) is built.
    pub enabled: bool,
    /// Explicit set name; a default of `<environment>-ses-config` is used when absent.
    pub name: Option<String>,
    /// Whether reputation metrics are enabled.
    pub reputation_metrics: bool,
    /// Whether sending is enabled.
    pub sending_enabled: bool,
    /// TLS policy for delivery.
    pub tls_policy: TlsPolicy,
    /// Suppression list reasons.
    pub suppression_reasons: Vec<SuppressionListReason>,
}

impl Default for ConfigurationSetSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            name: None,
            reputation_metrics: true,
            sending_enabled: true,
            tls_policy: TlsPolicy::Require,
            suppression_reasons: vec![
                SuppressionListReason::Bounce,
                SuppressionListReason::Complaint,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tls_policy_round_trip() {
        assert_eq!(TlsPolicy::from_name("REQUIRE"), Some(TlsPolicy::Require));
        assert_eq!(TlsPolicy::from_name("OPTIONAL"), Some(TlsPolicy::Optional));
        assert_eq!(TlsPolicy::from_name("require"), None);
        assert_eq!(TlsPolicy::Require.as_str(), "REQUIRE");
    }

    #[test]
    fn test_suppression_reason_parsing() {
        assert_eq!(
            SuppressionListReason::from_name("BOUNCE"),
            Some(SuppressionListReason::Bounce)
        );
        assert_eq!(
            SuppressionListReason::from_name("COMPLAINT"),
            Some(SuppressionListReason::Complaint)
        );
        assert_eq!(SuppressionListReason::from_name("SPAM"), None);
    }

    #[test]
    fn test_configuration_set_defaults() {
        let spec = ConfigurationSetSpec::default();
        assert!(spec.enabled);
        assert!(spec.name.is_none());
        assert!(spec.reputation_metrics);
        assert!(spec.sending_enabled);
        assert_eq!(spec.tls_policy, TlsPolicy::Require);
        assert_eq!(
            spec.suppression_reasons,
            vec![
                SuppressionListReason::Bounce,
                SuppressionListReason::Complaint
            ]
        );
    }
}
