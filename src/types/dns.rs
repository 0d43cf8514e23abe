//! DNS record and DMARC types.

use serde::{Deserialize, Serialize};

/// DNS record type emitted by the synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    /// CNAME record.
    Cname,
    /// MX record.
    Mx,
    /// TXT record.
    Txt,
}

impl RecordType {
    /// Returns the record type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Txt => "TXT",
        }
    }
}

/// DMARC policy applied to messages that fail alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmarcPolicy {
    /// Monitor only.
    None,
    /// Quarantine failing messages.
    Quarantine,
    /// Reject failing messages.
    Reject,
}

impl DmarcPolicy {
    /// Returns the policy token used in the DMARC record.
    pub fn as_str(&self) -> &'static str {
        match self {
            DmarcPolicy::None => "none",
            DmarcPolicy::Quarantine => "quarantine",
            DmarcPolicy::Reject => "reject",
        }
    }

    /// Parses the record token.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(DmarcPolicy::None),
            "quarantine" => Some(DmarcPolicy::Quarantine),
            "reject" => Some(DmarcPolicy::Reject),
            _ => None,
        }
    }
}

impl Default for DmarcPolicy {
    fn default() -> Self {
        DmarcPolicy::None
    }
}

/// Canonical DMARC section.
///
/// Only consulted when DNS records are managed; defaults are materialized
/// either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmarcSpec {
    /// Policy for messages failing DMARC alignment.
    pub policy: DmarcPolicy,
    /// Aggregate report address; `None` omits the `rua` clause.
    pub rua: Option<String>,
    /// Forensic report address; `None` omits the `ruf` clause.
    pub ruf: Option<String>,
    /// Percentage of messages the policy applies to.
    pub pct: u8,
}

impl Default for DmarcSpec {
    fn default() -> Self {
        Self {
            policy: DmarcPolicy::None,
            rua: None,
            ruf: None,
            pct: 100,
        }
    }
}

impl DmarcSpec {
    /// Assembles the DMARC TXT record value.
    ///
    /// The clause order is fixed: policy, pct, then the optional `rua` and
    /// `ruf` mailto clauses, each appended only when its address is present.
    pub fn txt_value(&self) -> String {
        let mut value = format!("v=DMARC1; p={}; pct={}", self.policy.as_str(), self.pct);
        if let Some(rua) = self.rua.as_deref().filter(|s| !s.is_empty()) {
            value.push_str("; rua=mailto:");
            value.push_str(rua);
        }
        if let Some(ruf) = self.ruf.as_deref().filter(|s| !s.is_empty()) {
            value.push_str("; ruf=mailto:");
            value.push_str(ruf);
        }
        value
    }
}
