//! Domain identity types: DKIM signing, mail-from behavior, and resource tags.

use serde::{Deserialize, Serialize};

/// DKIM signing key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DkimSigningKeyLength {
    /// RSA 1024-bit key.
    #[serde(rename = "RSA_1024_BIT")]
    Rsa1024Bit,
    /// RSA 2048-bit key.
    #[serde(rename = "RSA_2048_BIT")]
    Rsa2048Bit,
}

impl DkimSigningKeyLength {
    /// Returns the signing-algorithm identifier used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            DkimSigningKeyLength::Rsa1024Bit => "RSA_1024_BIT",
            DkimSigningKeyLength::Rsa2048Bit => "RSA_2048_BIT",
        }
    }

    /// Maps a numeric key length to the corresponding variant.
    ///
    /// Only 1024 and 2048 are valid; anything else returns `None`.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            1024 => Some(DkimSigningKeyLength::Rsa1024Bit),
            2048 => Some(DkimSigningKeyLength::Rsa2048Bit),
            _ => None,
        }
    }

    /// Returns the numeric key length.
    pub fn bits(&self) -> u32 {
        match self {
            DkimSigningKeyLength::Rsa1024Bit => 1024,
            DkimSigningKeyLength::Rsa2048Bit => 2048,
        }
    }
}

impl Default for DkimSigningKeyLength {
    fn default() -> Self {
        DkimSigningKeyLength::Rsa2048Bit
    }
}

/// Behavior when the MX lookup for the mail-from domain fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorOnMxFailure {
    /// Fall back to the default sending identity.
    UseDefaultValue,
    /// Reject the message.
    RejectMessage,
}

impl BehaviorOnMxFailure {
    /// Returns the string representation used by the provisioning schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorOnMxFailure::UseDefaultValue => "USE_DEFAULT_VALUE",
            BehaviorOnMxFailure::RejectMessage => "REJECT_MESSAGE",
        }
    }
}

/// Tag attached to taggable resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value, possibly a `${...}` template placeholder.
    pub value: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_length_mapping() {
        assert_eq!(
            DkimSigningKeyLength::from_bits(1024),
            Some(DkimSigningKeyLength::Rsa1024Bit)
        );
        assert_eq!(
            DkimSigningKeyLength::from_bits(2048),
            Some(DkimSigningKeyLength::Rsa2048Bit)
        );
        assert_eq!(DkimSigningKeyLength::from_bits(4096), None);
        assert_eq!(DkimSigningKeyLength::Rsa1024Bit.as_str(), "RSA_1024_BIT");
        assert_eq!(DkimSigningKeyLength::Rsa2048Bit.as_str(), "RSA_2048_BIT");
        assert_eq!(DkimSigningKeyLength::default().bits(), 2048);
    }

    #[test]
    fn test_behavior_on_mx_failure() {
        assert_eq!(
            BehaviorOnMxFailure::UseDefaultValue.as_str(),
            "USE_DEFAULT_VALUE"
        );
        assert_eq!(BehaviorOnMxFailure::RejectMessage.as_str(), "REJECT_MESSAGE");
    }

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new("Environment", "${EnvironmentName}");
        assert_eq!(tag.key, "Environment");
        assert_eq!(tag.value, "${EnvironmentName}");
    }
}
