//! Email identity builder.
//!
//! Emits the one `EmailIdentity` node every compilation contains: the domain,
//! its DKIM signing posture, and the mail-from policy. The node exposes the
//! three DKIM verification token (name, value) pairs as attributes resolved
//! by the provisioning engine at apply time; the compiler only ever records
//! references to them.

use serde_json::json;

use crate::compiler::resource_tags_json;
use crate::config::{StackConfig, StackEnvironment};
use crate::graph::{ResourceGraph, ResourceKind, ResourceNode};
use crate::types::BehaviorOnMxFailure;

/// Fixed id of the identity node.
pub(crate) const EMAIL_IDENTITY_ID: &str = "EmailIdentity";

/// Number of DKIM verification tokens the identity exposes.
pub(crate) const DKIM_TOKEN_COUNT: usize = 3;

/// Attribute name of the `i`-th DKIM token's DNS record name (1-based).
pub(crate) fn dkim_token_name_attr(i: usize) -> String {
    format!("DkimDNSTokenName{i}")
}

/// Attribute name of the `i`-th DKIM token's DNS record value (1-based).
pub(crate) fn dkim_token_value_attr(i: usize) -> String {
    format!("DkimDNSTokenValue{i}")
}

pub(crate) fn build(config: &StackConfig, env: &StackEnvironment, graph: &mut ResourceGraph) {
    let mail_from_domain = format!("{}.{}", config.mail_from_subdomain, config.domain);
    tracing::debug!(domain = %config.domain, %mail_from_domain, "building email identity");

    let node = ResourceNode::new(EMAIL_IDENTITY_ID, ResourceKind::EmailIdentity)
        .with_property("domainName", json!(config.domain))
        .with_property(
            "dkimSigningAttributes",
            json!({ "nextSigningKeyLength": config.dkim_signing_key_length.as_str() }),
        )
        .with_property("dkimAttributes", json!({ "signingEnabled": true }))
        .with_property(
            "mailFromAttributes",
            json!({
                "mailFromDomain": mail_from_domain,
                "behaviorOnMxFailure": BehaviorOnMxFailure::UseDefaultValue.as_str(),
            }),
        )
        .with_property("tags", resource_tags_json(env));
    graph.push_node(node);
}
