//! DNS record synthesizer.
//!
//! Runs only when `manage_dns_records` is set, and requires the externally
//! supplied hosted-zone identifier; its absence is a configuration error
//! surfaced before any record node is built. Emits the three DKIM CNAMEs (by
//! reference to the identity's token attributes), the mail-from MX and SPF
//! TXT records, and the DMARC TXT record.

use serde_json::json;

use crate::compiler::identity::{
    dkim_token_name_attr, dkim_token_value_attr, DKIM_TOKEN_COUNT, EMAIL_IDENTITY_ID,
};
use crate::config::{StackConfig, StackEnvironment};
use crate::error::CompileError;
use crate::graph::{Reference, ResourceGraph, ResourceKind, ResourceNode};
use crate::types::RecordType;

/// TTL applied to every synthesized record.
const RECORD_TTL: u64 = 300;

/// Regional feedback endpoint the mail-from MX record points at, with its
/// fixed priority embedded.
const MX_FEEDBACK_TARGET: &str = "10 feedback-smtp.${AWS::Region}.amazonses.com";

/// SPF value authorizing the sending provider, pre-quoted for a TXT record.
const SPF_RECORD_VALUE: &str = "\"v=spf1 include:amazonses.com ~all\"";

fn record_node(id: &str, hosted_zone_id: &str, record_type: RecordType) -> ResourceNode {
    ResourceNode::new(id, ResourceKind::DnsRecord)
        .with_property("hostedZoneId", json!(hosted_zone_id))
        .with_property("type", json!(record_type.as_str()))
        .with_property("ttl", json!(RECORD_TTL))
}

pub(crate) fn build(
    config: &StackConfig,
    env: &StackEnvironment,
    graph: &mut ResourceGraph,
) -> Result<(), CompileError> {
    let hosted_zone_id = env
        .hosted_zone_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CompileError::Configuration {
            message: "manage_dns_records requires a hosted zone id".to_string(),
        })?;
    tracing::debug!(%hosted_zone_id, "building DNS records");

    for i in 1..=DKIM_TOKEN_COUNT {
        graph.push_node(
            record_node(&format!("DkimRecord{i}"), hosted_zone_id, RecordType::Cname)
                .with_reference(Reference::by_attribute(
                    "name",
                    EMAIL_IDENTITY_ID,
                    dkim_token_name_attr(i),
                ))
                .with_reference(Reference::by_attribute(
                    "resourceRecords.0",
                    EMAIL_IDENTITY_ID,
                    dkim_token_value_attr(i),
                )),
        );
    }

    let mail_from_name = format!("{}.{}.", config.mail_from_subdomain, config.domain);
    graph.push_node(
        record_node("MailFromMxRecord", hosted_zone_id, RecordType::Mx)
            .with_property("name", json!(mail_from_name))
            .with_property("resourceRecords", json!([MX_FEEDBACK_TARGET])),
    );
    graph.push_node(
        record_node("MailFromSpfRecord", hosted_zone_id, RecordType::Txt)
            .with_property("name", json!(mail_from_name))
            .with_property("resourceRecords", json!([SPF_RECORD_VALUE])),
    );

    graph.push_node(
        record_node("DmarcRecord", hosted_zone_id, RecordType::Txt)
            .with_property("name", json!(format!("_dmarc.{}.", config.domain)))
            .with_property(
                "resourceRecords",
                json!([format!("\"{}\"", config.dmarc.txt_value())]),
            ),
    );

    Ok(())
}
