//! Output exporter.
//!
//! Collects the values downstream consumers need: the constructed identity
//! ARN (the identity resource exposes no ARN attribute, so it is assembled
//! from the region and account placeholders), the configuration-set name when
//! one was built, and the six DKIM token attribute references. The token
//! references are exported regardless of whether DNS records are managed, so
//! manual DNS setup stays possible. Pure aggregation; no validation.

use crate::compiler::identity::{
    dkim_token_name_attr, dkim_token_value_attr, DKIM_TOKEN_COUNT, EMAIL_IDENTITY_ID,
};
use crate::config::{StackConfig, StackEnvironment};
use crate::graph::{ExportedValue, OutputValue, ResourceGraph};

pub(crate) fn export(
    config: &StackConfig,
    env: &StackEnvironment,
    config_set_id: Option<&str>,
    graph: &mut ResourceGraph,
) {
    graph.push_output(ExportedValue {
        name: "EmailIdentityArn".to_string(),
        description: "ARN of the SES Email Identity".to_string(),
        value: OutputValue::Template(format!(
            "arn:aws:ses:${{AWS::Region}}:${{AWS::AccountId}}:identity/{}",
            config.domain
        )),
        export_name: Some(format!("{}-ses-EmailIdentityArn", env.environment_name)),
    });

    if let Some(target_id) = config_set_id {
        graph.push_output(ExportedValue {
            name: "ConfigurationSetName".to_string(),
            description: "Name of the SES Configuration Set".to_string(),
            value: OutputValue::Ref {
                target_id: target_id.to_string(),
            },
            export_name: Some(format!("{}-ses-ConfigurationSetName", env.environment_name)),
        });
    }

    for i in 1..=DKIM_TOKEN_COUNT {
        graph.push_output(ExportedValue {
            name: dkim_token_name_attr(i),
            description: format!("DKIM DNS Token Name {i} (for manual DNS configuration)"),
            value: OutputValue::Attribute {
                target_id: EMAIL_IDENTITY_ID.to_string(),
                attribute: dkim_token_name_attr(i),
            },
            export_name: None,
        });
    }
    for i in 1..=DKIM_TOKEN_COUNT {
        graph.push_output(ExportedValue {
            name: dkim_token_value_attr(i),
            description: format!("DKIM DNS Token Value {i} (for manual DNS configuration)"),
            value: OutputValue::Attribute {
                target_id: EMAIL_IDENTITY_ID.to_string(),
                attribute: dkim_token_value_attr(i),
            },
            export_name: None,
        });
    }
}
