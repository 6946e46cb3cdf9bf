//! switch-controller dynamic-port-policy schema definition for FortiManager
//!
//! Table keyed by `name`:
//! `/pm/config/device/{device}/vdom/{vdom}/switch-controller/dynamic-port-policy`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema, subtable_sort};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

fn policy_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("name", AttributeType::String).required(),
        AttributeSchema::new("description", AttributeType::String),
        AttributeSchema::new("status", AttributeType::toggle()),
        AttributeSchema::new("category", AttributeType::enumeration(&["device", "interface-tag"])),
        AttributeSchema::new("match_type", AttributeType::enumeration(&["dynamic", "override"])),
        AttributeSchema::new("match_period", AttributeType::Int),
        AttributeSchema::new("interface_tags", AttributeType::StringList),
        AttributeSchema::new("mac", types::mac_address()).case_insensitive(),
        AttributeSchema::new("hw_vendor", AttributeType::String),
        AttributeSchema::new("type", AttributeType::String),
        AttributeSchema::new("family", AttributeType::String),
        AttributeSchema::new("host", AttributeType::String),
        AttributeSchema::new("lldp_profile", AttributeType::StringList),
        AttributeSchema::new("qos_policy", AttributeType::StringList),
        AttributeSchema::new("dot1x", AttributeType::StringList).with_provider_name("802-1x"),
        AttributeSchema::new("vlan_policy", AttributeType::StringList),
        AttributeSchema::new("bounce_port_link", AttributeType::toggle()),
        AttributeSchema::new("poe_reset", AttributeType::toggle()),
    ])
}

/// Returns the schema config for switchcontroller_dynamicportpolicy (SwitchControllerDynamicPortPolicy)
pub fn switchcontroller_dynamicportpolicy_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SwitchControllerDynamicPortPolicy",
        url: "/pm/config/device/{device}/vdom/{vdom}/switch-controller/dynamic-port-policy",
        mkey: Some("name"),
        params: VDOM_SCOPE,
        schema: scoped_schema("switchcontroller_dynamicportpolicy", VDOM_SCOPE)
        .with_description("Configure Dynamic port policy to be applied on the managed FortiSwitch ports through DPP device.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .with_description("Dynamic port policy name."),
        )
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("fortilink", AttributeType::StringList)
                .with_description("FortiLink interface for which this Dynamic port policy belongs to."),
        )
        .attribute(
            AttributeSchema::new("policy", policy_table())
                .with_description("Port policies with matching criteria and actions."),
        ),
    }
}
