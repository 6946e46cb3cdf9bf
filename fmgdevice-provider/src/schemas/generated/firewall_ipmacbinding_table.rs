//! firewall ipmacbinding table schema definition for FortiManager
//!
//! Table keyed by `seq_num`: `/pm/config/device/{device}/vdom/{vdom}/firewall/ipmacbinding/table`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

/// Returns the schema config for firewall_ipmacbinding_table (FirewallIpmacbindingTable)
pub fn firewall_ipmacbinding_table_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "FirewallIpmacbindingTable",
        url: "/pm/config/device/{device}/vdom/{vdom}/firewall/ipmacbinding/table",
        mkey: Some("seq_num"),
        params: VDOM_SCOPE,
        schema: scoped_schema("firewall_ipmacbinding_table", VDOM_SCOPE)
        .with_description("Configure IP to MAC address pairs in the IP/MAC binding table.")
        .attribute(
            AttributeSchema::new("seq_num", AttributeType::Int)
                .force_new()
                .with_description("Entry number."),
        )
        .attribute(
            AttributeSchema::new("ip", types::ipv4_address())
                .with_description("IPv4 address portion of the pair."),
        )
        .attribute(
            AttributeSchema::new("mac", types::mac_address())
                .case_insensitive()
                .with_description("MAC address portion of the pair."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .with_description("Name of the pair (optional)."),
        )
        .attribute(AttributeSchema::new("status", AttributeType::toggle())),
    }
}
