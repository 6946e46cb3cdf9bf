//! firewall address schema definition for FortiManager
//!
//! Table keyed by `name`: `/pm/config/device/{device}/vdom/{vdom}/firewall/address`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema, subtable_sort, tagging_table};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

const VALID_TYPES: &[&str] = &[
    "ipmask",
    "iprange",
    "fqdn",
    "geography",
    "wildcard",
    "dynamic",
    "interface-subnet",
    "mac",
];

/// Returns the schema config for firewall_address (FirewallAddress)
pub fn firewall_address_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "FirewallAddress",
        url: "/pm/config/device/{device}/vdom/{vdom}/firewall/address",
        mkey: Some("name"),
        params: VDOM_SCOPE,
        schema: scoped_schema("firewall_address", VDOM_SCOPE)
        .with_description("Configure IPv4 addresses.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .with_description("Address name."),
        )
        .attribute(
            AttributeSchema::new("uuid", AttributeType::String)
                .computed()
                .with_description("Universally Unique Identifier (read-only)"),
        )
        .attribute(AttributeSchema::new("type", AttributeType::enumeration(VALID_TYPES)))
        .attribute(
            AttributeSchema::new("subnet", types::ipv4_network())
                .with_description("IP address and subnet mask of address."),
        )
        .attribute(AttributeSchema::new("start_ip", types::ipv4_address()))
        .attribute(AttributeSchema::new("end_ip", types::ipv4_address()))
        .attribute(AttributeSchema::new("fqdn", AttributeType::String))
        .attribute(AttributeSchema::new("country", AttributeType::String))
        .attribute(AttributeSchema::new("wildcard", types::ipv4_network()))
        .attribute(
            AttributeSchema::new("macaddr", AttributeType::StringList)
                .with_description("Multiple MAC address ranges."),
        )
        .attribute(AttributeSchema::new("associated_interface", AttributeType::String))
        .attribute(AttributeSchema::new("allow_routing", AttributeType::toggle()))
        .attribute(AttributeSchema::new("color", AttributeType::Int))
        .attribute(AttributeSchema::new("comment", AttributeType::String))
        .attribute(tagging_table()),
    }
}
