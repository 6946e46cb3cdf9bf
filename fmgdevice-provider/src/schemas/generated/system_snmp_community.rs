//! system snmp community schema definition for FortiManager
//!
//! Table keyed by `id`: `/pm/config/device/{device}/global/system/snmp/community`

use super::{FmgSchemaConfig, GLOBAL_SCOPE, scoped_schema, subtable_sort};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

fn hosts_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("id", AttributeType::Int).required(),
        AttributeSchema::new("ip", types::ipv4_network()),
        AttributeSchema::new("source_ip", types::ipv4_address()),
        AttributeSchema::new("ha_direct", AttributeType::toggle()),
        AttributeSchema::new("host_type", AttributeType::enumeration(&["any", "query", "trap"])),
        AttributeSchema::new("interface", AttributeType::StringList),
        AttributeSchema::new(
            "interface_select_method",
            AttributeType::enumeration(&["auto", "sdwan", "specify"]),
        ),
    ])
}

/// Returns the schema config for system_snmp_community (SystemSnmpCommunity)
pub fn system_snmp_community_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SystemSnmpCommunity",
        url: "/pm/config/device/{device}/global/system/snmp/community",
        mkey: Some("id"),
        params: GLOBAL_SCOPE,
        schema: scoped_schema("system_snmp_community", GLOBAL_SCOPE)
        .with_description("SNMP community configuration.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("id", AttributeType::Int)
                .required()
                .force_new()
                .with_description("Community ID."),
        )
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .with_description("Community name."),
        )
        .attribute(AttributeSchema::new("status", AttributeType::toggle()))
        .attribute(
            AttributeSchema::new("hosts", hosts_table())
                .with_description("Configure IPv4 SNMP managers (hosts)."),
        )
        .attribute(AttributeSchema::new("query_v1_status", AttributeType::toggle()))
        .attribute(AttributeSchema::new("query_v1_port", types::port()))
        .attribute(AttributeSchema::new("query_v2c_status", AttributeType::toggle()))
        .attribute(AttributeSchema::new("query_v2c_port", types::port()))
        .attribute(AttributeSchema::new("trap_v1_status", AttributeType::toggle()))
        .attribute(AttributeSchema::new("trap_v1_lport", types::port()))
        .attribute(AttributeSchema::new("trap_v1_rport", types::port()))
        .attribute(AttributeSchema::new("trap_v2c_status", AttributeType::toggle()))
        .attribute(AttributeSchema::new("trap_v2c_lport", types::port()))
        .attribute(AttributeSchema::new("trap_v2c_rport", types::port()))
        .attribute(
            AttributeSchema::new("events", AttributeType::StringSet)
                .with_description("SNMP trap events."),
        )
        .attribute(AttributeSchema::new("mib_view", AttributeType::String))
        .attribute(AttributeSchema::new("vdoms", AttributeType::StringSet)),
    }
}
