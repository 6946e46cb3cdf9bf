//! router static schema definition for FortiManager
//!
//! Table keyed by `seq_num`: `/pm/config/device/{device}/vdom/{vdom}/router/static`.
//! A `seq_num` of 0 (or none) lets FortiManager assign the next free entry.

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

/// Returns the schema config for router_static (RouterStatic)
pub fn router_static_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "RouterStatic",
        url: "/pm/config/device/{device}/vdom/{vdom}/router/static",
        mkey: Some("seq_num"),
        params: VDOM_SCOPE,
        schema: scoped_schema("router_static", VDOM_SCOPE)
        .with_description("Configure IPv4 static routing tables.")
        .attribute(
            AttributeSchema::new("seq_num", AttributeType::Int)
                .with_description("Sequence number."),
        )
        .attribute(AttributeSchema::new("status", AttributeType::toggle()))
        .attribute(
            AttributeSchema::new("dst", types::ipv4_network())
                .with_description("Destination IP and mask for this route."),
        )
        .attribute(AttributeSchema::new("src", types::ipv4_network()))
        .attribute(
            AttributeSchema::new("gateway", types::ipv4_address())
                .with_description("Gateway IP for this route."),
        )
        .attribute(
            AttributeSchema::new("distance", AttributeType::Int)
                .with_description("Administrative distance (1 - 255)."),
        )
        .attribute(AttributeSchema::new("weight", AttributeType::Int))
        .attribute(AttributeSchema::new("priority", AttributeType::Int))
        .attribute(
            AttributeSchema::new("device", AttributeType::StringList)
                .with_description("Gateway out interface or tunnel."),
        )
        .attribute(AttributeSchema::new("comment", AttributeType::String))
        .attribute(AttributeSchema::new("blackhole", AttributeType::toggle()))
        .attribute(AttributeSchema::new("dynamic_gateway", AttributeType::toggle()))
        .attribute(AttributeSchema::new("sdwan_zone", AttributeType::StringList))
        .attribute(AttributeSchema::new("dstaddr", AttributeType::String))
        .attribute(AttributeSchema::new("internet_service", AttributeType::Int))
        .attribute(AttributeSchema::new("link_monitor_exempt", AttributeType::toggle()))
        .attribute(AttributeSchema::new("vrf", AttributeType::Int))
        .attribute(AttributeSchema::new("bfd", AttributeType::toggle()))
        .attribute(AttributeSchema::new("tag", AttributeType::Int)),
    }
}
