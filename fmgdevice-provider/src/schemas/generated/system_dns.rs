//! system dns schema definition for FortiManager
//!
//! Singleton: `/pm/config/device/{device}/global/system/dns`

use super::{FmgSchemaConfig, GLOBAL_SCOPE, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

/// Returns the schema config for system_dns (SystemDns)
pub fn system_dns_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SystemDns",
        url: "/pm/config/device/{device}/global/system/dns",
        mkey: None,
        params: GLOBAL_SCOPE,
        schema: scoped_schema("system_dns", GLOBAL_SCOPE)
        .with_description("Configure DNS.")
        .attribute(
            AttributeSchema::new("primary", types::ipv4_address())
                .with_description("Primary DNS server IP address."),
        )
        .attribute(
            AttributeSchema::new("secondary", types::ipv4_address())
                .with_description("Secondary DNS server IP address."),
        )
        .attribute(AttributeSchema::new("alt_primary", types::ipv4_address()))
        .attribute(AttributeSchema::new("alt_secondary", types::ipv4_address()))
        .attribute(AttributeSchema::new("ip6_primary", AttributeType::String))
        .attribute(AttributeSchema::new("ip6_secondary", AttributeType::String))
        .attribute(
            AttributeSchema::new("protocol", AttributeType::StringSet)
                .with_description("DNS transport protocols: cleartext, dot, doh."),
        )
        .attribute(AttributeSchema::new("ssl_certificate", AttributeType::String))
        .attribute(
            AttributeSchema::new("server_hostname", AttributeType::StringList)
                .with_description("DNS server host name list."),
        )
        .attribute(
            AttributeSchema::new("domain", AttributeType::StringList)
                .with_description("Search suffix list for hostname lookup."),
        )
        .attribute(
            AttributeSchema::new("timeout", AttributeType::Int)
                .with_description("DNS query timeout interval in seconds (1 - 10)."),
        )
        .attribute(
            AttributeSchema::new("retry", AttributeType::Int)
                .with_description("Number of times to retry (0 - 5)."),
        )
        .attribute(AttributeSchema::new("dns_cache_limit", AttributeType::Int))
        .attribute(AttributeSchema::new("dns_cache_ttl", AttributeType::Int))
        .attribute(AttributeSchema::new("cache_notfound_responses", AttributeType::toggle()))
        .attribute(AttributeSchema::new("source_ip", types::ipv4_address()))
        .attribute(
            AttributeSchema::new("interface_select_method", AttributeType::enumeration(&["auto", "sdwan", "specify"]))
                .with_description("Specify how to select outgoing interface to reach server."),
        )
        .attribute(AttributeSchema::new("interface", AttributeType::String))
        .attribute(AttributeSchema::new("server_select_method", AttributeType::enumeration(&["least-rtt", "failover"])))
        .attribute(AttributeSchema::new("log", AttributeType::enumeration(&["disable", "error", "all"])))
        .attribute(AttributeSchema::new("fqdn_cache_ttl", AttributeType::Int))
        .attribute(AttributeSchema::new("fqdn_min_refresh", AttributeType::Int)),
    }
}
