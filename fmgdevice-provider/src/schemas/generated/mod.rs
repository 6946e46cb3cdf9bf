//! FortiManager device resource descriptors
//!
//! One file per object type. Each returns an [`FmgSchemaConfig`]: the
//! attribute table plus the JSON-RPC addressing the generic adapter needs.

use fmgdevice_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

/// FortiManager schema configuration
///
/// Combines the ResourceSchema with the JSON-RPC metadata of the object type.
pub struct FmgSchemaConfig {
    /// API object name used in error messages (e.g., "SystemZone")
    pub type_name: &'static str,
    /// URL template with `{device}`, `{vdom}` and parent placeholders
    pub url: &'static str,
    /// Natural key attribute; None for singleton objects
    pub mkey: Option<&'static str>,
    /// Scoping parameters substituted into `url`
    pub params: &'static [ScopeParam],
    /// The resource schema with attribute definitions
    pub schema: ResourceSchema,
}

/// Maps a declarative attribute onto a paradict key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeParam {
    pub attribute: &'static str,
    pub key: &'static str,
}

pub const DEVICE: ScopeParam = ScopeParam {
    attribute: "device_name",
    key: "device",
};

pub const VDOM: ScopeParam = ScopeParam {
    attribute: "device_vdom",
    key: "vdom",
};

/// Objects under `/pm/config/device/{device}/global`
pub const GLOBAL_SCOPE: &[ScopeParam] = &[DEVICE];

/// Objects under `/pm/config/device/{device}/vdom/{vdom}`
pub const VDOM_SCOPE: &[ScopeParam] = &[DEVICE, VDOM];

/// Start a schema carrying the scoping attributes every resource accepts
pub fn scoped_schema(resource_type: &str, params: &[ScopeParam]) -> ResourceSchema {
    let mut schema = ResourceSchema::new(resource_type).attribute(
        AttributeSchema::new("adom", AttributeType::String)
            .parameter()
            .with_description("ADOM whose workspace is locked for writes (default: provider adom)"),
    );
    for param in params {
        schema = schema.attribute(
            AttributeSchema::new(param.attribute, AttributeType::String).parameter(),
        );
    }
    schema
}

/// `dynamic_sort_subtable` for resources with nested tables
pub fn subtable_sort() -> AttributeSchema {
    AttributeSchema::new(
        "dynamic_sort_subtable",
        AttributeType::enumeration(&["false", "true", "natural"]),
    )
    .parameter()
    .with_description("Order of table rows in state: API order, lexical or natural")
}

/// Standard `tagging` table shared by addresses and zones
pub fn tagging_table() -> AttributeSchema {
    AttributeSchema::new(
        "tagging",
        AttributeType::Table(vec![
            AttributeSchema::new("name", AttributeType::String).required(),
            AttributeSchema::new("category", AttributeType::StringSet),
            AttributeSchema::new("tags", AttributeType::StringSet),
        ]),
    )
    .with_description("Config object tagging.")
}

pub mod firewall_address;
pub mod firewall_ipmacbinding_setting;
pub mod firewall_ipmacbinding_table;
pub mod report_layout_bodyitem;
pub mod router_static;
pub mod switchcontroller_dynamicportpolicy;
pub mod switchcontroller_fortilinksettings_nacports;
pub mod switchcontroller_managedswitch_remotelog;
pub mod system_dns;
pub mod system_dpdk_global;
pub mod system_snmp_community;
pub mod system_zone;
pub mod user_quarantine;
pub mod wirelesscontroller_hotspot20_icon;

/// Returns all schema configs
pub fn configs() -> Vec<FmgSchemaConfig> {
    vec![
        system_dpdk_global::system_dpdk_global_config(),
        system_dns::system_dns_config(),
        system_snmp_community::system_snmp_community_config(),
        firewall_ipmacbinding_setting::firewall_ipmacbinding_setting_config(),
        firewall_ipmacbinding_table::firewall_ipmacbinding_table_config(),
        firewall_address::firewall_address_config(),
        system_zone::system_zone_config(),
        router_static::router_static_config(),
        switchcontroller_dynamicportpolicy::switchcontroller_dynamicportpolicy_config(),
        switchcontroller_managedswitch_remotelog::switchcontroller_managedswitch_remotelog_config(),
        switchcontroller_fortilinksettings_nacports::switchcontroller_fortilinksettings_nacports_config(),
        report_layout_bodyitem::report_layout_bodyitem_config(),
        user_quarantine::user_quarantine_config(),
        wirelesscontroller_hotspot20_icon::wirelesscontroller_hotspot20_icon_config(),
    ]
}

/// Returns all schemas
pub fn schemas() -> Vec<ResourceSchema> {
    configs().into_iter().map(|c| c.schema).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmgdevice_client::expand_url;

    #[test]
    fn every_url_placeholder_has_a_scope_param() {
        for config in configs() {
            let params = config
                .params
                .iter()
                .map(|p| (p.key.to_string(), "x".to_string()))
                .collect();
            assert!(
                expand_url(config.url, &params).is_ok(),
                "{} has an unfilled placeholder",
                config.schema.resource_type
            );
            for param in config.params {
                let attr = config.schema.get(param.attribute).unwrap();
                assert!(attr.parameter, "{} must be a parameter", param.attribute);
            }
        }
    }

    #[test]
    fn mkey_is_a_declared_attribute() {
        for config in configs() {
            if let Some(mkey) = config.mkey {
                let attr = config.schema.get(mkey).unwrap();
                assert!(attr.is_sent(), "{} key must be sent", config.type_name);
            }
        }
    }

    #[test]
    fn resource_types_are_unique() {
        let mut names: Vec<String> = schemas().into_iter().map(|s| s.resource_type).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }
}
