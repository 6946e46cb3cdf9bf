//! firewall ipmacbinding setting schema definition for FortiManager
//!
//! Singleton: `/pm/config/device/{device}/vdom/{vdom}/firewall/ipmacbinding/setting`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

/// Returns the schema config for firewall_ipmacbinding_setting (FirewallIpmacbindingSetting)
pub fn firewall_ipmacbinding_setting_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "FirewallIpmacbindingSetting",
        url: "/pm/config/device/{device}/vdom/{vdom}/firewall/ipmacbinding/setting",
        mkey: None,
        params: VDOM_SCOPE,
        schema: scoped_schema("firewall_ipmacbinding_setting", VDOM_SCOPE)
        .with_description("Configure IP to MAC binding settings.")
        .attribute(
            AttributeSchema::new("bindthroughfw", AttributeType::toggle())
                .with_description("Enable/disable use of IP/MAC binding to filter packets that would normally go through the firewall."),
        )
        .attribute(
            AttributeSchema::new("bindtofw", AttributeType::toggle())
                .with_description("Enable/disable use of IP/MAC binding to filter packets that would normally go to the firewall."),
        )
        .attribute(
            AttributeSchema::new("undefinedhost", AttributeType::enumeration(&["allow", "block"]))
                .with_description("Select action to take on packets with IP/MAC addresses not in the binding list."),
        ),
    }
}
