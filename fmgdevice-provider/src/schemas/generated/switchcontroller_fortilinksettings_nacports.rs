//! switch-controller fortilink-settings nac-ports schema definition for FortiManager
//!
//! Singleton nested under a FortiLink settings entry:
//! `/pm/config/device/{device}/vdom/{vdom}/switch-controller/fortilink-settings/{fortilink_settings}/nac-ports`

use super::{DEVICE, FmgSchemaConfig, ScopeParam, VDOM, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

const PARAMS: &[ScopeParam] = &[
    DEVICE,
    VDOM,
    ScopeParam {
        attribute: "fortilink_settings",
        key: "fortilink_settings",
    },
];

/// Returns the schema config for switchcontroller_fortilinksettings_nacports (SwitchControllerFortilinkSettingsNacPorts)
pub fn switchcontroller_fortilinksettings_nacports_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SwitchControllerFortilinkSettingsNacPorts",
        url: "/pm/config/device/{device}/vdom/{vdom}/switch-controller/fortilink-settings/{fortilink_settings}/nac-ports",
        mkey: None,
        params: PARAMS,
        schema: scoped_schema("switchcontroller_fortilinksettings_nacports", PARAMS)
        .with_description("NAC specific configuration.")
        .attribute(
            AttributeSchema::new("onboarding_vlan", AttributeType::StringList)
                .with_description("Default NAC Onboarding VLAN when NAC devices are discovered."),
        )
        .attribute(AttributeSchema::new("lan_segment", AttributeType::toggle()))
        .attribute(AttributeSchema::new("nac_lan_interface", AttributeType::StringList))
        .attribute(
            AttributeSchema::new("nac_segment_vlans", AttributeType::StringList)
                .with_description("Configure NAC segment VLANs."),
        )
        .attribute(AttributeSchema::new("parent_key", AttributeType::String))
        .attribute(AttributeSchema::new("bounce_nac_port", AttributeType::toggle()))
        .attribute(AttributeSchema::new("member_change", AttributeType::Int)),
    }
}
