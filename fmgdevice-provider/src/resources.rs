//! Resource type definitions
//!
//! Each type implements [`ResourceType`] by handing out the schema of its
//! descriptor table.

use fmgdevice_core::provider::ResourceType;
use fmgdevice_core::schema::ResourceSchema;

use crate::schemas::generated::*;

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr, $config:path) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
            fn schema(&self) -> ResourceSchema {
                $config().schema
            }
        }
    };
}

define_resource_type!(SystemDpdkGlobalType, "system_dpdk_global", system_dpdk_global::system_dpdk_global_config);
define_resource_type!(SystemDnsType, "system_dns", system_dns::system_dns_config);
define_resource_type!(SystemSnmpCommunityType, "system_snmp_community", system_snmp_community::system_snmp_community_config);
define_resource_type!(
    FirewallIpmacbindingSettingType,
    "firewall_ipmacbinding_setting",
    firewall_ipmacbinding_setting::firewall_ipmacbinding_setting_config
);
define_resource_type!(
    FirewallIpmacbindingTableType,
    "firewall_ipmacbinding_table",
    firewall_ipmacbinding_table::firewall_ipmacbinding_table_config
);
define_resource_type!(FirewallAddressType, "firewall_address", firewall_address::firewall_address_config);
define_resource_type!(SystemZoneType, "system_zone", system_zone::system_zone_config);
define_resource_type!(RouterStaticType, "router_static", router_static::router_static_config);
define_resource_type!(
    SwitchControllerDynamicPortPolicyType,
    "switchcontroller_dynamicportpolicy",
    switchcontroller_dynamicportpolicy::switchcontroller_dynamicportpolicy_config
);
define_resource_type!(
    SwitchControllerManagedSwitchRemoteLogType,
    "switchcontroller_managedswitch_remotelog",
    switchcontroller_managedswitch_remotelog::switchcontroller_managedswitch_remotelog_config
);
define_resource_type!(
    SwitchControllerFortilinkSettingsNacPortsType,
    "switchcontroller_fortilinksettings_nacports",
    switchcontroller_fortilinksettings_nacports::switchcontroller_fortilinksettings_nacports_config
);
define_resource_type!(
    ReportLayoutBodyItemType,
    "report_layout_bodyitem",
    report_layout_bodyitem::report_layout_bodyitem_config
);
define_resource_type!(UserQuarantineType, "user_quarantine", user_quarantine::user_quarantine_config);
define_resource_type!(
    WirelessControllerHotspot20IconType,
    "wirelesscontroller_hotspot20_icon",
    wirelesscontroller_hotspot20_icon::wirelesscontroller_hotspot20_icon_config
);

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![
        Box::new(SystemDpdkGlobalType),
        Box::new(SystemDnsType),
        Box::new(SystemSnmpCommunityType),
        Box::new(FirewallIpmacbindingSettingType),
        Box::new(FirewallIpmacbindingTableType),
        Box::new(FirewallAddressType),
        Box::new(SystemZoneType),
        Box::new(RouterStaticType),
        Box::new(SwitchControllerDynamicPortPolicyType),
        Box::new(SwitchControllerManagedSwitchRemoteLogType),
        Box::new(SwitchControllerFortilinkSettingsNacPortsType),
        Box::new(ReportLayoutBodyItemType),
        Box::new(UserQuarantineType),
        Box::new(WirelessControllerHotspot20IconType),
    ]
}

/// Look up a resource type by name
pub fn get_resource_type(name: &str) -> Option<Box<dyn ResourceType>> {
    resource_types().into_iter().find(|t| t.name() == name)
}
