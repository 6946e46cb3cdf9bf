//! system dpdk global schema definition for FortiManager
//!
//! Singleton: `/pm/config/device/{device}/global/system/dpdk/global`

use super::{FmgSchemaConfig, GLOBAL_SCOPE, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

/// Returns the schema config for system_dpdk_global (SystemDpdkGlobal)
pub fn system_dpdk_global_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SystemDpdkGlobal",
        url: "/pm/config/device/{device}/global/system/dpdk/global",
        mkey: None,
        params: GLOBAL_SCOPE,
        schema: scoped_schema("system_dpdk_global", GLOBAL_SCOPE)
        .with_description("Configure global DPDK options.")
        .attribute(
            AttributeSchema::new("status", AttributeType::toggle())
                .with_description("Enable/disable DPDK operation for the entire system."),
        )
        .attribute(
            AttributeSchema::new("interface", AttributeType::StringList)
                .with_description("Physical interfaces that enable DPDK."),
        )
        .attribute(
            AttributeSchema::new("multiqueue", AttributeType::toggle())
                .with_description("Enable/disable multi-queue RX/TX support for all DPDK ports."),
        )
        .attribute(
            AttributeSchema::new("sleep_on_idle", AttributeType::toggle())
                .with_description("Enable/disable sleep-on-idle support for all FDH engines."),
        )
        .attribute(
            AttributeSchema::new("elasticbuffer", AttributeType::toggle())
                .with_description("Enable/disable elasticbuffer support for all DPDK ports."),
        )
        .attribute(
            AttributeSchema::new("per_session_accounting", AttributeType::enumeration(&["disable", "traffic-log-only", "enable"]))
                .with_description("Enable/disable per-session accounting."),
        )
        .attribute(
            AttributeSchema::new("ipsec_offload", AttributeType::toggle())
                .with_description("Enable/disable DPDK IPsec phase 2 offloading."),
        )
        .attribute(
            AttributeSchema::new("hugepage_percentage", AttributeType::Int)
                .with_description("Percentage of main memory allocated to hugepages."),
        )
        .attribute(
            AttributeSchema::new("mbufpool_percentage", AttributeType::Int)
                .with_description("Percentage of main memory allocated to DPDK packet buffer."),
        )
        .attribute(
            AttributeSchema::new("session_table_percentage", AttributeType::Int)
                .with_description("Percentage of main memory allocated to DPDK session table."),
        )
        .attribute(
            AttributeSchema::new("protects", AttributeType::StringSet)
                .with_description("Special arguments for device."),
        ),
    }
}
