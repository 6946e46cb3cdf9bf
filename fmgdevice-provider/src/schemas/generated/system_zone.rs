//! system zone schema definition for FortiManager
//!
//! Table keyed by `name`: `/pm/config/device/{device}/vdom/{vdom}/system/zone`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema, subtable_sort, tagging_table};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

/// Returns the schema config for system_zone (SystemZone)
pub fn system_zone_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SystemZone",
        url: "/pm/config/device/{device}/vdom/{vdom}/system/zone",
        mkey: Some("name"),
        params: VDOM_SCOPE,
        schema: scoped_schema("system_zone", VDOM_SCOPE)
        .with_description("Configure zones to group two or more interfaces.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .with_description("Zone name."),
        )
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(
            AttributeSchema::new("intrazone", AttributeType::enumeration(&["allow", "deny"]))
                .with_description("Allow or deny traffic routing between different interfaces in the same zone."),
        )
        .attribute(
            AttributeSchema::new("interface", AttributeType::StringSet)
                .with_description("Add interfaces to this zone."),
        )
        .attribute(tagging_table()),
    }
}
