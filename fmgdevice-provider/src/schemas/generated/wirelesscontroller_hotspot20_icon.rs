//! wireless-controller hotspot20 icon schema definition for FortiManager
//!
//! Table keyed by `name`:
//! `/pm/config/device/{device}/vdom/{vdom}/wireless-controller/hotspot20/icon`

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema, subtable_sort};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

fn icon_list_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("name", AttributeType::String).required(),
        AttributeSchema::new("file", AttributeType::String),
        AttributeSchema::new("lang", AttributeType::String),
        AttributeSchema::new("type", AttributeType::enumeration(&["bmp", "gif", "jpeg", "png", "tiff"])),
        AttributeSchema::new("width", AttributeType::Int),
        AttributeSchema::new("height", AttributeType::Int),
    ])
}

/// Returns the schema config for wirelesscontroller_hotspot20_icon (WirelessControllerHotspot20Icon)
pub fn wirelesscontroller_hotspot20_icon_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "WirelessControllerHotspot20Icon",
        url: "/pm/config/device/{device}/vdom/{vdom}/wireless-controller/hotspot20/icon",
        mkey: Some("name"),
        params: VDOM_SCOPE,
        schema: scoped_schema("wirelesscontroller_hotspot20_icon", VDOM_SCOPE)
        .with_description("Configure OSU provider icon.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .with_description("Icon list ID."),
        )
        .attribute(
            AttributeSchema::new("icon_list", icon_list_table())
                .with_description("Icon list."),
        ),
    }
}
