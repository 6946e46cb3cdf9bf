//! report layout body-item schema definition for FortiManager
//!
//! Table keyed by `id`, nested under a report layout:
//! `/pm/config/device/{device}/vdom/{vdom}/report/layout/{layout}/body-item`

use super::{DEVICE, FmgSchemaConfig, ScopeParam, VDOM, scoped_schema, subtable_sort};
use fmgdevice_core::schema::{AttributeSchema, AttributeType};

const PARAMS: &[ScopeParam] = &[
    DEVICE,
    VDOM,
    ScopeParam {
        attribute: "layout",
        key: "layout",
    },
];

fn parameters_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("id", AttributeType::Int).required(),
        AttributeSchema::new("name", AttributeType::String),
        AttributeSchema::new("value", AttributeType::String),
    ])
}

/// Returns the schema config for report_layout_bodyitem (ReportLayoutBodyItem)
pub fn report_layout_bodyitem_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "ReportLayoutBodyItem",
        url: "/pm/config/device/{device}/vdom/{vdom}/report/layout/{layout}/body-item",
        mkey: Some("id"),
        params: PARAMS,
        schema: scoped_schema("report_layout_bodyitem", PARAMS)
        .with_description("Configure report body item.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("id", AttributeType::Int)
                .required()
                .force_new()
                .with_description("Report item ID."),
        )
        .attribute(
            AttributeSchema::new("type", AttributeType::enumeration(&["text", "image", "chart", "misc"]))
                .with_description("Report item type."),
        )
        .attribute(AttributeSchema::new("description", AttributeType::String))
        .attribute(AttributeSchema::new("style", AttributeType::String))
        .attribute(AttributeSchema::new("top_n", AttributeType::Int))
        .attribute(AttributeSchema::new("hide", AttributeType::toggle()))
        .attribute(AttributeSchema::new("chart", AttributeType::String))
        .attribute(AttributeSchema::new("chart_options", AttributeType::StringSet))
        .attribute(AttributeSchema::new("drill_down_items", AttributeType::String))
        .attribute(AttributeSchema::new("drill_down_types", AttributeType::String))
        .attribute(
            AttributeSchema::new("parameters", parameters_table())
                .with_description("Parameters."),
        )
        .attribute(AttributeSchema::new(
            "text_component",
            AttributeType::enumeration(&["text", "heading1", "heading2", "heading3"]),
        ))
        .attribute(AttributeSchema::new("content", AttributeType::String))
        .attribute(AttributeSchema::new("title", AttributeType::String))
        .attribute(AttributeSchema::new("column", AttributeType::Int))
        .attribute(AttributeSchema::new(
            "misc_component",
            AttributeType::enumeration(&["hline", "page-break", "column-break", "section-start"]),
        ))
        .attribute(AttributeSchema::new("img_src", AttributeType::String)),
    }
}
