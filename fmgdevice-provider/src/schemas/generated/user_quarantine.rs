//! user quarantine schema definition for FortiManager
//!
//! Singleton: `/pm/config/device/{device}/vdom/{vdom}/user/quarantine`.
//! `targets` rows carry their own nested `macs` table.

use super::{FmgSchemaConfig, VDOM_SCOPE, scoped_schema, subtable_sort};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

fn macs_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("mac", types::mac_address())
            .required()
            .case_insensitive(),
        AttributeSchema::new("description", AttributeType::String),
        AttributeSchema::new("drop", AttributeType::toggle()),
        AttributeSchema::new("parent", AttributeType::String),
    ])
}

fn targets_table() -> AttributeType {
    AttributeType::Table(vec![
        AttributeSchema::new("entry", AttributeType::String).required(),
        AttributeSchema::new("description", AttributeType::String),
        AttributeSchema::new("macs", macs_table()),
    ])
}

/// Returns the schema config for user_quarantine (UserQuarantine)
pub fn user_quarantine_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "UserQuarantine",
        url: "/pm/config/device/{device}/vdom/{vdom}/user/quarantine",
        mkey: None,
        params: VDOM_SCOPE,
        schema: scoped_schema("user_quarantine", VDOM_SCOPE)
        .with_description("Configure quarantine support.")
        .attribute(subtable_sort())
        .attribute(
            AttributeSchema::new("quarantine", AttributeType::toggle())
                .with_description("Enable/disable quarantine."),
        )
        .attribute(AttributeSchema::new("traffic_policy", AttributeType::StringList))
        .attribute(AttributeSchema::new("firewall_groups", AttributeType::StringList))
        .attribute(
            AttributeSchema::new("targets", targets_table())
                .with_description("Quarantine entry to hold multiple MACs."),
        ),
    }
}
