//! switch-controller managed-switch remote-log schema definition for FortiManager
//!
//! Table keyed by `name`, nested under a managed switch:
//! `/pm/config/device/{device}/vdom/{vdom}/switch-controller/managed-switch/{managed_switch}/remote-log`

use super::{DEVICE, FmgSchemaConfig, ScopeParam, VDOM, scoped_schema};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, types};

const PARAMS: &[ScopeParam] = &[
    DEVICE,
    VDOM,
    ScopeParam {
        attribute: "managed_switch",
        key: "managed_switch",
    },
];

const SEVERITIES: &[&str] = &[
    "emergency",
    "alert",
    "critical",
    "error",
    "warning",
    "notification",
    "information",
    "debug",
];

const FACILITIES: &[&str] = &[
    "kernel", "user", "mail", "daemon", "auth", "syslog", "lpr", "news", "uucp", "cron",
    "authpriv", "ftp", "ntp", "audit", "alert", "clock", "local0", "local1", "local2", "local3",
    "local4", "local5", "local6", "local7",
];

/// Returns the schema config for switchcontroller_managedswitch_remotelog (SwitchControllerManagedSwitchRemoteLog)
pub fn switchcontroller_managedswitch_remotelog_config() -> FmgSchemaConfig {
    FmgSchemaConfig {
        type_name: "SwitchControllerManagedSwitchRemoteLog",
        url: "/pm/config/device/{device}/vdom/{vdom}/switch-controller/managed-switch/{managed_switch}/remote-log",
        mkey: Some("name"),
        params: PARAMS,
        schema: scoped_schema("switchcontroller_managedswitch_remotelog", PARAMS)
        .with_description("Configure logging by FortiSwitch device to a remote syslog server.")
        .attribute(
            AttributeSchema::new("name", AttributeType::String)
                .required()
                .force_new()
                .with_description("Remote log name."),
        )
        .attribute(AttributeSchema::new("status", AttributeType::toggle()))
        .attribute(
            AttributeSchema::new("server", AttributeType::String)
                .with_description("IPv4 address of the remote syslog server."),
        )
        .attribute(AttributeSchema::new("port", types::port()))
        .attribute(
            AttributeSchema::new("severity", AttributeType::enumeration(SEVERITIES))
                .with_description("Severity of logs to be transferred to remote log server."),
        )
        .attribute(AttributeSchema::new("csv", AttributeType::toggle()))
        .attribute(AttributeSchema::new("facility", AttributeType::enumeration(FACILITIES))),
    }
}
