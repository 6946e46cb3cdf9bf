//! Provider-level configuration
//!
//! Loaded from the `provider` block of a configuration document; unset
//! connection fields fall back to the `FORTIMANAGER_ACCESS_*` environment
//! variables.

use std::collections::BTreeMap;

use fmgdevice_client::ClientConfig;
use fmgdevice_core::resource::Value;
use serde::{Deserialize, Serialize};

pub const ENV_HOSTNAME: &str = "FORTIMANAGER_ACCESS_HOSTNAME";
pub const ENV_USERNAME: &str = "FORTIMANAGER_ACCESS_USERNAME";
pub const ENV_PASSWORD: &str = "FORTIMANAGER_ACCESS_PASSWORD";
pub const ENV_TOKEN: &str = "FORTIMANAGER_ACCESS_TOKEN";

const DEFAULT_ADOM: &str = "root";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("FortiManager hostname is not set (provider.hostname or {ENV_HOSTNAME})")]
    MissingHostname,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    /// ADOM used for workspace locking when a resource names none
    pub adom: Option<String>,
    pub insecure: bool,
    pub workspace_mode: bool,
    /// `key=value` pairs consulted when a read lacks a scoping parameter
    pub import_options: Vec<String>,
    /// Default for every resource's `device_name`
    pub device_name: Option<String>,
    /// Default for every resource's `device_vdom`
    pub device_vdom: Option<String>,
}

impl ProviderConfig {
    /// Fill unset connection fields from a variable lookup
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fill = |field: &mut Option<String>, var: &str| {
            if field.is_none() {
                *field = lookup(var).filter(|v| !v.is_empty());
            }
        };
        fill(&mut self.hostname, ENV_HOSTNAME);
        fill(&mut self.username, ENV_USERNAME);
        fill(&mut self.password, ENV_PASSWORD);
        fill(&mut self.token, ENV_TOKEN);
        self
    }

    /// Fill unset connection fields from the process environment
    pub fn from_process_env(self) -> Self {
        self.with_env(|var| std::env::var(var).ok())
    }

    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let hostname = self
            .hostname
            .clone()
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingHostname)?;

        Ok(ClientConfig {
            hostname,
            username: self.username.clone(),
            password: self.password.clone(),
            token: self.token.clone(),
            insecure: self.insecure,
            workspace_mode: self.workspace_mode,
            timeout: None,
        })
    }

    /// Resolve a variable from the resource first, then from provider defaults
    pub fn get_variable(&self, attributes: &BTreeMap<String, Value>, name: &str) -> Option<String> {
        if let Some(value) = attributes.get(name).and_then(Value::to_key_string) {
            return Some(value);
        }
        match name {
            "device_name" => self.device_name.clone(),
            "device_vdom" => self.device_vdom.clone(),
            "adom" => self.adom.clone(),
            _ => None,
        }
        .filter(|v| !v.is_empty())
    }

    /// Look `key` up in the `key=value` import options
    pub fn import_option_checking(&self, key: &str) -> Option<String> {
        self.import_options.iter().find_map(|option| {
            let (k, v) = option.split_once('=')?;
            (k.trim() == key && !v.trim().is_empty()).then(|| v.trim().to_string())
        })
    }

    /// Workspace routing value for the resource's ADOM
    pub fn adom_checking(&self, attributes: &BTreeMap<String, Value>) -> String {
        let adom = self
            .get_variable(attributes, "adom")
            .unwrap_or_else(|| DEFAULT_ADOM.to_string());
        if adom == "global" {
            adom
        } else {
            format!("adom/{}", adom)
        }
    }
}
