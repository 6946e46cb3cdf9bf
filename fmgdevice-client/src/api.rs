//! The collaborator contract resource adapters call into
//!
//! `FortiApi` mirrors the generated client surface
//! (`Create<Resource>(obj, paradict, wsParams)`, `Read<Resource>(mkey, paradict)`, ...)
//! with a single generic method per verb. The object type is carried by the
//! URL template of the [`Target`].

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use crate::error::{ClientError, ClientResult};

/// Addressing parameters (device, vdom, parent keys) substituted into URLs
pub type ParaDict = BTreeMap<String, String>;

/// Workspace routing parameters for writes (e.g., `adom` -> `adom/root`)
pub type WsParams = BTreeMap<String, String>;

/// JSON object sent to or received from FortiManager
pub type Object = serde_json::Map<String, serde_json::Value>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One object (or object collection) on FortiManager
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// URL template, e.g. "/pm/config/device/{device}/vdom/{vdom}/system/zone"
    pub url: String,
    /// Object key within the collection; None for singleton objects
    pub mkey: Option<String>,
    pub paradict: ParaDict,
    pub ws_params: WsParams,
    /// Total attempts for transport failures
    pub retries: u32,
}

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mkey: None,
            paradict: ParaDict::new(),
            ws_params: WsParams::new(),
            retries: 1,
        }
    }

    pub fn with_mkey(mut self, mkey: impl Into<String>) -> Self {
        self.mkey = Some(mkey.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.paradict.insert(key.into(), value.into());
        self
    }

    pub fn is_singleton(&self) -> bool {
        self.mkey.is_none()
    }

    /// Collection (or singleton) URL with every placeholder filled in
    pub fn collection_url(&self) -> ClientResult<String> {
        expand_url(&self.url, &self.paradict)
    }

    /// URL of the addressed object
    pub fn object_url(&self) -> ClientResult<String> {
        let base = self.collection_url()?;
        Ok(match &self.mkey {
            Some(mkey) => format!("{}/{}", base, escape_segment(mkey)),
            None => base,
        })
    }
}

/// Fill `{key}` placeholders from the parameter map
pub fn expand_url(template: &str, params: &ParaDict) -> ClientResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| ClientError::Protocol(format!("Unterminated placeholder in {}", template)))?;
        let key = &after[..end];
        match params.get(key) {
            Some(value) if !value.is_empty() => out.push_str(&escape_segment(value)),
            _ => return Err(ClientError::MissingUrlParameter(key.to_string())),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

/// FortiManager expects a literal slash inside a name to be escaped
fn escape_segment(segment: &str) -> String {
    segment.replace('/', "\\/")
}

/// Generic CRUD surface of the FortiManager API
pub trait FortiApi: Send + Sync {
    /// Create the object; returns the response data (which may carry a
    /// server-assigned key)
    fn create(&self, target: &Target, body: Object) -> BoxFuture<'_, ClientResult<Option<Object>>>;

    /// Read the object; `None` when it does not exist
    fn read(&self, target: &Target) -> BoxFuture<'_, ClientResult<Option<Object>>>;

    /// Read every entry of the target's collection
    fn list(&self, target: &Target) -> BoxFuture<'_, ClientResult<Vec<Object>>>;

    /// Update the object in place
    fn update(&self, target: &Target, body: Object) -> BoxFuture<'_, ClientResult<Option<Object>>>;

    /// Delete the object
    fn delete(&self, target: &Target) -> BoxFuture<'_, ClientResult<()>>;

    /// Release whatever the connection holds on the server (a login session)
    fn close(&self) -> BoxFuture<'_, ClientResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_target() -> Target {
        Target::new("/pm/config/device/{device}/vdom/{vdom}/system/zone")
            .with_param("device", "fgt-01")
            .with_param("vdom", "root")
    }

    #[test]
    fn expands_placeholders() {
        let target = zone_target().with_mkey("dmz");
        assert_eq!(
            target.collection_url().unwrap(),
            "/pm/config/device/fgt-01/vdom/root/system/zone"
        );
        assert_eq!(
            target.object_url().unwrap(),
            "/pm/config/device/fgt-01/vdom/root/system/zone/dmz"
        );
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let target = Target::new("/pm/config/device/{device}/vdom/{vdom}/system/zone")
            .with_param("device", "fgt-01");
        match target.collection_url() {
            Err(ClientError::MissingUrlParameter(key)) => assert_eq!(key, "vdom"),
            other => panic!("Expected missing parameter, got {:?}", other),
        }
    }

    #[test]
    fn empty_placeholder_value_is_an_error() {
        let target = zone_target().with_param("vdom", "");
        assert!(target.collection_url().is_err());
    }

    #[test]
    fn slashes_in_keys_are_escaped() {
        let target = zone_target().with_mkey("10.0.0.0/24");
        assert_eq!(
            target.object_url().unwrap(),
            "/pm/config/device/fgt-01/vdom/root/system/zone/10.0.0.0\\/24"
        );
    }

    #[test]
    fn singleton_object_url_is_collection_url() {
        let target = Target::new("/pm/config/device/{device}/global/system/dns")
            .with_param("device", "fgt-01");
        assert!(target.is_singleton());
        assert_eq!(
            target.object_url().unwrap(),
            "/pm/config/device/fgt-01/global/system/dns"
        );
    }
}
