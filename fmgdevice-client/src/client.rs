//! FortiManager JSON-RPC client
//!
//! Every call is a POST of
//! `{"id": n, "method": m, "params": [{"url": u, "data": d}], "session": s}`
//! to `/jsonrpc`. The answer carries one result per param with a status
//! code; anything but 0 is an error, and -3 means the object does not exist.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::api::{BoxFuture, FortiApi, Object, Target};
use crate::error::{ClientError, ClientResult};

/// Connection settings for a FortiManager instance
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Host name or address, optionally with port
    pub hostname: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// API token; takes precedence over username/password
    pub token: Option<String>,
    /// Accept self-signed certificates
    pub insecure: bool,
    /// Wrap writes in ADOM workspace lock/commit/unlock
    pub workspace_mode: bool,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    id: u64,
    method: &'a str,
    params: [RpcParams<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<String>,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a serde_json::Value>,
    /// Ask for option values as strings rather than enum indices
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Vec<RpcResult>,
    #[serde(default)]
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    status: RpcStatus,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    code: i64,
    #[serde(default)]
    message: String,
}

/// JSON-RPC client for FortiManager
pub struct FortiClient {
    http: reqwest::Client,
    endpoint: String,
    config: ClientConfig,
    session: Mutex<Option<String>>,
    next_id: AtomicU64,
}

impl FortiClient {
    /// Create a client for `https://<hostname>/jsonrpc`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let endpoint = format!("https://{}/jsonrpc", config.hostname);
        Self::with_endpoint(endpoint, config)
    }

    /// Create a client for an explicit endpoint URL
    pub fn with_endpoint(endpoint: impl Into<String>, config: ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(config.insecure);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
            config,
            session: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    /// Open a session with username/password.
    ///
    /// Not needed with token authentication; calls log in lazily otherwise.
    pub async fn login(&self) -> ClientResult<()> {
        let mut session = self.session.lock().await;
        *session = Some(self.open_session().await?);
        Ok(())
    }

    async fn open_session(&self) -> ClientResult<String> {
        let (Some(user), Some(passwd)) = (&self.config.username, &self.config.password) else {
            return Err(ClientError::Auth(
                "no token and no username/password configured".to_string(),
            ));
        };

        let data = json!({ "user": user, "passwd": passwd });
        let response = self.post("exec", "/sys/login/user", Some(&data), None).await?;
        check_status(&response, "/sys/login/user")
            .map_err(|e| ClientError::Auth(e.to_string()))?;

        let session = response
            .session
            .ok_or_else(|| ClientError::Auth("login response has no session".to_string()))?;
        log::debug!("logged in to {} as {}", self.config.hostname, user);
        Ok(session)
    }

    /// Close the session, if one is open
    pub async fn logout(&self) -> ClientResult<()> {
        let session = self.session.lock().await.take();
        if let Some(session) = session {
            let response = self.post("exec", "/sys/logout", None, Some(session)).await?;
            check_status(&response, "/sys/logout")?;
        }
        Ok(())
    }

    /// Session for the next call, logging in first if there is none.
    /// The lock is held across the login so concurrent calls share one session.
    async fn current_session(&self) -> ClientResult<Option<String>> {
        if self.config.token.is_some() {
            return Ok(None);
        }
        let mut session = self.session.lock().await;
        if session.is_none() {
            *session = Some(self.open_session().await?);
        }
        Ok(session.clone())
    }

    async fn post(
        &self,
        method: &str,
        url: &str,
        data: Option<&serde_json::Value>,
        session: Option<String>,
    ) -> ClientResult<RpcResponse> {
        let request = RpcRequest {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params: [RpcParams {
                url,
                data,
                verbose: 1,
            }],
            session,
        };
        log::debug!("jsonrpc {} {}", method, url);

        let mut builder = self.http.post(&self.endpoint).json(&request);
        if let Some(token) = &self.config.token {
            builder = builder.bearer_auth(token);
        }

        let response: RpcResponse = builder.send().await?.error_for_status()?.json().await?;
        Ok(response)
    }

    /// Issue one JSON-RPC call and return the data of its single result
    pub async fn call(
        &self,
        method: &str,
        url: &str,
        data: Option<&serde_json::Value>,
        retries: u32,
    ) -> ClientResult<Option<serde_json::Value>> {
        let attempts = retries.max(1);
        let mut attempt = 1;
        loop {
            let session = self.current_session().await?;
            match self.post(method, url, data, session).await {
                Ok(response) => {
                    check_status(&response, url)?;
                    return Ok(response.result.into_iter().next().and_then(|r| r.data));
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    log::warn!("{} {} failed (attempt {}/{}): {}", method, url, attempt, attempts, e);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn exec(&self, url: &str) -> ClientResult<()> {
        self.call("exec", url, None, 1).await.map(|_| ())
    }

    /// Run a write, wrapped in a workspace lock when workspace mode is on
    async fn write(
        &self,
        method: &str,
        target: &Target,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> ClientResult<Option<serde_json::Value>> {
        let workspace = if self.config.workspace_mode {
            target
                .ws_params
                .get("adom")
                .map(|adom| format!("/dvmdb/{}/workspace", adom))
        } else {
            None
        };

        let Some(workspace) = workspace else {
            return self.call(method, url, body.as_ref(), target.retries).await;
        };

        self.exec(&format!("{}/lock", workspace)).await?;
        let mut result = self.call(method, url, body.as_ref(), target.retries).await;
        if result.is_ok()
            && let Err(e) = self.exec(&format!("{}/commit", workspace)).await
        {
            result = Err(e);
        }
        if let Err(e) = self.exec(&format!("{}/unlock", workspace)).await {
            log::warn!("failed to unlock {}: {}", workspace, e);
        }
        result
    }
}

fn check_status(response: &RpcResponse, url: &str) -> ClientResult<()> {
    let result = response
        .result
        .first()
        .ok_or_else(|| ClientError::Protocol(format!("empty result for {}", url)))?;
    if result.status.code == 0 {
        Ok(())
    } else {
        Err(ClientError::Api {
            code: result.status.code,
            message: result.status.message.clone(),
            url: url.to_string(),
        })
    }
}

fn into_object(data: Option<serde_json::Value>) -> Option<Object> {
    match data {
        Some(serde_json::Value::Object(map)) => Some(map),
        // Some endpoints wrap a single object in a list
        Some(serde_json::Value::Array(items)) => items.into_iter().find_map(|item| match item {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        }),
        _ => None,
    }
}

fn into_objects(data: Option<serde_json::Value>) -> Vec<Object> {
    match data {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::Object(map)) => vec![map],
        _ => Vec::new(),
    }
}

impl FortiApi for FortiClient {
    fn create(&self, target: &Target, body: Object) -> BoxFuture<'_, ClientResult<Option<Object>>> {
        let target = target.clone();
        Box::pin(async move {
            // Singletons always exist; "creating" one means setting it
            let (method, url) = if target.is_singleton() {
                ("set", target.object_url()?)
            } else {
                ("add", target.collection_url()?)
            };
            let data = self
                .write(method, &target, &url, Some(serde_json::Value::Object(body)))
                .await?;
            Ok(into_object(data))
        })
    }

    fn read(&self, target: &Target) -> BoxFuture<'_, ClientResult<Option<Object>>> {
        let target = target.clone();
        Box::pin(async move {
            let url = target.object_url()?;
            match self.call("get", &url, None, target.retries).await {
                Ok(data) => Ok(into_object(data)),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    fn list(&self, target: &Target) -> BoxFuture<'_, ClientResult<Vec<Object>>> {
        let target = target.clone();
        Box::pin(async move {
            let url = target.collection_url()?;
            match self.call("get", &url, None, target.retries).await {
                Ok(data) => Ok(into_objects(data)),
                Err(e) if e.is_not_found() => Ok(Vec::new()),
                Err(e) => Err(e),
            }
        })
    }

    fn update(&self, target: &Target, body: Object) -> BoxFuture<'_, ClientResult<Option<Object>>> {
        let target = target.clone();
        Box::pin(async move {
            let url = target.object_url()?;
            let data = self
                .write("update", &target, &url, Some(serde_json::Value::Object(body)))
                .await?;
            Ok(into_object(data))
        })
    }

    fn delete(&self, target: &Target) -> BoxFuture<'_, ClientResult<()>> {
        let target = target.clone();
        Box::pin(async move {
            let url = target.object_url()?;
            self.write("delete", &target, &url, None).await?;
            Ok(())
        })
    }

    fn close(&self) -> BoxFuture<'_, ClientResult<()>> {
        Box::pin(self.logout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format() {
        let data = json!({"name": "dmz"});
        let request = RpcRequest {
            id: 7,
            method: "add",
            params: [RpcParams {
                url: "/pm/config/device/fgt/vdom/root/system/zone",
                data: Some(&data),
                verbose: 1,
            }],
            session: Some("abc".to_string()),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "method": "add",
                "params": [{
                    "url": "/pm/config/device/fgt/vdom/root/system/zone",
                    "data": {"name": "dmz"},
                    "verbose": 1
                }],
                "session": "abc"
            })
        );
    }

    #[test]
    fn non_zero_status_is_api_error() {
        let response: RpcResponse = serde_json::from_value(json!({
            "id": 1,
            "result": [{"status": {"code": -3, "message": "Object does not exist"}, "url": "/x"}]
        }))
        .unwrap();
        let err = check_status(&response, "/x").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn list_data_yields_first_object() {
        let data = json!([{"name": "dmz"}]);
        let obj = into_object(Some(data)).unwrap();
        assert_eq!(obj["name"], json!("dmz"));
        assert!(into_object(Some(json!("scalar"))).is_none());
        assert!(into_object(None).is_none());
    }

    #[test]
    fn collection_data_yields_every_object() {
        let objects = into_objects(Some(json!([{"seq-num": 1}, "junk", {"seq-num": 2}])));
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1]["seq-num"], json!(2));
        assert!(into_objects(Some(serde_json::Value::Null)).is_empty());
    }
}
