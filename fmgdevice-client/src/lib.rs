//! # fmgdevice client
//!
//! JSON-RPC client for FortiManager device configuration objects.
//!
//! Resource adapters talk to FortiManager through the [`FortiApi`] trait;
//! [`FortiClient`] is the HTTP implementation.
//!
//! ```rust,ignore
//! use fmgdevice_client::{ClientConfig, FortiApi, FortiClient, Target};
//!
//! let client = FortiClient::new(ClientConfig {
//!     hostname: "fmg.example.com".to_string(),
//!     token: Some(std::env::var("FORTIMANAGER_ACCESS_TOKEN")?),
//!     ..Default::default()
//! })?;
//!
//! let target = Target::new("/pm/config/device/{device}/vdom/{vdom}/system/zone")
//!     .with_mkey("dmz")
//!     .with_param("device", "fgt-01")
//!     .with_param("vdom", "root");
//! let zone = client.read(&target).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;

pub use api::{BoxFuture, FortiApi, Object, ParaDict, Target, WsParams, expand_url};
pub use client::{ClientConfig, FortiClient};
pub use error::{ClientError, ClientResult, OBJECT_NOT_FOUND};
