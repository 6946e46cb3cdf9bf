//! fmgdevice Core
//!
//! Core library for managing FortiManager device configuration objects:
//! the value model, resource schemas, the Provider trait, and planning and
//! applying changes as values.

pub mod differ;
pub mod effect;
pub mod interpreter;
pub mod plan;
pub mod provider;
pub mod resource;
pub mod schema;
