//! FortiManager device resource schema definitions

pub mod generated;

use fmgdevice_core::schema::ResourceSchema;

/// Returns all resource schemas
pub fn all_schemas() -> Vec<ResourceSchema> {
    generated::schemas()
}
