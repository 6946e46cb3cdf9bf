//! Effect - A side effect described as a value
//!
//! Effects are produced by the differ and executed by the Interpreter.

use crate::resource::{Resource, ResourceId, State};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Refresh a resource from the management API
    Read(Resource),
    Create(Resource),
    Update {
        id: ResourceId,
        /// Key the object is currently stored under
        identifier: String,
        from: State,
        to: Resource,
    },
    /// Delete then create, for changes to force-new attributes
    Replace {
        id: ResourceId,
        identifier: String,
        from: State,
        to: Resource,
    },
    Delete {
        resource: Resource,
        identifier: String,
    },
}

impl Effect {
    pub fn resource_id(&self) -> &ResourceId {
        match self {
            Effect::Read(r) | Effect::Create(r) => &r.id,
            Effect::Update { id, .. } | Effect::Replace { id, .. } => id,
            Effect::Delete { resource, .. } => &resource.id,
        }
    }

    /// Whether executing this Effect changes anything remotely
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Effect::Read(_))
    }
}
