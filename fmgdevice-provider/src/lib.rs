//! fmgdevice provider
//!
//! FortiManager device configuration provider.
//!
//! ## Module Structure
//!
//! - `config` - Provider-level settings and scoping-variable lookup
//! - `codec` - Expand/flatten between attributes and API objects
//! - `provider` - FmgdeviceProvider, the generic CRUD adapter
//! - `resources` - Resource type definitions
//! - `schemas` - Per-resource descriptor tables
//! - `utils` - Stateless value helpers

pub mod codec;
pub mod config;
pub mod provider;
pub mod resources;
pub mod schemas;
pub mod utils;

// Re-export main types
pub use config::ProviderConfig;
pub use provider::FmgdeviceProvider;
pub use utils::ReadMode;

use fmgdevice_core::provider::{BoxFuture, Provider, ProviderResult, ResourceType};
use fmgdevice_core::resource::{Resource, State};

use resources::resource_types;
use schemas::generated::configs;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for FmgdeviceProvider {
    fn name(&self) -> &'static str {
        "fmgdevice"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resource_types()
    }

    fn identifier(&self, resource: &Resource) -> Option<String> {
        configs()
            .iter()
            .find(|c| c.schema.resource_type == resource.id.resource_type)
            .and_then(|c| FmgdeviceProvider::identifier_for(c, &resource.attributes))
    }

    fn read(
        &self,
        resource: &Resource,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            self.read_resource(&resource, identifier.as_deref(), ReadMode::Refresh)
                .await
        })
    }

    fn import(
        &self,
        resource_type: &str,
        identifier: &str,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let resource_type = resource_type.to_string();
        let identifier = identifier.to_string();
        Box::pin(async move { self.import_resource(&resource_type, &identifier).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(&resource).await })
    }

    fn update(
        &self,
        identifier: &str,
        _from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let identifier = identifier.to_string();
        let to = to.clone();
        Box::pin(async move { self.update_resource(&identifier, &to).await })
    }

    fn delete(&self, resource: &Resource, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let resource = resource.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.delete_resource(&resource, &identifier).await })
    }
}
