//! FortiManager device provider implementation
//!
//! One generic adapter drives every resource type. The descriptor table of
//! the type supplies the schema, URL template, natural key and scoping
//! parameters; the adapter resolves the parameters, expands the body, calls
//! the [`FortiApi`] and flattens the answer back into state.

use std::collections::BTreeMap;
use std::sync::Arc;

use fmgdevice_client::{ClientError, FortiApi, FortiClient, Object, Target};
use fmgdevice_core::provider::{ProviderError, ProviderResult};
use fmgdevice_core::resource::{Resource, ResourceId, State, Value};
use fmgdevice_core::schema::AttributeType;

use crate::codec::{get_object, refresh_object};
use crate::config::ProviderConfig;
use crate::schemas::generated::{FmgSchemaConfig, configs};
use crate::utils::{ReadMode, scalar_to_string};

/// Get the FmgSchemaConfig for a resource type
fn get_schema_config(resource_type: &str) -> Option<FmgSchemaConfig> {
    configs()
        .into_iter()
        .find(|c| c.schema.resource_type == resource_type)
}

/// How missing scoping parameters are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// Resource data and provider defaults only
    Write,
    /// Also consult the provider import options
    Read,
}

/// A resolved target plus any parameters recovered from import options
struct Scope {
    target: Target,
    recovered: BTreeMap<String, Value>,
}

/// FortiManager device configuration provider
pub struct FmgdeviceProvider {
    client: Arc<dyn FortiApi>,
    config: ProviderConfig,
}

impl FmgdeviceProvider {
    pub fn new(client: Arc<dyn FortiApi>, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Build a provider backed by a [`FortiClient`] for the configured host
    pub fn connect(config: ProviderConfig) -> ProviderResult<Self> {
        let client_config = config
            .client_config()
            .map_err(|e| ProviderError::new(e.to_string()))?;
        let client = FortiClient::new(client_config).map_err(|e| {
            ProviderError::new(format!("Failed to build FortiManager client: {}", e)).with_cause(e)
        })?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Release the client's session on FortiManager
    pub async fn close(&self) -> ProviderResult<()> {
        self.client.close().await.map_err(|e| {
            ProviderError::new(format!("Failed to close FortiManager session: {}", e)).with_cause(e)
        })
    }

    fn schema_config(&self, id: &ResourceId) -> ProviderResult<FmgSchemaConfig> {
        get_schema_config(&id.resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })
    }

    /// Identifier derived from the natural key. Singletons are stored under
    /// their type name; an unset or zero key is left to the server.
    pub fn identifier_for(
        config: &FmgSchemaConfig,
        attributes: &BTreeMap<String, Value>,
    ) -> Option<String> {
        let Some(mkey) = config.mkey else {
            return Some(config.type_name.to_string());
        };
        match attributes.get(mkey) {
            Some(Value::Int(0)) | None => None,
            Some(value) => value.to_key_string(),
        }
    }

    /// Resolve the scoping parameters of a resource into a client target
    fn resolve(
        &self,
        config: &FmgSchemaConfig,
        attributes: &BTreeMap<String, Value>,
        lookup: Lookup,
    ) -> ProviderResult<Scope> {
        let mut target = Target::new(config.url);
        let mut recovered = BTreeMap::new();

        for param in config.params {
            let value = match self.config.get_variable(attributes, param.attribute) {
                Some(value) => value,
                None if lookup == Lookup::Read => {
                    let value = self
                        .config
                        .import_option_checking(param.attribute)
                        .ok_or_else(|| missing_parameter(param.attribute))?;
                    recovered.insert(param.attribute.to_string(), Value::string(value.clone()));
                    value
                }
                None => return Err(missing_parameter(param.attribute)),
            };
            target.paradict.insert(param.key.to_string(), value);
        }

        target
            .ws_params
            .insert("adom".to_string(), self.config.adom_checking(attributes));
        target.retries = 1;

        Ok(Scope { target, recovered })
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource using its configuration
    pub async fn read_resource(
        &self,
        resource: &Resource,
        identifier: Option<&str>,
        mode: ReadMode,
    ) -> ProviderResult<State> {
        let id = resource.id.clone();
        let config = self.schema_config(&id)?;

        let (identifier, adopted) = match identifier {
            Some(identifier) => (identifier.to_string(), false),
            None => match self.find_assigned(&config, resource).await? {
                Some(identifier) => (identifier, true),
                None => return Ok(State::not_found(id)),
            },
        };
        let identifier = identifier.as_str();

        let scope = self
            .resolve(&config, &resource.attributes, Lookup::Read)
            .map_err(|e| e.for_resource(id.clone()))?;
        let target = match config.mkey {
            Some(_) => scope.target.with_mkey(identifier),
            None => scope.target,
        };

        let obj = self
            .client
            .read(&target)
            .await
            .map_err(|e| api_error("reading", &config, &id, e))?;

        let Some(obj) = obj else {
            log::warn!("resource {} ({}) not found, removing from state", id, identifier);
            return Ok(State::not_found(id));
        };

        let mut attributes = refresh_object(&config.schema, &obj, &resource.attributes, mode)
            .map_err(|e| ProviderError::new(e.to_string()).for_resource(id.clone()))?;

        // Parameters are not part of the object; keep the ones we addressed it with
        for (name, attr) in &config.schema.attributes {
            if attr.parameter
                && let Some(value) = resource.attributes.get(name)
            {
                attributes.insert(name.clone(), value.clone());
            }
        }
        attributes.extend(scope.recovered);

        // A zero key in configuration stands for whichever key the server assigned
        if adopted
            && let Some(mkey) = config.mkey
            && let Some(key) = resource.attributes.get(mkey)
        {
            attributes.insert(mkey.to_string(), key.clone());
        }

        Ok(State::existing(id, attributes).with_identifier(identifier))
    }

    /// Find the entry a resource with a server-assigned key was created as.
    ///
    /// Nothing in configuration names the entry, so the collection is listed
    /// and the first entry whose configured attributes all match is taken.
    async fn find_assigned(
        &self,
        config: &FmgSchemaConfig,
        resource: &Resource,
    ) -> ProviderResult<Option<String>> {
        if !server_assigned_key(config, &resource.attributes) {
            return Ok(None);
        }
        let id = &resource.id;
        let scope = self
            .resolve(config, &resource.attributes, Lookup::Read)
            .map_err(|e| e.for_resource(id.clone()))?;

        let entries = self
            .client
            .list(&scope.target)
            .await
            .map_err(|e| api_error("reading", config, id, e))?;

        let found = entries
            .iter()
            .find(|entry| matches_configuration(config, entry, &resource.attributes))
            .and_then(|entry| assigned_key(config, entry));
        if let Some(key) = &found {
            log::debug!("{} matches existing entry {}", id, key);
        }
        Ok(found)
    }

    /// Read an unmanaged object by identifier
    pub async fn import_resource(
        &self,
        resource_type: &str,
        identifier: &str,
    ) -> ProviderResult<State> {
        let resource = Resource::new(resource_type, identifier);
        self.read_resource(&resource, Some(identifier), ReadMode::Import)
            .await
    }

    /// Create a resource using its configuration
    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let id = resource.id.clone();
        let config = self.schema_config(&id)?;

        let scope = self
            .resolve(&config, &resource.attributes, Lookup::Write)
            .map_err(|e| e.for_resource(id.clone()))?;
        let body = get_object(&config.schema, &resource.attributes)
            .map_err(|e| ProviderError::new(e.to_string()).for_resource(id.clone()))?;

        let response = self
            .client
            .create(&scope.target, body)
            .await
            .map_err(|e| api_error("creating", &config, &id, e))?;

        let identifier = Self::identifier_for(&config, &resource.attributes)
            .or_else(|| response.as_ref().and_then(|obj| assigned_key(&config, obj)))
            .ok_or_else(|| {
                ProviderError::new(format!(
                    "Error creating {} resource: response carries no key",
                    config.type_name
                ))
                .for_resource(id.clone())
            })?;
        log::debug!("created {} as {}", id, identifier);

        self.read_back(resource, &identifier, "creating", &config)
            .await
    }

    /// Update a resource
    pub async fn update_resource(
        &self,
        identifier: &str,
        to: &Resource,
    ) -> ProviderResult<State> {
        let id = to.id.clone();
        let config = self.schema_config(&id)?;

        let scope = self
            .resolve(&config, &to.attributes, Lookup::Write)
            .map_err(|e| e.for_resource(id.clone()))?;
        let target = match config.mkey {
            Some(_) => scope.target.with_mkey(identifier),
            None => scope.target,
        };
        let mut body = get_object(&config.schema, &to.attributes)
            .map_err(|e| ProviderError::new(e.to_string()).for_resource(id.clone()))?;
        // The entry keeps the key the server gave it
        if server_assigned_key(&config, &to.attributes)
            && let Some(attr) = config.mkey.and_then(|mkey| config.schema.get(mkey))
        {
            body.remove(&attr.provider_name);
        }

        self.client
            .update(&target, body)
            .await
            .map_err(|e| api_error("updating", &config, &id, e))?;

        let identifier = Self::identifier_for(&config, &to.attributes)
            .unwrap_or_else(|| identifier.to_string());

        self.read_back(to, &identifier, "updating", &config).await
    }

    /// Delete a resource
    pub async fn delete_resource(&self, resource: &Resource, identifier: &str) -> ProviderResult<()> {
        let id = resource.id.clone();
        let config = self.schema_config(&id)?;

        let scope = self
            .resolve(&config, &resource.attributes, Lookup::Write)
            .map_err(|e| e.for_resource(id.clone()))?;
        let target = match config.mkey {
            Some(_) => scope.target.with_mkey(identifier),
            None => scope.target,
        };

        self.client
            .delete(&target)
            .await
            .map_err(|e| api_error("deleting", &config, &id, e))
    }

    async fn read_back(
        &self,
        resource: &Resource,
        identifier: &str,
        verb: &str,
        config: &FmgSchemaConfig,
    ) -> ProviderResult<State> {
        let state = self
            .read_resource(resource, Some(identifier), ReadMode::Refresh)
            .await?;
        if !state.exists {
            return Err(ProviderError::new(format!(
                "Error {} {} resource: object {} not found after write",
                verb, config.type_name, identifier
            ))
            .for_resource(resource.id.clone()));
        }
        Ok(state)
    }
}

fn missing_parameter(name: &str) -> ProviderError {
    ProviderError::new(format!("Parameter {} is missing", name))
}

fn api_error(verb: &str, config: &FmgSchemaConfig, id: &ResourceId, e: ClientError) -> ProviderError {
    ProviderError::new(format!("Error {} {} resource: {}", verb, config.type_name, e))
        .for_resource(id.clone())
        .with_cause(e)
}

/// Whether the resource leaves its integer key for FortiManager to assign
fn server_assigned_key(config: &FmgSchemaConfig, attributes: &BTreeMap<String, Value>) -> bool {
    let Some(mkey) = config.mkey else {
        return false;
    };
    config
        .schema
        .get(mkey)
        .is_some_and(|attr| matches!(attr.attr_type.base(), AttributeType::Int))
        && matches!(attributes.get(mkey), None | Some(Value::Int(0)))
}

/// Whether every configured attribute of a resource has its value in `entry`
fn matches_configuration(
    config: &FmgSchemaConfig,
    entry: &Object,
    desired: &BTreeMap<String, Value>,
) -> bool {
    let Ok(current) = refresh_object(&config.schema, entry, desired, ReadMode::Refresh) else {
        return false;
    };

    let mut compared = 0;
    for (name, value) in desired {
        if config.mkey == Some(name.as_str()) {
            continue;
        }
        let Some(attr) = config.schema.get(name) else {
            return false;
        };
        if !attr.is_sent() {
            continue;
        }
        match current.get(name) {
            Some(actual) if attr.values_equal(value, actual) => compared += 1,
            _ => return false,
        }
    }
    compared > 0
}

/// Key FortiManager assigned to a new table entry, from the create response
fn assigned_key(config: &FmgSchemaConfig, obj: &Object) -> Option<String> {
    let attr = config.schema.get(config.mkey?)?;
    obj.get(&attr.provider_name)
        .and_then(scalar_to_string)
        .filter(|key| !key.is_empty() && key != "0")
}
