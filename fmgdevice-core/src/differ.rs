//! Differ - Compare desired state with current state to generate a Plan
//!
//! Compares the desired state declared in a configuration document with the
//! current state read back from FortiManager, and generates the Effects
//! needed to converge.

use std::collections::{BTreeMap, HashMap};

use crate::effect::Effect;
use crate::plan::Plan;
use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::ResourceSchema;

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// Resource does not exist -> needs creation
    Create(Resource),
    /// Resource exists with differences -> needs update
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// A force-new attribute changed -> delete and create
    Replace {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// Resource exists with no differences -> no action needed
    NoChange(ResourceId),
}

impl Diff {
    /// Returns whether this Diff involves a change
    pub fn is_change(&self) -> bool {
        !matches!(self, Diff::NoChange(_))
    }
}

/// Compare desired state with current state to compute a Diff
///
/// Without a schema every attribute is compared structurally.
pub fn diff(desired: &Resource, current: &State, schema: Option<&ResourceSchema>) -> Diff {
    if !current.exists {
        return Diff::Create(desired.clone());
    }

    let changed = find_changed_attributes(&desired.attributes, &current.attributes, schema);

    if changed.is_empty() {
        return Diff::NoChange(desired.id.clone());
    }

    let force_new = schema.is_some_and(|s| {
        changed
            .iter()
            .any(|name| s.get(name).is_some_and(|a| a.force_new))
    });

    if force_new {
        Diff::Replace {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    } else {
        Diff::Update {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    }
}

/// Find changed attributes between desired and current state
fn find_changed_attributes(
    desired: &BTreeMap<String, Value>,
    current: &BTreeMap<String, Value>,
    schema: Option<&ResourceSchema>,
) -> Vec<String> {
    let mut changed = Vec::new();

    for (key, desired_value) in desired {
        let attr = schema.and_then(|s| s.get(key));

        // Addressing parameters and server-assigned values never drift
        if attr.is_some_and(|a| a.parameter || a.computed) {
            continue;
        }

        let same = match (current.get(key), attr) {
            (Some(current_value), Some(attr)) => attr.values_equal(desired_value, current_value),
            (Some(current_value), None) => current_value == desired_value,
            (None, _) => false,
        };
        if !same {
            changed.push(key.clone());
        }
    }

    changed
}

/// Compute Diff for multiple resources and generate a Plan
pub fn create_plan(
    desired: &[Resource],
    current_states: &HashMap<ResourceId, State>,
    schemas: &HashMap<String, ResourceSchema>,
) -> Plan {
    let mut plan = Plan::new();

    for resource in desired {
        let current = current_states
            .get(&resource.id)
            .cloned()
            .unwrap_or_else(|| State::not_found(resource.id.clone()));

        let d = diff(resource, &current, schemas.get(&resource.id.resource_type));

        match d {
            Diff::Create(r) => plan.add(Effect::Create(r)),
            Diff::Update { id, from, to, .. } => {
                let identifier = from.identifier.clone().unwrap_or_default();
                plan.add(Effect::Update {
                    id,
                    identifier,
                    from,
                    to,
                });
            }
            Diff::Replace { id, from, to, .. } => {
                let identifier = from.identifier.clone().unwrap_or_default();
                plan.add(Effect::Replace {
                    id,
                    identifier,
                    from,
                    to,
                });
            }
            Diff::NoChange(_) => {}
        }
    }

    plan
}

/// Generate a Plan deleting every existing resource, in reverse declaration order
pub fn destroy_plan(desired: &[Resource], current_states: &HashMap<ResourceId, State>) -> Plan {
    let mut plan = Plan::new();

    for resource in desired.iter().rev() {
        if let Some(state) = current_states.get(&resource.id)
            && state.exists
            && let Some(identifier) = &state.identifier
        {
            plan.add(Effect::Delete {
                resource: resource.clone(),
                identifier: identifier.clone(),
            });
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeSchema, AttributeType, types};

    fn zone_schema() -> ResourceSchema {
        ResourceSchema::new("system_zone")
            .attribute(AttributeSchema::new("name", AttributeType::String).required().force_new())
            .attribute(AttributeSchema::new("interface", AttributeType::StringSet))
            .attribute(AttributeSchema::new("description", AttributeType::String))
            .attribute(AttributeSchema::new("device_name", AttributeType::String).parameter())
    }

    #[test]
    fn diff_create_when_not_exists() {
        let desired = Resource::new("system_zone", "dmz");
        let current = State::not_found(ResourceId::new("system_zone", "dmz"));

        let result = diff(&desired, &current, None);
        assert!(matches!(result, Diff::Create(_)));
    }

    #[test]
    fn diff_no_change_when_same() {
        let desired = Resource::new("system_zone", "dmz")
            .with_attribute("interface", Value::string_list(["port1", "port2"]));

        let mut attrs = BTreeMap::new();
        attrs.insert(
            "interface".to_string(),
            Value::string_list(["port2", "port1"]),
        );
        let current = State::existing(ResourceId::new("system_zone", "dmz"), attrs);

        let result = diff(&desired, &current, Some(&zone_schema()));
        assert!(matches!(result, Diff::NoChange(_)));
    }

    #[test]
    fn diff_update_when_different() {
        let desired = Resource::new("system_zone", "dmz")
            .with_attribute("description", Value::string("public"));

        let mut attrs = BTreeMap::new();
        attrs.insert("description".to_string(), Value::string("internal"));
        let current = State::existing(ResourceId::new("system_zone", "dmz"), attrs);

        match diff(&desired, &current, Some(&zone_schema())) {
            Diff::Update {
                changed_attributes, ..
            } => {
                assert_eq!(changed_attributes, vec!["description".to_string()]);
            }
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn diff_replace_on_force_new_change() {
        let desired =
            Resource::new("system_zone", "dmz").with_attribute("name", Value::string("dmz2"));

        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::string("dmz"));
        let current = State::existing(ResourceId::new("system_zone", "dmz"), attrs);

        assert!(matches!(
            diff(&desired, &current, Some(&zone_schema())),
            Diff::Replace { .. }
        ));
    }

    #[test]
    fn diff_ignores_parameters() {
        let desired = Resource::new("system_zone", "dmz")
            .with_attribute("device_name", Value::string("fgt-01"));
        let current = State::existing(ResourceId::new("system_zone", "dmz"), BTreeMap::new());

        assert!(matches!(
            diff(&desired, &current, Some(&zone_schema())),
            Diff::NoChange(_)
        ));
    }

    #[test]
    fn diff_mac_case_insensitive() {
        let schema = ResourceSchema::new("firewall_ipmacbinding_table").attribute(
            AttributeSchema::new("mac", types::mac_address()).case_insensitive(),
        );
        let desired = Resource::new("firewall_ipmacbinding_table", "host")
            .with_attribute("mac", Value::string("00:0C:29:AA:BB:CC"));
        let mut attrs = BTreeMap::new();
        attrs.insert("mac".to_string(), Value::string("00:0c:29:aa:bb:cc"));
        let current = State::existing(desired.id.clone(), attrs);

        assert!(!diff(&desired, &current, Some(&schema)).is_change());
    }

    #[test]
    fn create_plan_from_resources() {
        let resources = vec![
            Resource::new("system_zone", "new"),
            Resource::new("system_zone", "existing")
                .with_attribute("description", Value::string("after")),
        ];

        let mut current_states = HashMap::new();
        let mut attrs = BTreeMap::new();
        attrs.insert("description".to_string(), Value::string("before"));
        current_states.insert(
            ResourceId::new("system_zone", "existing"),
            State::existing(ResourceId::new("system_zone", "existing"), attrs)
                .with_identifier("existing"),
        );

        let mut schemas = HashMap::new();
        schemas.insert("system_zone".to_string(), zone_schema());

        let plan = create_plan(&resources, &current_states, &schemas);

        assert_eq!(plan.effects().len(), 2);
        assert!(matches!(plan.effects()[0], Effect::Create(_)));
        match &plan.effects()[1] {
            Effect::Update { identifier, .. } => assert_eq!(identifier, "existing"),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn destroy_plan_reverses_order_and_skips_missing() {
        let resources = vec![
            Resource::new("system_zone", "a"),
            Resource::new("system_zone", "b"),
            Resource::new("system_zone", "gone"),
        ];
        let mut current_states = HashMap::new();
        for name in ["a", "b"] {
            let id = ResourceId::new("system_zone", name);
            current_states.insert(
                id.clone(),
                State::existing(id, BTreeMap::new()).with_identifier(name),
            );
        }

        let plan = destroy_plan(&resources, &current_states);
        let names: Vec<_> = plan
            .effects()
            .iter()
            .map(|e| e.resource_id().name.clone())
            .collect();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }
}
