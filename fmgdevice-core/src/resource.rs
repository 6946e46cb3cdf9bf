//! Resource - Representing resources and their state

use std::collections::BTreeMap;

/// Unique identifier for a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    /// Resource type (e.g., "system_zone", "firewall_ipmacbinding_table")
    pub resource_type: String,
    /// Resource name (label given in the configuration document)
    pub name: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource_type, self.name)
    }
}

/// One row of a table attribute, keyed by sub-attribute name
pub type Record = BTreeMap<String, Value>;

/// Attribute value of a resource
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    StringList(Vec<String>),
    IntList(Vec<i64>),
    /// Nested table (list of objects), e.g. zone tagging entries
    Table(Vec<Record>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn string_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::StringList(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true for empty strings and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::Int(_) => false,
            Value::StringList(items) => items.is_empty(),
            Value::IntList(items) => items.is_empty(),
            Value::Table(rows) => rows.is_empty(),
        }
    }

    /// String form used for resource identifiers ("dmz", "5")
    pub fn to_key_string(&self) -> Option<String> {
        match self {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> String {
        match self {
            Value::String(_) => "String".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::StringList(_) => "StringList".to_string(),
            Value::IntList(_) => "IntList".to_string(),
            Value::Table(_) => "Table".to_string(),
        }
    }

    /// Convert untyped JSON (as written in a configuration document) into a Value.
    ///
    /// Arrays are classified by their first element; an empty array becomes an
    /// empty `StringList` and is conformed to the declared type by the schema.
    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
            serde_json::Value::Bool(b) => Some(Value::String(
                if *b { "enable" } else { "disable" }.to_string(),
            )),
            serde_json::Value::Array(items) => match items.first() {
                None => Some(Value::StringList(Vec::new())),
                Some(serde_json::Value::Number(_)) => items
                    .iter()
                    .map(|v| v.as_i64())
                    .collect::<Option<Vec<_>>>()
                    .map(Value::IntList),
                Some(serde_json::Value::Object(_)) => items
                    .iter()
                    .map(|row| {
                        let obj = row.as_object()?;
                        obj.iter()
                            .map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
                            .collect::<Option<Record>>()
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(Value::Table),
                Some(_) => items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map(Value::StringList),
            },
            _ => None,
        }
    }

    /// Convert to JSON for display and request bodies
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::StringList(items) => serde_json::Value::from(items.clone()),
            Value::IntList(items) => serde_json::Value::from(items.clone()),
            Value::Table(rows) => serde_json::Value::Array(
                rows.iter()
                    .map(|row| {
                        serde_json::Value::Object(
                            row.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

/// Desired state declared in a configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    pub attributes: BTreeMap<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(resource_type, name),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// String attribute, treating a missing key as empty
    pub fn get_str(&self, key: &str) -> &str {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Current state fetched from FortiManager
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub id: ResourceId,
    /// Resource identifier (natural key such as "dmz" or "5"); None once cleared
    pub identifier: Option<String>,
    pub attributes: BTreeMap<String, Value>,
    /// Whether this state exists
    pub exists: bool,
}

impl State {
    pub fn not_found(id: ResourceId) -> Self {
        Self {
            id,
            identifier: None,
            attributes: BTreeMap::new(),
            exists: false,
        }
    }

    pub fn existing(id: ResourceId, attributes: BTreeMap<String, Value>) -> Self {
        Self {
            id,
            identifier: None,
            attributes,
            exists: true,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}
