//! Schema - Define type schemas for resources
//!
//! Every FortiManager object type is described by a table of attribute
//! descriptors. The provider drives expand/flatten from the same table, and
//! the CLI validates configuration documents against it.

use std::collections::BTreeMap;
use std::fmt;

use heck::ToKebabCase;

use crate::resource::{Record, Value};

/// Attribute type
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// String
    String,
    /// Integer
    Int,
    /// Ordered list of strings
    StringList,
    /// Unordered list of strings (compared as a set)
    StringSet,
    /// Ordered list of integers
    IntList,
    /// Enum (list of allowed values)
    Enum(Vec<String>),
    /// Custom type (with validation function)
    Custom {
        name: String,
        base: Box<AttributeType>,
        validate: fn(&Value) -> Result<(), String>,
        /// Rewrites equivalent spellings to one form before comparison
        canonical: Option<fn(&Value) -> Value>,
    },
    /// Nested table; each row is described by the sub-attributes
    Table(Vec<AttributeSchema>),
}

impl AttributeType {
    pub fn enumeration(variants: &[&str]) -> Self {
        AttributeType::Enum(variants.iter().map(|v| v.to_string()).collect())
    }

    /// Enable/disable switch, the most common FortiOS option type
    pub fn toggle() -> Self {
        Self::enumeration(&["disable", "enable"])
    }

    /// Check if a value conforms to this type
    pub fn validate(&self, value: &Value) -> Result<(), TypeError> {
        match (self, value) {
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::Int, Value::Int(_)) => Ok(()),
            (AttributeType::StringList | AttributeType::StringSet, Value::StringList(_)) => Ok(()),
            (AttributeType::IntList, Value::IntList(_)) => Ok(()),

            (AttributeType::Enum(variants), Value::String(s)) => {
                if variants.iter().any(|v| v == s) {
                    Ok(())
                } else {
                    Err(TypeError::InvalidEnumVariant {
                        value: s.clone(),
                        expected: variants.clone(),
                    })
                }
            }

            (AttributeType::Custom { base, validate, .. }, v) => {
                base.validate(v)?;
                validate(v).map_err(|msg| TypeError::ValidationFailed { message: msg })
            }

            (AttributeType::Table(columns), Value::Table(rows)) => {
                for (index, row) in rows.iter().enumerate() {
                    validate_record(columns, row).map_err(|e| TypeError::TableRowError {
                        index,
                        inner: Box::new(e),
                    })?;
                }
                Ok(())
            }

            _ => Err(TypeError::TypeMismatch {
                expected: self.type_name(),
                got: value.type_name(),
            }),
        }
    }

    /// Reinterpret an ambiguous document value as this type's value.
    ///
    /// Untyped documents cannot tell `[]` apart, so every empty list arrives
    /// as `StringList`; booleans arrive as "enable"/"disable".
    pub fn conform(&self, value: Value) -> Value {
        match (self.base(), value) {
            (AttributeType::IntList, Value::StringList(items)) if items.is_empty() => {
                Value::IntList(Vec::new())
            }
            (AttributeType::Table(_), Value::StringList(items)) if items.is_empty() => {
                Value::Table(Vec::new())
            }
            // JSON booleans arrive as enable/disable; some options spell them true/false
            (AttributeType::Enum(variants), Value::String(s))
                if !variants.contains(&s) && matches!(s.as_str(), "enable" | "disable") =>
            {
                let spelled = if s == "enable" { "true" } else { "false" };
                if variants.iter().any(|v| v == spelled) {
                    Value::string(spelled)
                } else {
                    Value::String(s)
                }
            }
            (AttributeType::Table(columns), Value::Table(rows)) => Value::Table(
                rows.into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|(k, v)| {
                                let v = match columns.iter().find(|c| c.name == k) {
                                    Some(column) => column.attr_type.conform(v),
                                    None => v,
                                };
                                (k, v)
                            })
                            .collect()
                    })
                    .collect(),
            ),
            (_, v) => v,
        }
    }

    /// Underlying structural type (Custom types resolve to their base)
    pub fn base(&self) -> &AttributeType {
        match self {
            AttributeType::Custom { base, .. } => base.base(),
            other => other,
        }
    }

    fn type_name(&self) -> String {
        match self {
            AttributeType::String => "String".to_string(),
            AttributeType::Int => "Int".to_string(),
            AttributeType::StringList => "StringList".to_string(),
            AttributeType::StringSet => "StringSet".to_string(),
            AttributeType::IntList => "IntList".to_string(),
            AttributeType::Enum(variants) => format!("Enum({})", variants.join(" | ")),
            AttributeType::Custom { name, .. } => name.clone(),
            AttributeType::Table(columns) => format!(
                "Table<{}>",
                columns
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

fn validate_record(columns: &[AttributeSchema], row: &Record) -> Result<(), TypeError> {
    for column in columns {
        if column.required && !row.contains_key(&column.name) {
            return Err(TypeError::MissingRequired {
                name: column.name.clone(),
            });
        }
    }
    for (name, value) in row {
        let column = columns
            .iter()
            .find(|c| &c.name == name)
            .ok_or_else(|| TypeError::UnknownAttribute { name: name.clone() })?;
        column.attr_type.validate(value)?;
    }
    Ok(())
}

/// Type error
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid enum variant '{value}', expected one of: {}", expected.join(", "))]
    InvalidEnumVariant {
        value: String,
        expected: Vec<String>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Required attribute '{name}' is missing")]
    MissingRequired { name: String },

    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("Computed attribute '{name}' cannot be set")]
    ComputedOnly { name: String },

    #[error("Table row {index}: {inner}")]
    TableRowError { index: usize, inner: Box<TypeError> },
}

/// Attribute schema
#[derive(Debug, Clone)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    /// Value is assigned by FortiManager and never sent
    pub computed: bool,
    /// Changing the value requires replacing the object
    pub force_new: bool,
    /// Compare values ignoring ASCII case (MAC addresses)
    pub case_insensitive: bool,
    /// Addressing parameter (device, vdom, parent key); never part of the body
    pub parameter: bool,
    pub description: Option<String>,
    /// API field name (e.g., "seq-num")
    pub provider_name: String,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        let name = name.into();
        let provider_name = name.to_kebab_case();
        Self {
            name,
            attr_type,
            required: false,
            computed: false,
            force_new: false,
            case_insensitive: false,
            parameter: false,
            description: None,
            provider_name,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn parameter(mut self) -> Self {
        self.parameter = true;
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Whether the attribute belongs in a request body
    pub fn is_sent(&self) -> bool {
        !self.parameter && !self.computed
    }

    /// Semantic equality under this attribute's comparison rules
    pub fn values_equal(&self, a: &Value, b: &Value) -> bool {
        if let AttributeType::Custom {
            canonical: Some(canonical),
            ..
        } = &self.attr_type
        {
            return canonical(a) == canonical(b);
        }

        match (self.attr_type.base(), a, b) {
            (AttributeType::StringSet, Value::StringList(x), Value::StringList(y)) => {
                let mut x = x.clone();
                let mut y = y.clone();
                x.sort();
                y.sort();
                x == y
            }
            (AttributeType::Table(columns), Value::Table(x), Value::Table(y)) => {
                x.len() == y.len()
                    && x.iter().zip(y).all(|(rx, ry)| {
                        rx.iter().all(|(k, vx)| match ry.get(k) {
                            Some(vy) => columns
                                .iter()
                                .find(|c| &c.name == k)
                                .map(|c| c.values_equal(vx, vy))
                                .unwrap_or(vx == vy),
                            None => columns.iter().any(|c| &c.name == k && c.computed),
                        })
                    })
            }
            (_, Value::String(x), Value::String(y)) if self.case_insensitive => {
                case_insensitive(x, y)
            }
            _ => a == b,
        }
    }
}

/// Resource schema
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub resource_type: String,
    pub attributes: BTreeMap<String, AttributeSchema>,
    pub description: Option<String>,
}

impl ResourceSchema {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            attributes: BTreeMap::new(),
            description: None,
        }
    }

    pub fn attribute(mut self, schema: AttributeSchema) -> Self {
        self.attributes.insert(schema.name.clone(), schema);
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    /// Conform ambiguous values in a set of attributes to their declared types
    pub fn conform(&self, attributes: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
        attributes
            .into_iter()
            .map(|(name, value)| match self.attributes.get(&name) {
                Some(schema) => {
                    let value = schema.attr_type.conform(value);
                    (name, value)
                }
                None => (name, value),
            })
            .collect()
    }

    /// Validate resource attributes
    pub fn validate(&self, attributes: &BTreeMap<String, Value>) -> Result<(), Vec<TypeError>> {
        let mut errors = Vec::new();

        for (name, schema) in &self.attributes {
            if schema.required && !attributes.contains_key(name) {
                errors.push(TypeError::MissingRequired { name: name.clone() });
            }
        }

        for (name, value) in attributes {
            match self.attributes.get(name) {
                Some(schema) if schema.computed => {
                    errors.push(TypeError::ComputedOnly { name: name.clone() });
                }
                Some(schema) => {
                    if let Err(e) = schema.attr_type.validate(value) {
                        errors.push(e);
                    }
                }
                None => errors.push(TypeError::UnknownAttribute { name: name.clone() }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Helper functions for common types
pub mod types {
    use std::sync::LazyLock;

    use regex::Regex;

    use super::*;

    static MAC_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2}){5}$").expect("valid MAC regex")
    });

    /// Port number (1-65535)
    pub fn port() -> AttributeType {
        AttributeType::Custom {
            name: "Port".to_string(),
            base: Box::new(AttributeType::Int),
            validate: |value| match value {
                Value::Int(n) if (1..=65535).contains(n) => Ok(()),
                Value::Int(n) => Err(format!("Port {} out of range 1-65535", n)),
                _ => Err("Expected integer".to_string()),
            },
            canonical: None,
        }
    }

    /// MAC address (e.g., "00:0c:29:aa:bb:cc"), compared case-insensitively
    pub fn mac_address() -> AttributeType {
        AttributeType::Custom {
            name: "MacAddress".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    if MAC_ADDRESS.is_match(s) {
                        Ok(())
                    } else {
                        Err(format!("Invalid MAC address '{}'", s))
                    }
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: None,
        }
    }

    /// IPv4 address
    pub fn ipv4_address() -> AttributeType {
        AttributeType::Custom {
            name: "Ipv4Address".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_ipv4(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: None,
        }
    }

    /// IPv4 network, either "10.0.0.0/24" or FortiOS "10.0.0.0 255.255.255.0".
    /// Both spellings compare equal.
    pub fn ipv4_network() -> AttributeType {
        AttributeType::Custom {
            name: "Ipv4Network".to_string(),
            base: Box::new(AttributeType::String),
            validate: |value| {
                if let Value::String(s) = value {
                    validate_ipv4_network(s)
                } else {
                    Err("Expected string".to_string())
                }
            },
            canonical: Some(|value| match value {
                Value::String(s) => canonical_ipv4_network(s)
                    .map(Value::String)
                    .unwrap_or_else(|| value.clone()),
                other => other.clone(),
            }),
        }
    }
}

/// MAC addresses and similar come back from FortiManager in either case
pub fn case_insensitive(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Validate dotted-quad IPv4 address
pub fn validate_ipv4(ip: &str) -> Result<(), String> {
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(format!("Invalid IP address '{}': expected 4 octets", ip));
    }

    for octet in &octets {
        if octet.parse::<u8>().is_err() {
            return Err(format!(
                "Invalid octet '{}' in IP address: must be 0-255",
                octet
            ));
        }
    }
    Ok(())
}

/// Validate an IPv4 network in "IP/prefix" or "IP netmask" form
pub fn validate_ipv4_network(network: &str) -> Result<(), String> {
    if let Some((ip, prefix)) = network.split_once('/') {
        validate_ipv4(ip)?;
        return match prefix.parse::<u8>() {
            Ok(p) if p <= 32 => Ok(()),
            Ok(p) => Err(format!("Invalid prefix length '{}': must be 0-32", p)),
            Err(_) => Err(format!(
                "Invalid prefix length '{}': must be a number",
                prefix
            )),
        };
    }

    match network.split_whitespace().collect::<Vec<_>>().as_slice() {
        [ip, mask] => {
            validate_ipv4(ip)?;
            validate_ipv4(mask)?;
            let bits = netmask_bits(mask);
            if bits.leading_ones() + bits.trailing_zeros() == 32 {
                Ok(())
            } else {
                Err(format!("Invalid netmask '{}': not contiguous", mask))
            }
        }
        _ => Err(format!(
            "Invalid network '{}': expected IP/prefix or IP netmask",
            network
        )),
    }
}

fn netmask_bits(mask: &str) -> u32 {
    mask.split('.')
        .filter_map(|o| o.parse::<u8>().ok())
        .fold(0u32, |acc, o| (acc << 8) | u32::from(o))
}

/// Rewrite a valid IPv4 network as "IP/prefix"; None if it is not one
pub fn canonical_ipv4_network(network: &str) -> Option<String> {
    validate_ipv4_network(network).ok()?;
    if network.contains('/') {
        return Some(network.trim().to_string());
    }
    let mut parts = network.split_whitespace();
    let ip = parts.next()?;
    let prefix = netmask_bits(parts.next()?).leading_ones();
    Some(format!("{}/{}", ip, prefix))
}
