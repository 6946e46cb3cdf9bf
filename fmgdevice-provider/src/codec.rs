//! Expand/flatten between resource attributes and FortiManager objects
//!
//! Expanding turns declarative attributes into the JSON body of a write.
//! Flattening decodes an object returned by a read back into attributes,
//! falling back to [`forti_api_patch`] when the API sends a value in a
//! shape other than the declared one.

use std::collections::BTreeMap;

use fmgdevice_client::Object;
use fmgdevice_core::resource::{Record, Value};
use fmgdevice_core::schema::{AttributeSchema, AttributeType, ResourceSchema};
use serde_json::Value as Json;

use crate::utils::{
    ReadMode, expand_integer_list, expand_string_list, flatten_integer_list, flatten_string_list,
    is_import_table, natural_cmp, scalar_to_int, scalar_to_string,
};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("expected {expected}, got {got}")]
    Mismatch { expected: String, got: String },

    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<CodecError>,
    },

    #[error("Error reading {attribute}: {source}")]
    Read {
        attribute: String,
        #[source]
        source: Box<CodecError>,
    },
}

/// Ordering applied to flattened table rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtableSort {
    /// Keep the order FortiManager returned
    #[default]
    None,
    /// Lexical order of each row's key
    Lexical,
    /// Number-aware order of each row's key
    Natural,
}

impl SubtableSort {
    /// Parse the `dynamic_sort_subtable` attribute ("false", "true", "natural")
    pub fn from_attribute(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("true") => SubtableSort::Lexical,
            Some("natural") => SubtableSort::Natural,
            _ => SubtableSort::None,
        }
    }
}

// =============================================================================
// Expand
// =============================================================================

/// Build the request body for a write from the configured attributes
///
/// Only configured attributes are sent; parameters and computed attributes
/// never are.
pub fn get_object(
    schema: &ResourceSchema,
    attributes: &BTreeMap<String, Value>,
) -> Result<Object, CodecError> {
    let mut obj = Object::new();

    for (name, value) in attributes {
        let attr = schema
            .get(name)
            .ok_or_else(|| CodecError::UnknownAttribute(name.clone()))?;
        if !attr.is_sent() {
            continue;
        }
        obj.insert(attr.provider_name.clone(), expand_value(attr, value)?);
    }

    Ok(obj)
}

/// Expand one attribute value into its JSON form
pub fn expand_value(attr: &AttributeSchema, value: &Value) -> Result<Json, CodecError> {
    Ok(match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Int(n) => Json::from(*n),
        Value::StringList(items) => expand_string_list(items),
        Value::IntList(items) => expand_integer_list(items),
        Value::Table(rows) => {
            let AttributeType::Table(columns) = attr.attr_type.base() else {
                return Err(CodecError::Mismatch {
                    expected: attr.attr_type.to_string(),
                    got: "Table".to_string(),
                });
            };
            let mut out = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                let expanded = expand_row(columns, row).map_err(|e| CodecError::Row {
                    index,
                    source: Box::new(e),
                })?;
                out.push(Json::Object(expanded));
            }
            Json::Array(out)
        }
    })
}

fn expand_row(columns: &[AttributeSchema], row: &Record) -> Result<Object, CodecError> {
    let mut obj = Object::new();
    for (name, value) in row {
        let column = columns
            .iter()
            .find(|c| &c.name == name)
            .ok_or_else(|| CodecError::UnknownAttribute(name.clone()))?;
        if !column.is_sent() {
            continue;
        }
        obj.insert(column.provider_name.clone(), expand_value(column, value)?);
    }
    Ok(obj)
}

// =============================================================================
// Flatten
// =============================================================================

/// Decode an object returned by FortiManager into attributes
///
/// `prior` holds the attributes the resource had before the read. Tables are
/// only written when `prior` has them or the read is an import.
pub fn refresh_object(
    schema: &ResourceSchema,
    obj: &Object,
    prior: &BTreeMap<String, Value>,
    mode: ReadMode,
) -> Result<BTreeMap<String, Value>, CodecError> {
    let sort = SubtableSort::from_attribute(prior.get("dynamic_sort_subtable"));
    let mut attributes = BTreeMap::new();

    for attr in schema.attributes.values() {
        if attr.parameter {
            continue;
        }
        if matches!(attr.attr_type.base(), AttributeType::Table(_))
            && !is_import_table(mode)
            && !prior.contains_key(&attr.name)
        {
            continue;
        }
        let Some(raw) = obj.get(&attr.provider_name) else {
            continue;
        };
        if raw.is_null() {
            continue;
        }

        let value = flatten_or_patch(attr, raw, sort).map_err(|e| CodecError::Read {
            attribute: attr.name.clone(),
            source: Box::new(e),
        })?;
        attributes.insert(attr.name.clone(), value);
    }

    Ok(attributes)
}

fn flatten_or_patch(
    attr: &AttributeSchema,
    raw: &Json,
    sort: SubtableSort,
) -> Result<Value, CodecError> {
    match flatten_value(attr, raw, sort) {
        Ok(v) => Ok(v),
        Err(e) => forti_api_patch(raw, attr.attr_type.base()).ok_or(e),
    }
}

/// Strictly decode an API value as the attribute's declared type
pub fn flatten_value(
    attr: &AttributeSchema,
    raw: &Json,
    sort: SubtableSort,
) -> Result<Value, CodecError> {
    let mismatch = || CodecError::Mismatch {
        expected: attr.attr_type.to_string(),
        got: json_kind(raw).to_string(),
    };

    match attr.attr_type.base() {
        AttributeType::String | AttributeType::Enum(_) => {
            raw.as_str().map(Value::string).ok_or_else(mismatch)
        }
        AttributeType::Int => raw.as_i64().map(Value::Int).ok_or_else(mismatch),
        AttributeType::StringList | AttributeType::StringSet => flatten_string_list(raw)
            .map(Value::StringList)
            .ok_or_else(mismatch),
        AttributeType::IntList => flatten_integer_list(raw)
            .map(Value::IntList)
            .ok_or_else(mismatch),
        AttributeType::Table(columns) => {
            let items = raw.as_array().ok_or_else(mismatch)?;
            let mut rows = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let obj = item.as_object().ok_or_else(mismatch)?;
                let row = flatten_row(columns, obj, sort).map_err(|e| CodecError::Row {
                    index,
                    source: Box::new(e),
                })?;
                rows.push(row);
            }
            sort_rows(columns, &mut rows, sort);
            Ok(Value::Table(rows))
        }
        // base() never returns Custom
        AttributeType::Custom { .. } => Err(mismatch()),
    }
}

/// Flatten the sub-fields present in one table row
fn flatten_row(
    columns: &[AttributeSchema],
    obj: &Object,
    sort: SubtableSort,
) -> Result<Record, CodecError> {
    let mut row = Record::new();
    for column in columns {
        if let Some(raw) = obj.get(&column.provider_name)
            && !raw.is_null()
        {
            let value = flatten_or_patch(column, raw, sort).map_err(|e| CodecError::Read {
                attribute: column.name.clone(),
                source: Box::new(e),
            })?;
            row.insert(column.name.clone(), value);
        }
    }
    Ok(row)
}

fn sort_rows(columns: &[AttributeSchema], rows: &mut [Record], sort: SubtableSort) {
    let Some(key) = columns.first().map(|c| c.name.as_str()) else {
        return;
    };
    let key_of = |row: &Record| {
        row.get(key)
            .and_then(Value::to_key_string)
            .unwrap_or_default()
    };
    match sort {
        SubtableSort::None => {}
        SubtableSort::Lexical => rows.sort_by_key(key_of),
        SubtableSort::Natural => rows.sort_by(|a, b| natural_cmp(&key_of(a), &key_of(b))),
    }
}

/// Compatibility fallback for values FortiManager returns in a different
/// shape than declared. Lists of scalars become space-joined strings, scalars
/// become single-member lists, and numbers and numeric strings convert freely.
pub fn forti_api_patch(raw: &Json, attr_type: &AttributeType) -> Option<Value> {
    match (attr_type, raw) {
        (_, Json::Null) => None,

        // Addresses come back as ["10.0.0.0", "255.255.255.0"]
        (AttributeType::String | AttributeType::Enum(_), Json::Array(items)) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .filter(|parts| !parts.is_empty())
            .map(|parts| Value::String(parts.join(" "))),
        (AttributeType::String | AttributeType::Enum(_), v) => {
            scalar_to_string(v).map(Value::String)
        }

        (AttributeType::Int, Json::Array(items)) if items.len() == 1 => {
            scalar_to_int(&items[0]).map(Value::Int)
        }
        (AttributeType::Int, v) => scalar_to_int(v).map(Value::Int),

        (AttributeType::StringList | AttributeType::StringSet, Json::Array(items)) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .map(Value::StringList),
        (AttributeType::StringList | AttributeType::StringSet, v) => {
            scalar_to_string(v).map(|s| Value::StringList(vec![s]))
        }

        (AttributeType::IntList, Json::Array(items)) => items
            .iter()
            .map(scalar_to_int)
            .collect::<Option<Vec<_>>>()
            .map(Value::IntList),
        (AttributeType::IntList, v) => scalar_to_int(v).map(|n| Value::IntList(vec![n])),

        (AttributeType::Table(columns), Json::Object(obj)) => {
            flatten_row(columns, obj, SubtableSort::None)
                .ok()
                .map(|row| Value::Table(vec![row]))
        }

        _ => None,
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmgdevice_core::schema::types;
    use serde_json::json;

    fn tagging() -> AttributeSchema {
        AttributeSchema::new(
            "tagging",
            AttributeType::Table(vec![
                AttributeSchema::new("name", AttributeType::String),
                AttributeSchema::new("category", AttributeType::StringSet),
                AttributeSchema::new("tags", AttributeType::StringSet),
            ]),
        )
    }

    fn schema() -> ResourceSchema {
        ResourceSchema::new("system_zone")
            .attribute(AttributeSchema::new("name", AttributeType::String))
            .attribute(AttributeSchema::new("seq_num", AttributeType::Int))
            .attribute(AttributeSchema::new("interface", AttributeType::StringSet))
            .attribute(AttributeSchema::new("vlans", AttributeType::IntList))
            .attribute(AttributeSchema::new("mac", types::mac_address()).case_insensitive())
            .attribute(AttributeSchema::new("uuid", AttributeType::String).computed())
            .attribute(AttributeSchema::new("device_name", AttributeType::String).parameter())
            .attribute(
                AttributeSchema::new("dynamic_sort_subtable", AttributeType::String).parameter(),
            )
            .attribute(tagging())
    }

    fn row(name: &str, category: &[&str], tags: &[&str]) -> Record {
        let mut r = Record::new();
        r.insert("name".to_string(), Value::string(name));
        r.insert("category".to_string(), Value::string_list(category.iter().copied()));
        r.insert("tags".to_string(), Value::string_list(tags.iter().copied()));
        r
    }

    fn round_trip(attributes: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
        let schema = schema();
        let obj = get_object(&schema, &attributes).unwrap();
        refresh_object(&schema, &obj, &attributes, ReadMode::Refresh).unwrap()
    }

    #[test]
    fn scalar_fields_round_trip() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::string("dmz"));
        attrs.insert("seq_num".to_string(), Value::Int(5));
        attrs.insert("interface".to_string(), Value::string_list(["port1", "port2"]));
        attrs.insert("vlans".to_string(), Value::IntList(vec![10, 20]));
        attrs.insert("mac".to_string(), Value::string("00:0c:29:aa:bb:cc"));

        assert_eq!(round_trip(attrs.clone()), attrs);
    }

    #[test]
    fn tables_round_trip_for_zero_one_and_many_rows() {
        for rows in [
            vec![],
            vec![row("env", &["prod"], &["critical"])],
            vec![
                row("zeta", &["a"], &["x"]),
                row("alpha", &["b", "c"], &[]),
                row("mid", &[], &["y", "z"]),
            ],
        ] {
            let mut attrs = BTreeMap::new();
            attrs.insert("tagging".to_string(), Value::Table(rows));
            assert_eq!(round_trip(attrs.clone()), attrs);
        }
    }

    #[test]
    fn body_uses_api_names_and_skips_parameters() {
        let mut attrs = BTreeMap::new();
        attrs.insert("seq_num".to_string(), Value::Int(5));
        attrs.insert("device_name".to_string(), Value::string("fgt-01"));
        attrs.insert(
            "tagging".to_string(),
            Value::Table(vec![row("env", &["prod"], &["critical"])]),
        );

        let obj = get_object(&schema(), &attrs).unwrap();
        assert_eq!(
            Json::Object(obj),
            json!({
                "seq-num": 5,
                "tagging": [{"name": "env", "category": ["prod"], "tags": ["critical"]}]
            })
        );
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let mut attrs = BTreeMap::new();
        attrs.insert("colour".to_string(), Value::string("red"));
        assert!(matches!(
            get_object(&schema(), &attrs),
            Err(CodecError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn unmanaged_tables_only_appear_on_import() {
        let obj = json!({"name": "dmz", "tagging": [{"name": "env"}]});
        let obj = obj.as_object().unwrap();

        let refreshed = refresh_object(&schema(), obj, &BTreeMap::new(), ReadMode::Refresh).unwrap();
        assert!(!refreshed.contains_key("tagging"));

        let imported = refresh_object(&schema(), obj, &BTreeMap::new(), ReadMode::Import).unwrap();
        assert!(imported.contains_key("tagging"));
    }

    #[test]
    fn patch_fallback_coerces_shapes() {
        let obj = json!({
            "name": ["dmz"],
            "seq-num": "7",
            "interface": "port1",
            "vlans": ["10", 20]
        });
        let attrs = refresh_object(
            &schema(),
            obj.as_object().unwrap(),
            &BTreeMap::new(),
            ReadMode::Import,
        )
        .unwrap();
        assert_eq!(attrs["name"], Value::string("dmz"));
        assert_eq!(attrs["seq_num"], Value::Int(7));
        assert_eq!(attrs["interface"], Value::string_list(["port1"]));
        assert_eq!(attrs["vlans"], Value::IntList(vec![10, 20]));
    }

    #[test]
    fn address_pair_is_joined() {
        let value = forti_api_patch(&json!(["10.0.0.0", "255.255.255.0"]), &AttributeType::String);
        assert_eq!(value, Some(Value::string("10.0.0.0 255.255.255.0")));
        assert_eq!(forti_api_patch(&json!([]), &AttributeType::String), None);
    }

    #[test]
    fn unpatchable_value_is_a_read_error() {
        let obj = json!({"seq-num": "not-a-number"});
        let err = refresh_object(
            &schema(),
            obj.as_object().unwrap(),
            &BTreeMap::new(),
            ReadMode::Import,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Error reading seq_num"));
    }

    #[test]
    fn dynamic_sort_subtable_orders_rows() {
        let obj = json!({"tagging": [{"name": "port10"}, {"name": "port2"}, {"name": "a"}]});
        let obj = obj.as_object().unwrap();

        let names = |attrs: &BTreeMap<String, Value>| match &attrs["tagging"] {
            Value::Table(rows) => rows
                .iter()
                .map(|r| r["name"].as_str().unwrap_or_default().to_string())
                .collect::<Vec<_>>(),
            other => panic!("Expected table, got {:?}", other),
        };

        let mut prior = BTreeMap::new();
        prior.insert("tagging".to_string(), Value::Table(vec![]));

        let attrs = refresh_object(&schema(), obj, &prior, ReadMode::Refresh).unwrap();
        assert_eq!(names(&attrs), vec!["port10", "port2", "a"]);

        prior.insert("dynamic_sort_subtable".to_string(), Value::string("true"));
        let attrs = refresh_object(&schema(), obj, &prior, ReadMode::Refresh).unwrap();
        assert_eq!(names(&attrs), vec!["a", "port10", "port2"]);

        prior.insert("dynamic_sort_subtable".to_string(), Value::string("natural"));
        let attrs = refresh_object(&schema(), obj, &prior, ReadMode::Refresh).unwrap();
        assert_eq!(names(&attrs), vec!["a", "port2", "port10"]);
    }

    #[test]
    fn patch_wraps_single_object_as_table() {
        let columns = vec![AttributeSchema::new("name", AttributeType::String)];
        let value = forti_api_patch(&json!({"name": "env"}), &AttributeType::Table(columns));
        match value {
            Some(Value::Table(rows)) => assert_eq!(rows[0]["name"], Value::string("env")),
            other => panic!("Expected table, got {:?}", other),
        }
    }
}
