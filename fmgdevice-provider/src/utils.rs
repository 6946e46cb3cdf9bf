//! Stateless helpers shared by every resource adapter

use std::cmp::Ordering;

use serde_json::Value as Json;

/// How a read populates state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Refresh of a managed resource; only configured tables are written
    Refresh,
    /// Import of an unmanaged object; everything is written
    Import,
}

/// Tables are only written into state when importing, or when the
/// configuration already manages them.
pub fn is_import_table(mode: ReadMode) -> bool {
    mode == ReadMode::Import
}

/// Strict list-of-strings decoding of an API value
pub fn flatten_string_list(value: &Json) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Strict list-of-integers decoding of an API value
pub fn flatten_integer_list(value: &Json) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(Json::as_i64).collect()
}

pub fn expand_string_list(items: &[String]) -> Json {
    Json::Array(items.iter().cloned().map(Json::String).collect())
}

pub fn expand_integer_list(items: &[i64]) -> Json {
    Json::Array(items.iter().copied().map(Json::from).collect())
}

/// Render a scalar API value as a string ("port1", 5 -> "5")
pub fn scalar_to_string(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(true) => Some("enable".to_string()),
        Json::Bool(false) => Some("disable".to_string()),
        _ => None,
    }
}

/// Parse a scalar API value as an integer (5, "5")
pub fn scalar_to_int(value: &Json) -> Option<i64> {
    match value {
        Json::Number(n) => n.as_i64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Compare strings so that embedded numbers sort by value ("port2" < "port10")
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_number(&mut a);
                let nb = take_number(&mut b);
                // Compare by magnitude first, then lexically to break ties like "01"/"1"
                let ord = na
                    .trim_start_matches('0')
                    .len()
                    .cmp(&nb.trim_start_matches('0').len())
                    .then_with(|| na.trim_start_matches('0').cmp(nb.trim_start_matches('0')))
                    .then_with(|| na.len().cmp(&nb.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}
