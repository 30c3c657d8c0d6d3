//! Spell body entries.
//!
//! A 5eTools body is a tree of strings and tagged blocks. [`Entry`] is the
//! closed set of shapes the formatter understands; everything else is dropped.

use serde_json::{Map, Value};

/// One element of an `entries` array, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// A plain paragraph.
    Text(&'a str),
    /// `{"type": "entries", "entries": [...]}`, a nested body.
    Nested(&'a [Value]),
    /// `{"type": "list", "items": [...]}`, named sub-items.
    List(&'a [Value]),
    /// Any other block. Its own `entries`, if it has any, are still walked.
    Other(&'a [Value]),
}

impl<'a> Entry<'a> {
    /// Classify a raw JSON value. Values that are neither strings nor objects
    /// have no text and yield `None`.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text)),
            Value::Object(map) => Some(match map.get("type").and_then(Value::as_str) {
                Some("entries") => Self::Nested(children(map, "entries")),
                Some("list") => Self::List(children(map, "items")),
                _ => Self::Other(children(map, "entries")),
            }),
            _ => None,
        }
    }
}

/// The array stored under `key`, or an empty slice.
pub(crate) fn children<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key).and_then(Value::as_array).map_or(&[][..], Vec::as_slice)
}

/// Flatten an `entries` array depth-first into ordered text fragments.
///
/// Markup is left in place; callers strip each fragment.
pub fn flatten_entries(items: &[Value]) -> Vec<String> {
    let mut parts = Vec::new();
    flatten_into(items, &mut parts);
    parts
}

fn flatten_into(items: &[Value], parts: &mut Vec<String>) {
    for entry in items.iter().filter_map(Entry::classify) {
        match entry {
            Entry::Text(text) => parts.push(text.to_string()),
            Entry::Nested(body) | Entry::Other(body) => flatten_into(body, parts),
            Entry::List(items) => {
                for item in items {
                    flatten_list_item(item, parts);
                }
            }
        }
    }
}

/// A list item renders as `## name` over its body. Anything not shaped like
/// `{"type": "item", ...}` is flattened like a top-level entry.
fn flatten_list_item(item: &Value, parts: &mut Vec<String>) {
    let Some(map) = item
        .as_object()
        .filter(|map| map.get("type").and_then(Value::as_str) == Some("item"))
    else {
        flatten_into(std::slice::from_ref(item), parts);
        return;
    };

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());
    let body = flatten_entries(children(map, "entries")).join("\n");

    match (name, body.is_empty()) {
        (Some(name), false) => parts.push(format!("## {name}\n\n{body}")),
        (Some(name), true) => parts.push(name.to_string()),
        (None, false) => parts.push(body),
        (None, true) => {}
    }
}
