//! Nested message trees and their dotted-key views.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A nested mapping from keys to string leaves or further trees, in file order.
pub type MessageTree = Map<String, Value>;

/// Dotted key to message text.
pub type FlatMessages = BTreeMap<String, String>;

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Flattens a tree into dotted keys.
///
/// Arrays are joined with `,` into a single leaf, which cannot be split back
/// if an element contains a comma. `null` values produce nothing; other
/// scalars are rendered as text.
pub fn flatten(tree: &MessageTree) -> FlatMessages {
    let mut flat = FlatMessages::new();
    flatten_into(tree, "", &mut flat);
    flat
}

fn flatten_into(tree: &MessageTree, prefix: &str, flat: &mut FlatMessages) {
    for (key, value) in tree {
        let path = join_path(prefix, key);
        match value {
            Value::Array(items) => {
                let joined = items.iter().map(leaf_text).collect::<Vec<_>>().join(",");
                flat.insert(path, joined);
            }
            Value::Object(child) => flatten_into(child, &path, flat),
            Value::Null => {}
            other => {
                flat.insert(path, leaf_text(other));
            }
        }
    }
}

/// Calls `visit(message, dotted_path)` for every string leaf, depth first.
pub fn traverse<F>(tree: &MessageTree, mut visit: F)
where
    F: FnMut(&str, &str),
{
    traverse_inner(tree, "", &mut visit);
}

fn traverse_inner<F>(tree: &MessageTree, prefix: &str, visit: &mut F)
where
    F: FnMut(&str, &str),
{
    for (key, value) in tree {
        let path = join_path(prefix, key);
        match value {
            Value::String(message) => visit(message, &path),
            Value::Object(child) => traverse_inner(child, &path, visit),
            _ => {}
        }
    }
}

/// Reads the string leaf at `path`.
pub fn get_path<'a>(tree: &'a MessageTree, path: &str) -> Option<&'a str> {
    let mut parts = path.split('.');
    let last = parts.next_back()?;
    let mut node = tree;
    for part in parts {
        node = node.get(part)?.as_object()?;
    }
    node.get(last)?.as_str()
}

/// Writes a string leaf at `path`, creating (or replacing non-object)
/// intermediate nodes.
pub fn set_path(tree: &mut MessageTree, path: &str, value: String) {
    let mut parts = path.split('.');
    let Some(last) = parts.next_back() else {
        return;
    };
    let mut node = tree;
    for part in parts {
        let entry = node
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(child) = entry else {
            return;
        };
        node = child;
    }
    node.insert(last.to_string(), Value::String(value));
}
