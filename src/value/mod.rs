/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::Display;

use serde::Serialize;

/// Child values of a structural element, keyed by element name.
pub type Map = BTreeMap<String, Value>;

/// A node of the dynamically typed tree built from an XML document.
///
/// There is no null variant. Elements without text, children or attributes are
/// simply left out of their parent's [Map].
///
/// All accessors are fallible and return `None` when the node has a different
/// shape, so feed-like documents can be probed without knowing their schema:
/// ```
/// let tree = xmlmap::parse_str("<feed><title>Example</title></feed>").unwrap();
/// assert_eq!(tree.lookup(&["feed", "title"]).and_then(|v| v.as_str()), Some("Example"));
/// assert!(tree.lookup(&["feed", "entry"]).is_none());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Concatenated character data of a text-bearing element.
    Text(String),
    /// Children and attribute maps of a structural element.
    Map(Map),
    /// Values collected under a repeated name.
    Sequence(Vec<Value>),
}

impl Value {
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the value stored under `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?.get(key)
    }

    /// Follows a chain of map keys from this node.
    ///
    /// An empty path returns the node itself.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Views the node as a list of occurrences.
    ///
    /// A name seen once holds a bare value while a repeated name holds a
    /// sequence. This hides the difference for callers which iterate over
    /// occurrences.
    pub fn one_or_many(&self) -> &[Value] {
        match self {
            Value::Sequence(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Splits a document tree into its root element name and value.
    ///
    /// Returns `None` unless this is a map with exactly one entry.
    pub fn into_root(self) -> Option<(String, Value)> {
        match self {
            Value::Map(map) if map.len() == 1 => map.into_iter().next(),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

/// Formats the tree as pretty-printed JSON.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

/// Stores `value` under `key`, promoting the entry to a sequence on repetition.
///
/// The first value is stored bare. The second one turns the entry into a two
/// element sequence, and later ones are appended to it.
pub fn insert_repeated(map: &mut Map, key: String, value: Value) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Sequence(items) => items.push(value),
            existing => {
                let first = std::mem::replace(existing, Value::Sequence(Vec::new()));
                if let Value::Sequence(items) = existing {
                    items.extend([first, value]);
                }
            }
        },
    }
}
