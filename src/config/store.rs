//! The configuration store: a tree of nested mappings addressed by dotted paths.
//!
//! Reads never fail. A path that is missing, or that runs through a value
//! which is not a mapping, resolves to "not found" and the caller's default
//! is used instead. Writes create intermediate mappings on demand and replace
//! any non-mapping value standing in the way.

use super::path::{self, KeyPath};
use super::types::{ConfigNode, Value};
use crate::error::{ConfigError, ConfigResult};
use indexmap::IndexSet;

/// A hierarchical configuration tree with identity metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    root: ConfigNode,
    name: String,
    current_path: String,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new(name: impl Into<String>, current_path: impl Into<String>) -> Self {
        Self::with_root(name, current_path, ConfigNode::new())
    }

    /// Create a store that takes ownership of an existing tree.
    pub fn with_root(
        name: impl Into<String>,
        current_path: impl Into<String>,
        root: ConfigNode,
    ) -> Self {
        Self {
            root,
            name: name.into(),
            current_path: current_path.into(),
        }
    }

    /// Display label, usually the source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the store was loaded from, usually a file path.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The root store. A store is always its own root.
    pub fn root(&self) -> &Self {
        self
    }

    /// The root mapping.
    pub fn node(&self) -> &ConfigNode {
        &self.root
    }

    /// Consume the store and return its root mapping.
    pub fn into_node(self) -> ConfigNode {
        self.root
    }

    /// Resolve a dotted path to the stored value.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let key_path = KeyPath::parse(path)?;
        let mut current = &self.root;
        for segment in key_path.parents() {
            current = current.get(*segment)?.as_map()?;
        }
        current.get(key_path.leaf())
    }

    /// Resolve a dotted path, falling back to `default` when nothing is stored.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.get(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Store a value at a dotted path.
    ///
    /// Intermediate segments that are missing, or that hold anything other
    /// than a mapping, are replaced with empty mappings. The final key is
    /// inserted or overwritten.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error for blank paths and paths with empty
    /// segments. The tree is not modified in that case.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let key_path = KeyPath::parse(path).ok_or_else(|| ConfigError::invalid_path(path))?;

        let mut current = &mut self.root;
        for segment in key_path.parents() {
            current = child_mapping(current, segment);
        }
        current.insert(key_path.leaf().to_string(), value.into());
        Ok(())
    }

    /// Detach and return the value at a dotted path.
    ///
    /// Follows the same traversal as [`get`](Self::get) and never creates
    /// intermediate mappings.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let key_path = KeyPath::parse(path)?;
        let mut current = &mut self.root;
        for segment in key_path.parents() {
            current = current.get_mut(*segment)?.as_map_mut()?;
        }
        current.shift_remove(key_path.leaf())
    }

    /// True if a value, including an explicit null, is stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// True if a non-null value is stored at `path`.
    pub fn is_set(&self, path: &str) -> bool {
        self.get(path).is_some_and(|value| !value.is_null())
    }

    /// Enumerate keys.
    ///
    /// With `deep` unset only the root mapping's keys are returned. With
    /// `deep` set, nested mappings are walked depth-first and every key is
    /// reported as a full dotted path, each mapping before its children.
    ///
    /// A literal key containing the separator can flatten to the same path
    /// as a nested one. Only the first occurrence is reported.
    pub fn keys(&self, deep: bool) -> Vec<String> {
        let mut keys = IndexSet::new();
        walk(&self.root, None, deep, &mut |key, _| {
            keys.insert(key);
        });
        keys.into_iter().collect()
    }

    /// Enumerate entries, keyed the same way as [`keys`](Self::keys).
    pub fn values(&self, deep: bool) -> ConfigNode {
        let mut values = ConfigNode::new();
        walk(&self.root, None, deep, &mut |key, value| {
            values.entry(key).or_insert_with(|| value.clone());
        });
        values
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Descend into `key`, replacing whatever is there with a mapping unless it
/// already is one.
fn child_mapping<'n>(node: &'n mut ConfigNode, key: &str) -> &'n mut ConfigNode {
    ensure_mapping(
        node.entry(key.to_string())
            .or_insert_with(|| Value::Map(ConfigNode::new())),
    )
}

fn ensure_mapping(slot: &mut Value) -> &mut ConfigNode {
    match slot {
        Value::Map(child) => child,
        other => {
            *other = Value::Map(ConfigNode::new());
            ensure_mapping(other)
        }
    }
}

fn walk<'n>(
    node: &'n ConfigNode,
    prefix: Option<&str>,
    deep: bool,
    visit: &mut dyn FnMut(String, &'n Value),
) {
    for (key, value) in node {
        let full_key = path::join(prefix, key);
        if deep && let Value::Map(child) = value {
            visit(full_key.clone(), value);
            walk(child, Some(&full_key), deep, visit);
        } else {
            visit(full_key, value);
        }
    }
}
