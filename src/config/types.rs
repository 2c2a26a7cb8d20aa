//! Value model for the configuration tree.
//!
//! Every node in the tree is a [`Value`]. Nested levels are [`ConfigNode`]
//! mappings, which keep insertion order so that enumeration and saved
//! documents follow the order keys were written in.

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use std::fmt;

/// A mapping level in the configuration tree.
pub type ConfigNode = IndexMap<String, Value>;

/// A single value stored in the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    List(Vec<Value>),
    Map(ConfigNode),
}

/// The runtime kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Long,
    Double,
    String,
    List,
    Map,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigNode> {
        match self {
            Value::Map(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ConfigNode> {
        match self {
            Value::Map(node) => Some(node),
            _ => None,
        }
    }

    /// Encode this value as a JSON value tree.
    ///
    /// Non-finite doubles have no JSON representation and encode as `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Long(l) => JsonValue::from(*l),
            Value::Double(d) => Number::from_f64(*d).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(node) => JsonValue::Object(node_to_json(node)),
        }
    }
}

/// Encode a mapping level as a JSON object, keeping key order.
pub fn node_to_json(node: &ConfigNode) -> JsonMap<String, JsonValue> {
    node.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
}

/// Integers that fit in 32 bits become `Int`, other integers `Long`.
fn number_to_value(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => Value::Int(small),
            Err(_) => Value::Long(i),
        };
    }
    n.as_f64().map_or(Value::Null, Value::Double)
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i16> for Value {
    fn from(i: i16) -> Self {
        Value::Int(i32::from(i))
    }
}

impl From<u8> for Value {
    fn from(i: u8) -> Self {
        Value::Int(i32::from(i))
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<u32> for Value {
    fn from(l: u32) -> Self {
        Value::Long(i64::from(l))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::Double(f64::from(d))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        Value::Map(node)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_split_by_width() {
        assert_eq!(Value::from(json!(1)), Value::Int(1));
        assert_eq!(Value::from(json!(-2147483648i64)), Value::Int(i32::MIN));
        assert_eq!(Value::from(json!(4294967296i64)), Value::Long(4294967296));
        assert_eq!(Value::from(json!(1.5)), Value::Double(1.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Double(u64::MAX as f64));
    }

    #[test]
    fn test_object_keeps_document_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let node = value.as_map().unwrap();
        let keys: Vec<&str> = node.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_to_json_nested() {
        let value = Value::from(json!({"a": {"b": [1, "x", null, true]}}));
        assert_eq!(value.to_json(), json!({"a": {"b": [1, "x", null, true]}}));
    }

    #[test]
    fn test_non_finite_double_encodes_null() {
        assert_eq!(Value::Double(f64::NAN).to_json(), JsonValue::Null);
        assert_eq!(Value::Double(f64::INFINITY).to_json(), JsonValue::Null);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Long(3).kind(), ValueKind::Long);
        assert_eq!(Value::from(vec![1, 2]).kind().to_string(), "list");
        assert_eq!(Value::from(None::<i32>).kind(), ValueKind::Null);
        assert_eq!(Value::from(Some("s")), Value::String("s".into()));
    }
}
