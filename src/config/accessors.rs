//! Typed accessors over the store.
//!
//! Three flavors exist per type:
//!
//! - `get_<type>_or(path, default)` returns the stored value only if it is
//!   exactly of the requested kind, otherwise `default`. No conversion is
//!   ever attempted.
//! - `get_<type>(path)` converts whatever is stored. Missing and null values
//!   convert to the zero value; values that cannot be converted are an error.
//!   `get_string` is the exception and only matches stored strings.
//! - `is_<type>(path)` reports an exact kind match.
//!
//! List accessors match exactly too: every element must be of the requested
//! kind, and a mismatch yields an empty list rather than a partial one.

use super::store::ConfigStore;
use super::types::{ConfigNode, Value, ValueKind};
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;

/// An element type that can be read out of a stored list.
pub trait ListItem: Sized {
    /// Extract the element if `value` is exactly this type.
    fn from_item(value: &Value) -> Option<Self>;
}

impl ListItem for String {
    fn from_item(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl ListItem for bool {
    fn from_item(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl ListItem for i32 {
    fn from_item(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl ListItem for i64 {
    fn from_item(value: &Value) -> Option<Self> {
        match value {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }
}

impl ListItem for f64 {
    fn from_item(value: &Value) -> Option<Self> {
        match value {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl ListItem for ConfigNode {
    fn from_item(value: &Value) -> Option<Self> {
        value.as_map().cloned()
    }
}

impl ConfigStore {
    // -----------------------------------------------------------------------
    // Strings
    // -----------------------------------------------------------------------

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(Value::as_str).map(str::to_string)
    }

    pub fn get_string_or(&self, path: &str, default: &str) -> String {
        self.get_string(path).unwrap_or_else(|| default.to_string())
    }

    pub fn is_string(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::String)
    }

    // -----------------------------------------------------------------------
    // Integers
    // -----------------------------------------------------------------------

    /// Read an `i32`, converting from any numeric, boolean or string value.
    pub fn get_int(&self, path: &str) -> ConfigResult<i32> {
        self.convert(path, "int", |value| {
            to_i64(value).and_then(|l| i32::try_from(l).ok())
        })
    }

    pub fn get_int_or(&self, path: &str, default: i32) -> i32 {
        match self.get(path) {
            Some(Value::Int(i)) => *i,
            _ => default,
        }
    }

    pub fn is_int(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::Int)
    }

    /// Read an `i64`, converting from any numeric, boolean or string value.
    pub fn get_long(&self, path: &str) -> ConfigResult<i64> {
        self.convert(path, "long", to_i64)
    }

    pub fn get_long_or(&self, path: &str, default: i64) -> i64 {
        match self.get(path) {
            Some(Value::Long(l)) => *l,
            _ => default,
        }
    }

    pub fn is_long(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::Long)
    }

    // -----------------------------------------------------------------------
    // Doubles
    // -----------------------------------------------------------------------

    /// Read an `f64`, converting from any numeric, boolean or string value.
    pub fn get_double(&self, path: &str) -> ConfigResult<f64> {
        self.convert(path, "double", to_f64)
    }

    pub fn get_double_or(&self, path: &str, default: f64) -> f64 {
        match self.get(path) {
            Some(Value::Double(d)) => *d,
            _ => default,
        }
    }

    pub fn is_double(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::Double)
    }

    // -----------------------------------------------------------------------
    // Booleans
    // -----------------------------------------------------------------------

    /// Read a `bool`. Numbers are true when non-zero; strings must spell
    /// `true` or `false` in any case.
    pub fn get_bool(&self, path: &str) -> ConfigResult<bool> {
        self.convert(path, "bool", to_bool)
    }

    pub fn get_bool_or(&self, path: &str, default: bool) -> bool {
        match self.get(path) {
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn is_bool(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::Bool)
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    /// Read a list whose elements are all exactly `T`, or an empty list.
    pub fn get_list<T: ListItem>(&self, path: &str) -> Vec<T> {
        self.typed_list(path).unwrap_or_default()
    }

    /// Read a list whose elements are all exactly `T`, or `default`.
    pub fn get_list_or<T: ListItem>(&self, path: &str, default: Vec<T>) -> Vec<T> {
        self.typed_list(path).unwrap_or(default)
    }

    pub fn is_list(&self, path: &str) -> bool {
        self.is_kind(path, ValueKind::List)
    }

    pub fn get_string_list(&self, path: &str) -> Vec<String> {
        self.get_list(path)
    }

    pub fn get_integer_list(&self, path: &str) -> Vec<i32> {
        self.get_list(path)
    }

    pub fn get_long_list(&self, path: &str) -> Vec<i64> {
        self.get_list(path)
    }

    pub fn get_boolean_list(&self, path: &str) -> Vec<bool> {
        self.get_list(path)
    }

    pub fn get_double_list(&self, path: &str) -> Vec<f64> {
        self.get_list(path)
    }

    pub fn get_map_list(&self, path: &str) -> Vec<ConfigNode> {
        self.get_list(path)
    }

    // -----------------------------------------------------------------------
    // Structured
    // -----------------------------------------------------------------------

    /// Deserialize the subtree at `path` into `T`.
    ///
    /// Returns `Ok(None)` when nothing is stored at `path`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<Option<T>> {
        let Some(value) = self.get(path) else {
            return Ok(None);
        };
        serde_json::from_value(value.to_json())
            .map(Some)
            .map_err(|e| {
                ConfigError::conversion(path, value.kind(), std::any::type_name::<T>())
                    .with_details(e.to_string())
            })
    }

    fn is_kind(&self, path: &str, kind: ValueKind) -> bool {
        self.get(path).is_some_and(|value| value.kind() == kind)
    }

    fn typed_list<T: ListItem>(&self, path: &str) -> Option<Vec<T>> {
        self.get(path)?.as_list()?.iter().map(T::from_item).collect()
    }

    /// Shared body of the converting getters: absent and null read as the
    /// zero value, everything else goes through `conversion`.
    fn convert<T: Default>(
        &self,
        path: &str,
        target: &str,
        conversion: impl Fn(&Value) -> Option<T>,
    ) -> ConfigResult<T> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => conversion(value)
                .ok_or_else(|| ConfigError::conversion(path, value.kind(), target)),
        }
    }
}

/// 2^63, the first double past `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Int(i) => Some(i64::from(*i)),
        Value::Long(l) => Some(*l),
        Value::Double(d) => {
            let rounded = d.round_ties_even();
            // NaN fails both comparisons.
            if rounded >= -I64_LIMIT && rounded < I64_LIMIT {
                Some(rounded as i64)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::List(_) | Value::Map(_) => None,
    }
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Some(f64::from(*i)),
        Value::Long(l) => Some(*l as f64),
        Value::Double(d) => Some(*d),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::List(_) | Value::Map(_) => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::Long(l) => Some(*l != 0),
        Value::Double(d) => Some(*d != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        }
        Value::Null | Value::List(_) | Value::Map(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn store() -> ConfigStore {
        let mut s = ConfigStore::new("t", "t");
        s.set("text", "hello").unwrap();
        s.set("numeric_text", " 42 ").unwrap();
        s.set("int", 7).unwrap();
        s.set("long", 5_000_000_000i64).unwrap();
        s.set("double", 2.5).unwrap();
        s.set("flag", true).unwrap();
        s.set("nothing", Value::Null).unwrap();
        s.set("names", vec!["a", "b"]).unwrap();
        s.set("mixed", Value::List(vec![Value::Int(1), Value::from("x")]))
            .unwrap();
        s
    }

    #[test]
    fn test_defaulted_getters_require_exact_kind() {
        let s = store();
        assert_eq!(s.get_int_or("int", 0), 7);
        assert_eq!(s.get_int_or("text", 7), 7);
        assert_eq!(s.get_int_or("long", -1), -1);
        assert_eq!(s.get_long_or("int", -1), -1);
        assert_eq!(s.get_double_or("int", 0.5), 0.5);
        assert!(!s.get_bool_or("int", false));
        assert_eq!(s.get_string_or("int", "dflt"), "dflt");
        assert_eq!(s.get_string_or("text", "dflt"), "hello");
    }

    #[test]
    fn test_get_string_never_converts() {
        let s = store();
        assert_eq!(s.get_string("text").as_deref(), Some("hello"));
        assert_eq!(s.get_string("int"), None);
        assert_eq!(s.get_string("missing"), None);
    }

    #[test]
    fn test_converting_int() {
        let s = store();
        assert_eq!(s.get_int("int").unwrap(), 7);
        assert_eq!(s.get_int("numeric_text").unwrap(), 42);
        assert_eq!(s.get_int("double").unwrap(), 2);
        assert_eq!(s.get_int("flag").unwrap(), 1);
        assert_eq!(s.get_int("missing").unwrap(), 0);
        assert_eq!(s.get_int("nothing").unwrap(), 0);

        let err = s.get_int("text").unwrap_err();
        assert_eq!(err.code, ErrorCode::Conversion);
        assert_eq!(err.path.as_deref(), Some("text"));

        // Out of range for 32 bits.
        assert!(s.get_int("long").unwrap_err().is_conversion());
        assert!(s.get_int("names").unwrap_err().is_conversion());
    }

    #[test]
    fn test_double_to_integer_rounds_half_even() {
        let mut s = ConfigStore::new("t", "t");
        s.set("a", 2.5).unwrap();
        s.set("b", 3.5).unwrap();
        s.set("c", -0.5).unwrap();
        s.set("huge", 1e300).unwrap();
        s.set("nan", f64::NAN).unwrap();
        assert_eq!(s.get_long("a").unwrap(), 2);
        assert_eq!(s.get_long("b").unwrap(), 4);
        assert_eq!(s.get_long("c").unwrap(), 0);
        assert!(s.get_long("huge").is_err());
        assert!(s.get_long("nan").is_err());
    }

    #[test]
    fn test_converting_long_and_double() {
        let s = store();
        assert_eq!(s.get_long("long").unwrap(), 5_000_000_000);
        assert_eq!(s.get_long("int").unwrap(), 7);
        assert_eq!(s.get_double("int").unwrap(), 7.0);
        assert_eq!(s.get_double("numeric_text").unwrap(), 42.0);
        assert_eq!(s.get_double("missing").unwrap(), 0.0);
        assert!(s.get_double("text").is_err());
    }

    #[test]
    fn test_converting_bool() {
        let mut s = store();
        s.set("yes", "TRUE").unwrap();
        s.set("zero", 0).unwrap();
        assert!(s.get_bool("flag").unwrap());
        assert!(s.get_bool("yes").unwrap());
        assert!(!s.get_bool("zero").unwrap());
        assert!(s.get_bool("int").unwrap());
        assert!(!s.get_bool("missing").unwrap());
        assert!(s.get_bool("text").is_err());
    }

    #[test]
    fn test_type_predicates() {
        let s = store();
        assert!(s.is_string("text"));
        assert!(!s.is_string("int"));
        assert!(!s.is_string("missing"));
        assert!(!s.is_string("names"));
        assert!(s.is_int("int"));
        assert!(!s.is_int("long"));
        assert!(s.is_long("long"));
        assert!(s.is_double("double"));
        assert!(s.is_bool("flag"));
        assert!(s.is_list("names"));
        assert!(!s.is_list("text"));
    }

    #[test]
    fn test_lists_match_exactly() {
        let s = store();
        assert_eq!(s.get_string_list("names"), vec!["a", "b"]);
        assert!(s.get_integer_list("names").is_empty());
        assert!(s.get_integer_list("mixed").is_empty());
        assert!(s.get_string_list("missing").is_empty());
        assert!(s.get_string_list("text").is_empty());
        assert_eq!(
            s.get_list_or::<i32>("names", vec![9]),
            vec![9]
        );
        assert_eq!(
            s.get_list_or::<String>("names", vec![]),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_long_and_double_lists() {
        let mut s = ConfigStore::new("t", "t");
        s.set("sizes", vec![1i64 << 33, 7i64]).unwrap();
        s.set("ratios", vec![0.5, 1.25]).unwrap();
        s.set("ints", vec![1, 2]).unwrap();

        assert_eq!(s.get_long_list("sizes"), vec![1i64 << 33, 7]);
        assert_eq!(s.get_double_list("ratios"), vec![0.5, 1.25]);
        assert!(s.get_long_list("ints").is_empty());
        assert!(s.get_double_list("ints").is_empty());
    }

    #[test]
    fn test_empty_list_matches_any_element_type() {
        let mut s = ConfigStore::new("t", "t");
        s.set("empty", Vec::<i32>::new()).unwrap();
        assert!(s.get_list_or::<String>("empty", vec!["x".into()]).is_empty());
        assert!(s.get_boolean_list("empty").is_empty());
    }

    #[test]
    fn test_map_list() {
        let mut s = ConfigStore::new("t", "t");
        let mut first = ConfigNode::new();
        first.insert("id".into(), Value::Int(1));
        s.set("entries", vec![Value::Map(first.clone())]).unwrap();
        assert_eq!(s.get_map_list("entries"), vec![first]);
    }

    #[test]
    fn test_get_as_deserializes_subtree() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Server {
            host: String,
            port: u16,
        }

        let mut s = ConfigStore::new("t", "t");
        s.set("server.host", "localhost").unwrap();
        s.set("server.port", 8080).unwrap();

        let server: Server = s.get_as("server").unwrap().unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".into(),
                port: 8080
            }
        );
        assert!(s.get_as::<Server>("missing").unwrap().is_none());
        assert!(s.get_as::<Server>("server.host").unwrap_err().is_conversion());
    }
}
