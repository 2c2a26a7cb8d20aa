//! Dotted key path tokenizer.
//!
//! Parses paths like `server.http.port` into their segments. A path is
//! well-formed when it is not blank and none of its segments is empty, so
//! `a..b`, `.a` and `a.` are all rejected.

use std::fmt;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// A parsed, well-formed dotted path borrowing from its source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'a> {
    parents: Vec<&'a str>,
    leaf: &'a str,
}

impl<'a> KeyPath<'a> {
    /// Parse a dotted path, returning `None` if it is malformed.
    pub fn parse(path: &'a str) -> Option<Self> {
        if path.trim().is_empty() {
            return None;
        }

        let mut parents: Vec<&'a str> = path.split(SEPARATOR).collect();
        if parents.iter().any(|segment| segment.is_empty()) {
            return None;
        }

        let leaf = parents.pop()?;
        Some(Self { parents, leaf })
    }

    /// Segments leading up to the final key.
    pub fn parents(&self) -> &[&'a str] {
        &self.parents
    }

    /// The final key, looked up in the innermost mapping.
    pub fn leaf(&self) -> &'a str {
        self.leaf
    }

    /// Number of segments, always at least one.
    pub fn depth(&self) -> usize {
        self.parents.len() + 1
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{}{}", parent, SEPARATOR)?;
        }
        f.write_str(self.leaf)
    }
}

/// Join a child key onto an optional dotted prefix.
pub fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, SEPARATOR, key),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = KeyPath::parse("name").unwrap();
        assert!(path.parents().is_empty());
        assert_eq!(path.leaf(), "name");
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_parse_nested() {
        let path = KeyPath::parse("server.http.port").unwrap();
        assert_eq!(path.parents(), &["server", "http"]);
        assert_eq!(path.leaf(), "port");
        assert_eq!(path.to_string(), "server.http.port");
    }

    #[test]
    fn test_rejects_blank_and_empty_segments() {
        assert!(KeyPath::parse("").is_none());
        assert!(KeyPath::parse("   ").is_none());
        assert!(KeyPath::parse("a..b").is_none());
        assert!(KeyPath::parse(".a").is_none());
        assert!(KeyPath::parse("a.").is_none());
    }

    #[test]
    fn test_segments_are_literal() {
        // Whitespace inside a segment is part of the key.
        let path = KeyPath::parse("a. b").unwrap();
        assert_eq!(path.parents(), &["a"]);
        assert_eq!(path.leaf(), " b");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(None, "a"), "a");
        assert_eq!(join(Some("a.b"), "c"), "a.b.c");
    }
}
