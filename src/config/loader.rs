//! Loading and saving stores as JSON or YAML documents.
//!
//! Documents are decoded into a JSON value tree first (YAML included, the
//! same way both formats share one model), then bridged into [`Value`]s and
//! applied to a fresh store one top-level key at a time.

use super::store::ConfigStore;
use super::types::{ConfigNode, Value, node_to_json};
use crate::error::{CodecError, ConfigError, ConfigResult};
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }

    /// Pick the format from a file extension. Anything not YAML is JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
            .unwrap_or_default()
    }
}

/// Decode document text into a mapping.
///
/// Blank text (and a document that is just `null`) decodes to an empty
/// mapping. Any other non-mapping document is rejected.
pub fn decode(text: &str, format: DocumentFormat) -> Result<ConfigNode, CodecError> {
    if text.trim().is_empty() {
        return Ok(ConfigNode::new());
    }

    let json: JsonValue = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };

    match Value::from(json) {
        Value::Map(node) => Ok(node),
        Value::Null => Ok(ConfigNode::new()),
        other => Err(CodecError::NotAMapping(other.kind().as_str())),
    }
}

/// Encode a mapping as document text. JSON output is pretty-printed.
pub fn encode(node: &ConfigNode, format: DocumentFormat) -> Result<String, CodecError> {
    let json = JsonValue::Object(node_to_json(node));
    let text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(&json)?,
        DocumentFormat::Yaml => serde_yaml::to_string(&json)?,
    };
    Ok(text)
}

impl ConfigStore {
    /// Build a store from document text.
    ///
    /// Each top-level key goes through [`set`](Self::set), so a dotted
    /// top-level key such as `"a.b"` lands nested under `a`. Keys that are
    /// not valid paths are skipped.
    pub fn parse(
        name: impl Into<String>,
        current_path: impl Into<String>,
        text: &str,
        format: DocumentFormat,
    ) -> ConfigResult<Self> {
        let document = decode(text, format)?;
        let mut store = Self::new(name, current_path);

        for (key, value) in document {
            if let Err(err) = store.set(&key, value) {
                warn!(store = store.name(), key = %key, "Skipping top-level key: {}", err);
            }
        }

        Ok(store)
    }

    /// Load a store from a file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if `path` is not an existing file, `Io` if it
    /// cannot be read, and `InvalidDocument` if it does not decode to a
    /// mapping.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::file_not_found(path));
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let store = Self::parse(
            name,
            path.display().to_string(),
            &text,
            DocumentFormat::from_path(path),
        )
        .map_err(|e| e.with_path(path.display().to_string()))?;

        debug!(path = %path.display(), keys = store.len(), "Loaded configuration");
        Ok(store)
    }

    /// Render the whole tree as document text.
    pub fn render(&self, format: DocumentFormat) -> ConfigResult<String> {
        Ok(encode(self.node(), format)?)
    }

    /// Write the whole tree to `path`, replacing any existing content.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.render(DocumentFormat::from_path(path))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        std::fs::write(path, text).map_err(|e| ConfigError::io(path, e))?;

        debug!(path = %path.display(), keys = self.len(), "Saved configuration");
        Ok(())
    }
}
