//! config-tree library
//!
//! A hierarchical configuration store addressed by dotted key paths, with
//! typed defaulted accessors and JSON/YAML persistence.

pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod resources;

pub use config::{ConfigNode, ConfigStore, DocumentFormat, Value, ValueKind};
pub use error::{ConfigError, ConfigResult, ErrorCode};
pub use files::FileLocator;
pub use resources::EmbeddedResources;
