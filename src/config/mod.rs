//! Dot-path addressed configuration tree.
//!
//! A [`ConfigStore`] owns a tree of nested [`ConfigNode`] mappings. Values are
//! addressed with dotted paths such as `server.http.port`:
//!
//! - **Reads** resolve segment by segment and fall back to the caller's
//!   default on any miss, including a path that runs through a non-mapping.
//! - **Writes** create intermediate mappings on demand, replacing non-mapping
//!   values that stand in the way.
//! - **Typed accessors** come in converting (`get_int`), exact-match
//!   defaulted (`get_int_or`) and predicate (`is_int`) flavors.
//!
//! ## Documents
//! Stores load from and save to JSON or YAML, chosen by file extension. An
//! empty file loads as an empty store.

mod accessors;
mod loader;
mod path;
mod store;
mod types;

pub use accessors::ListItem;
pub use loader::{DocumentFormat, decode, encode};
pub use path::{KeyPath, SEPARATOR};
pub use store::ConfigStore;
pub use types::*;
