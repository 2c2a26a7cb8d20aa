//! Resources compiled into the binary and extracted onto disk on demand.
//!
//! Extraction never overwrites: if the destination already exists the call is
//! a no-op, so user edits to an extracted file survive restarts.

use crate::error::{ConfigError, ConfigResult};
use crate::files::FileLocator;
use std::path::Path;
use tracing::{info, warn};

/// Embedded resource content (compiled into binary).
pub mod embedded {
    pub const DEFAULT_CONFIG: &[u8] = include_bytes!("../resources/config.json");
}

/// Resources shipped with this crate.
const BUNDLED: &[(&str, &[u8])] = &[("config.json", embedded::DEFAULT_CONFIG)];

/// A named table of embedded resources.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    entries: &'static [(&'static str, &'static [u8])],
}

impl EmbeddedResources {
    pub const fn new(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// The resources bundled with this crate.
    pub const fn bundled() -> Self {
        Self::new(BUNDLED)
    }

    pub fn get(&self, name: &str) -> Option<&'static [u8]> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| *bytes)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Copy resource `name` to `out`, resolved against the locator root.
    ///
    /// A destination without an extension is treated as a directory and the
    /// resource name is appended. Returns `Ok(true)` if a file was written,
    /// `Ok(false)` if the destination already existed or the resource is
    /// unknown.
    pub fn extract(
        &self,
        name: &str,
        out: impl AsRef<Path>,
        locator: &FileLocator,
    ) -> ConfigResult<bool> {
        let Some(bytes) = self.get(name) else {
            warn!(resource = name, "Unknown embedded resource, nothing extracted");
            return Ok(false);
        };

        let mut target = locator.resolve(out);
        if target.extension().is_none() {
            target.push(name);
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        if target.exists() {
            return Ok(false);
        }

        std::fs::write(&target, bytes).map_err(|e| ConfigError::io(&target, e))?;
        info!(resource = name, path = %target.display(), "Extracted embedded resource");
        Ok(true)
    }
}

impl Default for EmbeddedResources {
    fn default() -> Self {
        Self::bundled()
    }
}
