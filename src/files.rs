//! File location and enumeration relative to an application root.
//!
//! All relative paths are resolved against the locator's root directory,
//! which is passed in explicitly rather than read from process state.

use crate::config::ConfigStore;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name used under the platform config directory.
const APP_DIR_NAME: &str = "config-tree";

/// Resolves and enumerates files under a fixed root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocator {
    root: PathBuf,
}

impl FileLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locator rooted at `<platform config dir>/config-tree`, or the current
    /// directory when the platform has none.
    pub fn discover() -> Self {
        let root = dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path against the root. Absolute paths are returned as is.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// The resolved file, if it exists.
    pub fn file(&self, relative: impl AsRef<Path>) -> Option<PathBuf> {
        let path = self.resolve(relative);
        path.is_file().then_some(path)
    }

    /// The resolved file, created empty (with its parent directories) if it
    /// does not exist yet.
    pub fn file_or_create(&self, relative: impl AsRef<Path>) -> ConfigResult<PathBuf> {
        let path = self.resolve(relative);
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
            }
            std::fs::File::create(&path).map_err(|e| ConfigError::io(&path, e))?;
            debug!(path = %path.display(), "Created empty file");
        }
        Ok(path)
    }

    pub fn read_text(&self, relative: impl AsRef<Path>) -> ConfigResult<String> {
        let path = self.resolve(relative);
        if !path.is_file() {
            return Err(ConfigError::file_not_found(&path));
        }
        std::fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))
    }

    pub fn write_text(&self, relative: impl AsRef<Path>, text: &str) -> ConfigResult<()> {
        let path = self.resolve(relative);
        std::fs::write(&path, text).map_err(|e| ConfigError::io(&path, e))
    }

    /// All files in `dir`, then (when `deep`) in its subdirectories.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if `dir` does not exist under the root.
    pub fn files(&self, dir: impl AsRef<Path>, deep: bool) -> ConfigResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        traverse(&self.resolve(dir), deep, &mut files)?;
        Ok(files)
    }

    /// File names (with extension) of [`files`](Self::files).
    pub fn file_names(&self, dir: impl AsRef<Path>, deep: bool) -> ConfigResult<Vec<String>> {
        Ok(self
            .files(dir, deep)?
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    /// File names without extension of [`files`](Self::files).
    pub fn file_stems(&self, dir: impl AsRef<Path>, deep: bool) -> ConfigResult<Vec<String>> {
        Ok(self
            .files(dir, deep)?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect())
    }

    /// Load a store from a root-relative file.
    pub fn load_store(&self, relative: impl AsRef<Path>) -> ConfigResult<ConfigStore> {
        ConfigStore::load(self.resolve(relative))
    }

    /// Save a store to a root-relative file.
    pub fn save_store(&self, store: &ConfigStore, relative: impl AsRef<Path>) -> ConfigResult<()> {
        store.save(self.resolve(relative))
    }
}

fn traverse(dir: &Path, deep: bool, out: &mut Vec<PathBuf>) -> ConfigResult<()> {
    if !dir.is_dir() {
        return Err(ConfigError::directory_not_found(dir));
    }

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ConfigError::io(dir, e))? {
        let entry = entry.map_err(|e| ConfigError::io(dir, e))?;
        let path = entry.path();
        // file_type() does not follow symlinks.
        let file_type = entry.file_type().map_err(|e| ConfigError::io(&path, e))?;
        if file_type.is_dir() {
            dirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "Skipping symlinked directory");
        } else {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();
    out.extend(files);

    if deep {
        for sub_dir in dirs {
            traverse(&sub_dir, true, out)?;
        }
    }
    Ok(())
}
