use super::core::ResolveError;
use super::fs::FileSystem;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// What [`ModuleLoader::load`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The module was loaded by this call
    Loaded,
    /// An earlier call already loaded it; nothing happened
    AlreadyLoaded,
}

/// Load-once guard keyed by symbolic name.
///
/// The map entry stays locked while the module is being loaded, so concurrent first use of
/// the same name loads it exactly once and the other callers observe `AlreadyLoaded`. A
/// failed load leaves no entry behind and may be retried.
pub struct ModuleLoader {
    fs: Arc<dyn FileSystem>,
    loaded: DashMap<String, PathBuf>,
}

impl ModuleLoader {
    #[must_use]
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            loaded: DashMap::new(),
        }
    }

    /// Load the module for `name` from `path` unless it is already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::LoadFailed`] if the filesystem cannot load the file.
    pub fn load(&self, name: &str, path: &Path) -> Result<LoadOutcome, ResolveError> {
        match self.loaded.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                debug!(
                    name = %name,
                    path = %existing.get().display(),
                    "Module already loaded"
                );
                Ok(LoadOutcome::AlreadyLoaded)
            }
            Entry::Vacant(slot) => {
                self.fs
                    .load(path)
                    .map_err(|e| ResolveError::LoadFailed {
                        name: name.to_string(),
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                info!(name = %name, path = %path.display(), "Module loaded");
                slot.insert(path.to_path_buf());
                Ok(LoadOutcome::Loaded)
            }
        }
    }

    #[must_use]
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Path a name was loaded from.
    #[must_use]
    pub fn loaded_path(&self, name: &str) -> Option<PathBuf> {
        self.loaded.get(name).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}
