use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

/// Filesystem-like backing store the resolver checks candidates against.
pub trait FileSystem: Send + Sync {
    /// The concrete location `path` refers to, if a file exists there.
    fn resolve(&self, path: &Path) -> Option<PathBuf>;

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_some()
    }

    /// Load the module at `path`. Called at most once per symbolic name by
    /// [`ModuleLoader`](super::ModuleLoader).
    ///
    /// # Errors
    ///
    /// Returns an error if the module cannot be read.
    fn load(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem with include-path semantics: absolute paths are checked as given,
/// relative paths against each search directory in order.
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    search_paths: Vec<PathBuf>,
}

impl Default for DiskFileSystem {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}

impl DiskFileSystem {
    #[must_use]
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl FileSystem for DiskFileSystem {
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }
        self.search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }

    /// Read the module through once. Controllers are compiled into the binary, so nothing
    /// is evaluated: a successful load only proves the file is present and readable.
    fn load(&self, path: &Path) -> io::Result<()> {
        let source = std::fs::read(path)?;
        debug!(path = %path.display(), bytes = source.len(), "Module loaded");
        Ok(())
    }
}

/// In-memory file set. Paths are compared component-wise, so `a//b` and `a/b` are the same
/// file.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashSet<PathBuf>>,
    loads: RwLock<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a file set from paths.
    #[must_use]
    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let fs = Self::new();
        for path in paths {
            fs.add_file(path);
        }
        fs
    }

    pub fn add_file(&self, path: impl Into<PathBuf>) {
        let path = normalize(&path.into());
        if let Ok(mut files) = self.files.write() {
            files.insert(path);
        }
    }

    /// Every successful `load` call, in order.
    #[must_use]
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.read().map(|l| l.clone()).unwrap_or_default()
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

impl FileSystem for MemoryFileSystem {
    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        let path = normalize(path);
        let files = self.files.read().ok()?;
        files.contains(&path).then_some(path)
    }

    fn load(&self, path: &Path) -> io::Result<()> {
        if self.resolve(path).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not in the file set", path.display()),
            ));
        }
        self.loads
            .write()
            .map_err(|_| io::Error::other("load log poisoned"))?
            .push(normalize(path));
        Ok(())
    }
}
