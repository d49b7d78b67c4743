use super::fs::FileSystem;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Separator between namespace segments of a symbolic name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Root used when none is configured.
pub const DEFAULT_ROOT: &str = "../..";

/// Module file extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = "rs";

const DIR_SEPARATOR: char = '/';

/// A `(namespace prefix, base path)` pair. Bindings are tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBinding {
    pub prefix: String,
    pub path: String,
}

impl NamespaceBinding {
    /// Create a binding, trimming trailing directory separators from the base path.
    #[must_use]
    pub fn new(prefix: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            path: path.into(),
        }
        .trimmed()
    }

    fn trimmed(mut self) -> Self {
        let trimmed_len = self.path.trim_end_matches(DIR_SEPARATOR).len();
        self.path.truncate(trimmed_len);
        self
    }

    /// Literal string-prefix test against a symbolic name.
    #[must_use]
    pub fn claims(&self, symbolic_name: &str) -> bool {
        symbolic_name.starts_with(&self.prefix)
    }
}

/// Resolution and loading failures.
///
/// `ModuleNotFound` never reaches users directly; the router reports it as a missing
/// controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No candidate path exists
    ModuleNotFound {
        name: String,
        /// Number of candidate paths tried
        tried: usize,
    },
    /// The module file exists but could not be loaded
    LoadFailed {
        name: String,
        path: PathBuf,
        message: String,
    },
    /// The module loaded but defines no registered type with this name
    ClassNotRegistered { name: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ModuleNotFound { name, tried } => {
                write!(f, "No module file found for '{name}' ({tried} candidates tried)")
            }
            ResolveError::LoadFailed {
                name,
                path,
                message,
            } => write!(
                f,
                "Failed to load module '{}' from {}: {}",
                name,
                path.display(),
                message
            ),
            ResolveError::ClassNotRegistered { name } => {
                write!(f, "Controller class '{name}' does not exist")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Symbolic name split into the pieces candidate paths are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RelativeModule {
    /// `Skel/Controller/Main.rs`
    relative_path: String,
    /// `Main.rs`
    file_name: String,
}

/// Resolves symbolic names to module files.
///
/// Bindings are fixed once the resolver is shared; wrap it in an `Arc` after configuration.
#[derive(Clone)]
pub struct ModuleResolver {
    root: String,
    extension: String,
    bindings: Vec<NamespaceBinding>,
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for ModuleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleResolver")
            .field("root", &self.root)
            .field("extension", &self.extension)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

impl ModuleResolver {
    /// Create a resolver rooted at `root` (or [`DEFAULT_ROOT`]).
    #[must_use]
    pub fn new(root: Option<&Path>, fs: Arc<dyn FileSystem>) -> Self {
        let root = root
            .map(|r| r.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_ROOT.to_string());
        Self {
            root,
            extension: DEFAULT_EXTENSION.to_string(),
            bindings: Vec::new(),
            fs,
        }
    }

    /// Set the module file extension (with or without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Append bindings after the existing ones.
    pub fn add_namespaces<I>(&mut self, bindings: I) -> &mut Self
    where
        I: IntoIterator<Item = NamespaceBinding>,
    {
        self.bindings
            .extend(bindings.into_iter().map(NamespaceBinding::trimmed));
        self
    }

    /// Import a JSON namespace map (`{"Vendor\\Lib": "vendor/lib/src"}` or a list of paths
    /// per namespace). Entries with an empty namespace are skipped; multi-path entries
    /// become one binding per path, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object of strings or
    /// string lists.
    pub fn import_namespace_manifest(&mut self, path: &Path) -> anyhow::Result<&mut Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read namespace manifest {}", path.display()))?;
        let imported = parse_namespace_manifest(&content)
            .with_context(|| format!("invalid namespace manifest {}", path.display()))?;
        info!(
            manifest = %path.display(),
            imported = imported.len(),
            "Imported namespace bindings"
        );
        Ok(self.add_namespaces(imported))
    }

    #[must_use]
    pub fn bindings(&self) -> &[NamespaceBinding] {
        &self.bindings
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Every candidate path for `symbolic_name`, in the order they are tried.
    #[must_use]
    pub fn candidates(&self, symbolic_name: &str) -> Vec<PathBuf> {
        let symbolic_name = symbolic_name.trim_start_matches(NAMESPACE_SEPARATOR);
        let module = self.relative_module(symbolic_name);
        let relative_lower = module.relative_path.to_ascii_lowercase();
        let file_lower = module.file_name.to_ascii_lowercase();
        let root = self.root.as_str();
        let relative_path = module.relative_path.as_str();
        let file_name = module.file_name.as_str();

        let claimed: Vec<&NamespaceBinding> = self
            .bindings
            .iter()
            .filter(|b| b.claims(symbolic_name))
            .collect();

        let join = |parts: &[&str]| -> PathBuf {
            let mut joined = String::new();
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    joined.push(DIR_SEPARATOR);
                }
                joined.push_str(part);
            }
            PathBuf::from(joined)
        };

        if claimed.is_empty() {
            return vec![
                join(&[root, relative_lower.as_str()]),
                join(&[root, relative_path]),
            ];
        }

        let mut candidates = Vec::with_capacity(claimed.len() * 6);
        for binding in claimed {
            let base = binding.path.as_str();
            candidates.push(join(&[base, file_lower.as_str()]));
            candidates.push(join(&[base, file_name]));
            candidates.push(join(&[root, base, relative_lower.as_str()]));
            candidates.push(join(&[root, base, relative_path]));
            candidates.push(join(&[base, relative_path]));
            candidates.push(join(&[base, relative_lower.as_str()]));
        }
        candidates
    }

    /// Resolve `symbolic_name` to the first existing candidate, or `None`.
    #[must_use]
    pub fn resolve(&self, symbolic_name: &str) -> Option<PathBuf> {
        let candidates = self.candidates(symbolic_name);
        let found = candidates.iter().find_map(|c| self.fs.resolve(c));
        match &found {
            Some(path) => debug!(
                name = %symbolic_name,
                path = %path.display(),
                "Module resolved"
            ),
            None => debug!(
                name = %symbolic_name,
                candidates = candidates.len(),
                "Module not found"
            ),
        }
        found
    }

    /// Like [`resolve`](Self::resolve) but reporting the miss as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ModuleNotFound`] when no candidate exists.
    pub fn try_resolve(&self, symbolic_name: &str) -> Result<PathBuf, ResolveError> {
        self.resolve(symbolic_name)
            .ok_or_else(|| ResolveError::ModuleNotFound {
                name: symbolic_name.to_string(),
                tried: self.candidates(symbolic_name).len(),
            })
    }

    fn relative_module(&self, symbolic_name: &str) -> RelativeModule {
        let (namespace, leaf) = match symbolic_name.rfind(NAMESPACE_SEPARATOR) {
            Some(pos) => (
                Some(&symbolic_name[..pos]),
                &symbolic_name[pos + NAMESPACE_SEPARATOR.len_utf8()..],
            ),
            None => (None, symbolic_name),
        };

        let mut relative_path = String::new();
        if let Some(namespace) = namespace {
            relative_path.push_str(&namespace.replace(NAMESPACE_SEPARATOR, "/"));
            relative_path.push(DIR_SEPARATOR);
        }
        relative_path.push_str(&leaf.replace('_', "/"));
        relative_path.push('.');
        relative_path.push_str(&self.extension);

        let file_name = relative_path
            .rsplit(DIR_SEPARATOR)
            .next()
            .unwrap_or(relative_path.as_str())
            .to_string();

        RelativeModule {
            relative_path,
            file_name,
        }
    }
}

pub(super) fn parse_namespace_manifest(content: &str) -> anyhow::Result<Vec<NamespaceBinding>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let map = value
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("expected a JSON object of namespace → path"))?;

    let mut bindings = Vec::new();
    for (namespace, paths) in map {
        // catch-all entries are not supported
        if namespace.is_empty() {
            continue;
        }
        match paths {
            serde_json::Value::String(path) => {
                bindings.push(NamespaceBinding::new(namespace.clone(), path.clone()));
            }
            serde_json::Value::Array(list) => {
                for path in list {
                    let path = path.as_str().ok_or_else(|| {
                        anyhow::anyhow!("path list of '{namespace}' must contain only strings")
                    })?;
                    bindings.push(NamespaceBinding::new(namespace.clone(), path));
                }
            }
            _ => anyhow::bail!("paths of '{namespace}' must be a string or a list of strings"),
        }
    }
    Ok(bindings)
}
