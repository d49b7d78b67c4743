use super::core::{ModuleResolver, ResolveError};
use super::loader::ModuleLoader;
use std::sync::Arc;

/// Decides whether a controller class can be routed to.
pub trait ClassLocator: Send + Sync {
    /// `Ok` when `class` is available, loading whatever is needed to make it so.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] describing why the class is unavailable.
    fn locate(&self, class: &str) -> Result<(), ResolveError>;
}

/// Class locator that requires a module file per class before deferring to the registered
/// types.
///
/// Names under one of the `compiled_prefixes` (the framework's own controllers) are
/// compiled into the binary and skip file resolution.
pub struct Autoloader {
    resolver: Arc<ModuleResolver>,
    loader: Arc<ModuleLoader>,
    classes: Arc<dyn ClassLocator>,
    compiled_prefixes: Vec<String>,
}

impl Autoloader {
    #[must_use]
    pub fn new(
        resolver: Arc<ModuleResolver>,
        loader: Arc<ModuleLoader>,
        classes: Arc<dyn ClassLocator>,
    ) -> Self {
        Self {
            resolver,
            loader,
            classes,
            compiled_prefixes: Vec::new(),
        }
    }

    /// Exempt names starting with `prefix` from file resolution.
    #[must_use]
    pub fn with_compiled_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.compiled_prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    #[must_use]
    pub fn loader(&self) -> &ModuleLoader {
        &self.loader
    }
}

impl ClassLocator for Autoloader {
    fn locate(&self, class: &str) -> Result<(), ResolveError> {
        let compiled = self
            .compiled_prefixes
            .iter()
            .any(|prefix| class.starts_with(prefix.as_str()));
        if !compiled && !self.loader.is_loaded(class) {
            let path = self.resolver.try_resolve(class)?;
            self.loader.load(class, &path)?;
        }
        self.classes.locate(class)
    }
}
