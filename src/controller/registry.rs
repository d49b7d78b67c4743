use super::core::{Controller, ControllerContext, ControllerError, ControllerType, Model};
use crate::metadata::{ActionDescriptor, CapabilityTable, ControllerMeta, MetadataProvider};
use crate::resolver::{ClassLocator, ResolveError};
use crate::router::{controller_fqn, model_fqn};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds a controller instance for one request.
pub type ControllerFactory = Arc<
    dyn Fn(&mut ControllerContext) -> Result<Box<dyn Controller>, ControllerError> + Send + Sync,
>;

/// Builds a model instance for one request.
pub type ModelFactory = Arc<dyn Fn() -> Box<dyn Model> + Send + Sync>;

/// Controller and model types known to the application, with their capability table.
///
/// Filled once at startup and then shared read-only.
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, ControllerFactory>,
    models: HashMap<String, ModelFactory>,
    table: CapabilityTable,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.table.classes())
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller type as `<namespace>\Controller\<C::NAME>`.
    pub fn register<C: ControllerType>(&mut self, namespace: &str) -> &mut Self {
        let fqn = controller_fqn(namespace, C::NAME);
        self.register_with(fqn, C::metadata(), |ctx| {
            C::construct(ctx).map(|controller| Box::new(controller) as Box<dyn Controller>)
        })
    }

    /// Register a controller under an explicit FQN with hand-built metadata.
    pub fn register_with<F>(
        &mut self,
        fqn: impl Into<String>,
        meta: ControllerMeta,
        factory: F,
    ) -> &mut Self
    where
        F: Fn(&mut ControllerContext) -> Result<Box<dyn Controller>, ControllerError>
            + Send
            + Sync
            + 'static,
    {
        let fqn = fqn.into();
        if self.controllers.contains_key(&fqn) {
            warn!(controller_fqn = %fqn, "Replaced existing controller registration");
        }
        info!(
            controller_fqn = %fqn,
            actions = meta.methods.len(),
            default_action = ?meta.default_action,
            "Controller registered"
        );
        self.table.insert(fqn.clone(), meta);
        self.controllers.insert(fqn, Arc::new(factory));
        self
    }

    /// Register the model constructed for `<namespace>\Controller\<controller>`.
    pub fn register_model<M, F>(
        &mut self,
        namespace: &str,
        controller: &str,
        factory: F,
    ) -> &mut Self
    where
        M: Model + 'static,
        F: Fn() -> M + Send + Sync + 'static,
    {
        let fqn = model_fqn(namespace, controller);
        info!(model_fqn = %fqn, "Model registered");
        self.models
            .insert(fqn, Arc::new(move || Box::new(factory()) as Box<dyn Model>));
        self
    }

    #[must_use]
    pub fn contains(&self, fqn: &str) -> bool {
        self.controllers.contains_key(fqn)
    }

    #[must_use]
    pub fn meta(&self, fqn: &str) -> Option<&ControllerMeta> {
        self.table.get(fqn)
    }

    #[must_use]
    pub fn table(&self) -> &CapabilityTable {
        &self.table
    }

    #[must_use]
    pub fn factory(&self, fqn: &str) -> Option<ControllerFactory> {
        self.controllers.get(fqn).cloned()
    }

    /// A fresh model for `model_fqn`, if one is registered.
    #[must_use]
    pub fn create_model(&self, model_fqn: &str) -> Option<Box<dyn Model>> {
        self.models.get(model_fqn).map(|factory| factory())
    }
}

impl MetadataProvider for ControllerRegistry {
    fn has_capability(&self, class: &str, tag: &str) -> bool {
        self.table.has_capability(class, tag)
    }

    fn tagged_methods(&self, class: &str, tag: &str) -> Vec<&ActionDescriptor> {
        self.table.tagged_methods(class, tag)
    }

    fn default_action(&self, class: &str) -> Option<&ActionDescriptor> {
        self.table.default_action(class)
    }
}

impl ClassLocator for ControllerRegistry {
    fn locate(&self, class: &str) -> Result<(), ResolveError> {
        if self.contains(class) {
            Ok(())
        } else {
            Err(ResolveError::ClassNotRegistered {
                name: class.to_string(),
            })
        }
    }
}
