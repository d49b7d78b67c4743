use super::core::{ActionDescriptor, ArgShape, MetadataProvider, DEFAULT_ACTION_TAG, NO_MODEL_TAGS};
use crate::resolver::{ClassLocator, ResolveError};
use std::collections::HashMap;

/// Metadata of one controller type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerMeta {
    pub tags: Vec<String>,
    pub methods: Vec<ActionDescriptor>,
    pub default_action: Option<String>,
}

impl ControllerMeta {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class-level tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Name the default action.
    #[must_use]
    pub fn default_action(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        for method in &mut self.methods {
            method.is_default = method.name == name;
        }
        self.default_action = Some(name);
        self
    }

    /// Declare an action with its argument shapes.
    #[must_use]
    pub fn action(self, name: impl Into<String>, arg_shapes: Vec<ArgShape>) -> Self {
        self.method(ActionDescriptor::action(name, arg_shapes))
    }

    /// Declare a method with arbitrary tags.
    #[must_use]
    pub fn method(mut self, mut descriptor: ActionDescriptor) -> Self {
        descriptor.is_default = self.default_action.as_deref() == Some(descriptor.name.as_str());
        self.methods.push(descriptor);
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the controller opted out of model construction.
    #[must_use]
    pub fn skips_model(&self) -> bool {
        NO_MODEL_TAGS.iter().any(|t| self.has_tag(t))
    }

    /// The method the default action tag points to. A tag naming a method that was never
    /// declared yields `None`.
    #[must_use]
    pub fn default_method(&self) -> Option<&ActionDescriptor> {
        let name = self.default_action.as_deref()?;
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Controller FQN → metadata, built once while the application registers its controllers.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    controllers: HashMap<String, ControllerMeta>,
}

impl CapabilityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the metadata of a controller.
    pub fn insert(&mut self, class: impl Into<String>, meta: ControllerMeta) {
        self.controllers.insert(class.into(), meta);
    }

    #[must_use]
    pub fn get(&self, class: &str) -> Option<&ControllerMeta> {
        self.controllers.get(class)
    }

    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.controllers.contains_key(class)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Registered controller names, sorted.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.controllers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl MetadataProvider for CapabilityTable {
    fn has_capability(&self, class: &str, tag: &str) -> bool {
        self.get(class).is_some_and(|meta| {
            meta.has_tag(tag) || (tag == DEFAULT_ACTION_TAG && meta.default_action.is_some())
        })
    }

    fn tagged_methods(&self, class: &str, tag: &str) -> Vec<&ActionDescriptor> {
        self.get(class)
            .map(|meta| meta.methods.iter().filter(|m| m.has_tag(tag)).collect())
            .unwrap_or_default()
    }

    fn default_action(&self, class: &str) -> Option<&ActionDescriptor> {
        self.get(class)?.default_method()
    }
}

/// A manifest-only table knows controllers by declaration.
impl ClassLocator for CapabilityTable {
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
