use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag carried by every method the router may invoke.
pub const ACTION_TAG: &str = "action";

/// Controller-level tag naming the action used when the path has no (known) action segment.
pub const DEFAULT_ACTION_TAG: &str = "defaultAction";

/// Controller-level tags that skip model construction. Both spellings are accepted.
pub const NO_MODEL_TAGS: [&str; 2] = ["noModel", "nomodel"];

/// Parameter name a rest slot binds the overflow arguments to.
pub const REST_PARAMETER: &str = "args";

/// An ordered positional-parameter template an action accepts.
///
/// `Some(name)` binds one raw argument to `name`; `None` binds every raw argument from its
/// position onwards to [`REST_PARAMETER`].
///
/// Serialises as a JSON/YAML list, e.g. `["id", null]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgShape(Vec<Option<String>>);

impl ArgShape {
    #[must_use]
    pub fn new(slots: Vec<Option<String>>) -> Self {
        Self(slots)
    }

    /// Shape made only of named slots.
    #[must_use]
    pub fn named(names: &[&str]) -> Self {
        Self(names.iter().map(|n| Some((*n).to_string())).collect())
    }

    /// Shape that accepts no arguments at all.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse a shape from its JSON list form, e.g. `["id", null]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a JSON list of strings and nulls.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the shape has a slot that absorbs overflow arguments.
    #[must_use]
    pub fn has_rest_slot(&self) -> bool {
        self.0.iter().any(Option::is_none)
    }

    /// Whether this shape accepts `arg_count` raw arguments.
    ///
    /// Equal length always matches. A shorter shape matches only if it has a rest slot, so
    /// the empty shape matches zero arguments and nothing else.
    #[must_use]
    pub fn accepts(&self, arg_count: usize) -> bool {
        self.len() == arg_count || (self.len() < arg_count && self.has_rest_slot())
    }
}

impl fmt::Display for ArgShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Some(name) => write!(f, "\"{name}\"")?,
                None => write!(f, "null")?,
            }
        }
        write!(f, "]")
    }
}

/// A tagged controller method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    /// Method tags; actions carry [`ACTION_TAG`]
    pub tags: Vec<String>,
    /// Declared argument shapes in declaration order; empty means none were declared
    pub arg_shapes: Vec<ArgShape>,
    /// Set on the method the controller names as its default action
    pub is_default: bool,
}

impl ActionDescriptor {
    /// An action (tagged [`ACTION_TAG`]) with the given shapes.
    #[must_use]
    pub fn action(name: impl Into<String>, arg_shapes: Vec<ArgShape>) -> Self {
        Self {
            name: name.into(),
            tags: vec![ACTION_TAG.to_string()],
            arg_shapes,
            is_default: false,
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Capability lookup the router depends on.
///
/// `class` is always a fully-qualified controller name such as `Skel\Controller\Main`.
pub trait MetadataProvider: Send + Sync {
    /// Whether the controller carries a class-level tag.
    fn has_capability(&self, class: &str, tag: &str) -> bool;

    /// Methods carrying `tag`, in declaration order.
    fn tagged_methods(&self, class: &str, tag: &str) -> Vec<&ActionDescriptor>;

    /// The method named by the controller's default action tag, if it exists.
    fn default_action(&self, class: &str) -> Option<&ActionDescriptor>;

    /// Declared argument shapes of an action.
    fn arg_shapes<'a>(&self, action: &'a ActionDescriptor) -> &'a [ArgShape] {
        &action.arg_shapes
    }
}
