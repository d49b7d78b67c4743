use super::ViewError;
use serde_json::{Map, Value};

/// Variable the rendered view is exposed as inside the layout.
pub const CONTENT_VAR: &str = "content";

/// Variable naming the view template.
pub const VIEW_NAME_VAR: &str = "viewName";

/// Variable naming the layout template.
pub const LAYOUT_NAME_VAR: &str = "layoutName";

/// List variable that `set` appends to instead of replacing.
pub const JS_VAR: &str = "js";

/// Ordered, string-keyed view variables.
///
/// Insertion order is kept so templates iterating the variables see them in the order the
/// action set them.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewVars {
    vars: Map<String, Value>,
    view_name: Option<String>,
    layout_name: Option<String>,
}

impl Default for ViewVars {
    fn default() -> Self {
        let mut vars = Map::new();
        vars.insert(JS_VAR.to_string(), Value::Array(Vec::new()));
        Self {
            vars,
            view_name: None,
            layout_name: None,
        }
    }
}

impl ViewVars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable.
    ///
    /// `viewName` and `layoutName` also select the templates; `js` appends to the script list.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ReservedName`] for `content`, which the layout receives the
    /// rendered view under.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ViewError> {
        if name == CONTENT_VAR {
            return Err(ViewError::ReservedName {
                name: name.to_string(),
            });
        }
        let value = value.into();
        match name {
            VIEW_NAME_VAR => self.view_name = template_name(&value),
            LAYOUT_NAME_VAR => self.layout_name = template_name(&value),
            _ => {}
        }
        if name == JS_VAR {
            match self.vars.get_mut(JS_VAR) {
                Some(Value::Array(scripts)) => scripts.push(value),
                _ => {
                    self.vars
                        .insert(JS_VAR.to_string(), Value::Array(vec![value]));
                }
            }
        } else {
            self.vars.insert(name.to_string(), value);
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    #[must_use]
    pub fn view_name(&self) -> Option<&str> {
        self.view_name.as_deref()
    }

    #[must_use]
    pub fn layout_name(&self) -> Option<&str> {
        self.layout_name.as_deref()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.vars
    }

    /// Variables for the layout pass: everything plus `content`.
    pub(super) fn with_content(&self, content: String) -> Map<String, Value> {
        let mut vars = self.vars.clone();
        vars.insert(CONTENT_VAR.to_string(), Value::String(content));
        vars
    }
}

fn template_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
