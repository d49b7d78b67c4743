use super::vars::ViewVars;
use minijinja::Environment;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Template file extension.
pub const TEMPLATE_EXTENSION: &str = "html";

/// View configuration and rendering failures. None of these are recovered by re-routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// `content` is reserved for the rendered view inside the layout
    ReservedName { name: String },
    /// The view was never created, or its view/layout name was never set
    ViewNotConfigured { message: String },
    /// Neither the disk nor the embedded sources have the template
    TemplateNotFound { path: PathBuf },
    Io { path: PathBuf, message: String },
    Render { message: String },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::ReservedName { name } => {
                write!(f, "Cannot use the view variable '{name}'")
            }
            ViewError::ViewNotConfigured { message } => write!(f, "View not configured: {message}"),
            ViewError::TemplateNotFound { path } => {
                write!(f, "Template not found: {}", path.display())
            }
            ViewError::Io { path, message } => {
                write!(f, "Failed to read template {}: {}", path.display(), message)
            }
            ViewError::Render { message } => write!(f, "Template render error: {message}"),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<minijinja::Error> for ViewError {
    fn from(err: minijinja::Error) -> Self {
        ViewError::Render {
            message: err.to_string(),
        }
    }
}

/// Something that renders a complete page.
pub trait View: Send {
    /// Render the page body.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the view is misconfigured or rendering fails.
    fn render_page(&self) -> Result<String, ViewError>;
}

/// A view template wrapped in a layout, rendered with `minijinja`.
///
/// Files are looked up under the template base:
///
/// ```text
/// <base>/<app>/view/<controller>/<viewName>.html
/// <base>/<app>/layout/<layoutName>.html
/// ```
///
/// with the first letter of the application name lower-cased (`MyShop` → `myShop`) and the
/// controller name fully lower-cased. Sources registered with
/// [`embed`](Self::embed) are used when the file does not exist on disk.
#[derive(Debug, Clone)]
pub struct Template {
    app_name: String,
    controller_name: String,
    template_base: PathBuf,
    vars: ViewVars,
    embedded: HashMap<String, String>,
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Template {
    #[must_use]
    pub fn new(app_name: &str, controller_name: &str, template_base: impl Into<PathBuf>) -> Self {
        Self {
            app_name: lower_first(app_name),
            controller_name: controller_name.to_lowercase(),
            template_base: template_base.into(),
            vars: ViewVars::new(),
            embedded: HashMap::new(),
        }
    }

    /// Set a view variable, see [`ViewVars::set`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ReservedName`] for `content`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ViewError> {
        self.vars.set(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    #[must_use]
    pub fn vars(&self) -> &ViewVars {
        &self.vars
    }

    /// Register a fallback source for a template path relative to the base.
    pub fn embed(&mut self, relative_path: impl Into<String>, source: impl Into<String>) {
        self.embedded.insert(relative_path.into(), source.into());
    }

    /// `<app>/view/<controller>/<view>.html`
    #[must_use]
    pub fn view_path(&self, view_name: &str) -> String {
        format!(
            "{}/view/{}/{}.{}",
            self.app_name, self.controller_name, view_name, TEMPLATE_EXTENSION
        )
    }

    /// `<app>/layout/<layout>.html`
    #[must_use]
    pub fn layout_path(&self, layout_name: &str) -> String {
        format!(
            "{}/layout/{}.{}",
            self.app_name, layout_name, TEMPLATE_EXTENSION
        )
    }

    /// Render the view, then the layout with the rendered view bound to `content`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotConfigured`] if the view or layout name is unset, and
    /// the lookup or render error otherwise.
    pub fn render(&self) -> Result<String, ViewError> {
        let view_name = self
            .vars
            .view_name()
            .ok_or_else(|| ViewError::ViewNotConfigured {
                message: "No view name was set".to_string(),
            })?;
        let layout_name = self
            .vars
            .layout_name()
            .ok_or_else(|| ViewError::ViewNotConfigured {
                message: "No layout name was set".to_string(),
            })?;

        let view_source = self.load_source(&self.view_path(view_name))?;
        let layout_source = self.load_source(&self.layout_path(layout_name))?;

        // names without an extension keep auto-escaping off, as the layout embeds raw HTML
        let mut env = Environment::new();
        env.add_template("view", &view_source)?;
        env.add_template("layout", &layout_source)?;

        let content = env.get_template("view")?.render(self.vars.as_map())?;
        let page = env
            .get_template("layout")?
            .render(self.vars.with_content(content))?;

        debug!(
            app = %self.app_name,
            controller = %self.controller_name,
            view = %view_name,
            layout = %layout_name,
            bytes = page.len(),
            "Page rendered"
        );
        Ok(page)
    }

    fn load_source(&self, relative: &str) -> Result<String, ViewError> {
        let path = map_path(&self.template_base, relative).ok_or_else(|| {
            ViewError::TemplateNotFound {
                path: PathBuf::from(relative),
            }
        })?;
        if path.is_file() {
            return fs::read_to_string(&path).map_err(|e| ViewError::Io {
                path,
                message: e.to_string(),
            });
        }
        match self.embedded.get(relative) {
            Some(source) => {
                debug!(template = %relative, "Using embedded template");
                Ok(source.clone())
            }
            None => Err(ViewError::TemplateNotFound { path }),
        }
    }
}

impl View for Template {
    fn render_page(&self) -> Result<String, ViewError> {
        self.render()
    }
}

/// Join a relative template path onto the base, refusing anything but plain components.
fn map_path(base: &Path, relative: &str) -> Option<PathBuf> {
    let mut path = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}
