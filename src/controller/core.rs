use crate::metadata::ControllerMeta;
use crate::router::Parameters;
use crate::view::{Template, View, ViewError};
use std::fmt;
use std::path::PathBuf;

/// Status a page gets unless the action changes it.
pub const DEFAULT_STATUS: u16 = 200;

/// Data-access object a controller is constructed with.
///
/// This is a stub: the framework only constructs models, it never talks to a store.
pub trait Model: Send {
    /// Names of the collections this model exposes.
    fn collections(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A controller action or constructor failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The requested page does not exist; re-routed to the not-found handler
    PageNotFound { message: String },
    /// The dispatcher has no method for an action the metadata declares
    UnknownAction { action: String },
    View(ViewError),
}

impl ControllerError {
    #[must_use]
    pub fn page_not_found(message: impl Into<String>) -> Self {
        ControllerError::PageNotFound {
            message: message.into(),
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::PageNotFound { message } if message.is_empty() => {
                write!(f, "Page not found")
            }
            ControllerError::PageNotFound { message } => write!(f, "Page not found: {message}"),
            ControllerError::UnknownAction { action } => {
                write!(f, "Controller has no action '{action}'")
            }
            ControllerError::View(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::View(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewError> for ControllerError {
    fn from(err: ViewError) -> Self {
        ControllerError::View(err)
    }
}

/// Per-request state handed to a controller's constructor and its action.
pub struct ControllerContext {
    app_name: String,
    class_name: String,
    debug: bool,
    template_base: PathBuf,
    model: Option<Box<dyn Model>>,
    template: Option<Template>,
    custom_view: Option<Box<dyn View>>,
    status: u16,
}

impl fmt::Debug for ControllerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerContext")
            .field("app_name", &self.app_name)
            .field("class_name", &self.class_name)
            .field("debug", &self.debug)
            .field("has_model", &self.model.is_some())
            .field("template", &self.template)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl ControllerContext {
    #[must_use]
    pub fn new(
        app_name: impl Into<String>,
        class_name: impl Into<String>,
        debug: bool,
        template_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            class_name: class_name.into(),
            debug,
            template_base: template_base.into(),
            model: None,
            template: None,
            custom_view: None,
            status: DEFAULT_STATUS,
        }
    }

    /// Application (namespace) the controller was routed in.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Short controller name, e.g. `Main`.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn model(&self) -> Option<&dyn Model> {
        self.model.as_deref()
    }

    /// Take ownership of the model, typically in the constructor.
    pub fn take_model(&mut self) -> Option<Box<dyn Model>> {
        self.model.take()
    }

    pub(crate) fn set_model(&mut self, model: Box<dyn Model>) {
        self.model = Some(model);
    }

    /// Create the page template for this controller, replacing any earlier one.
    pub fn create_view(&mut self) -> &mut Template {
        self.custom_view = None;
        self.template.insert(Template::new(
            &self.app_name,
            &self.class_name,
            self.template_base.clone(),
        ))
    }

    /// Render with a custom [`View`] instead of the built-in template.
    pub fn set_view(&mut self, view: Box<dyn View>) {
        self.template = None;
        self.custom_view = Some(view);
    }

    #[must_use]
    pub fn view(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut Template> {
        self.template.as_mut()
    }

    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Render whichever view the action configured.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::ViewNotConfigured`] if no view was ever created, and any
    /// rendering error of the view itself.
    pub fn render(&self) -> Result<String, ViewError> {
        if let Some(view) = &self.custom_view {
            return view.render_page();
        }
        match &self.template {
            Some(template) => template.render_page(),
            None => Err(ViewError::ViewNotConfigured {
                message: "The view was never set".to_string(),
            }),
        }
    }
}

/// An instantiated controller the lifecycle can invoke actions on.
///
/// Normally implemented by `#[controller]`, which dispatches on the action name.
pub trait Controller: Send {
    /// Invoke the named action.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownAction`] for names the controller does not define,
    /// or whatever the action itself returns.
    fn invoke(
        &mut self,
        ctx: &mut ControllerContext,
        action: &str,
        params: &Parameters,
    ) -> Result<(), ControllerError>;
}

/// A controller type that can be registered.
pub trait ControllerType: Controller + Sized + 'static {
    /// Short name, e.g. `Main`; the registry prefixes it with `<namespace>\Controller\`.
    const NAME: &'static str;

    /// Tags, actions and argument shapes.
    fn metadata() -> ControllerMeta;

    /// Build an instance for one request.
    ///
    /// # Errors
    ///
    /// Returning [`ControllerError::PageNotFound`] re-routes the request to the not-found
    /// handler.
    fn construct(ctx: &mut ControllerContext) -> Result<Self, ControllerError>;
}
