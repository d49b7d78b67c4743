use super::path::ParsedPath;
use super::result::{ErrorKind, ResolvedRoute, RouteFailure, RouteRequest, RouteResult};
use super::shapes::match_shape;
use crate::metadata::{ActionDescriptor, MetadataProvider, ACTION_TAG, DEFAULT_ACTION_TAG};
use crate::resolver::{ClassLocator, NAMESPACE_SEPARATOR};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Namespace segment between the application name and controller names.
pub const CONTROLLER_NAMESPACE: &str = "Controller";

/// Namespace segment between the application name and model names.
pub const MODEL_NAMESPACE: &str = "Model";

/// Maps request paths onto controller/action/parameter tuples.
///
/// The router holds no per-request state and is shared across requests.
#[derive(Clone)]
pub struct Router {
    default_controller: String,
    metadata: Arc<dyn MetadataProvider>,
    classes: Arc<dyn ClassLocator>,
}

impl Router {
    /// Create a router.
    ///
    /// # Arguments
    ///
    /// * `default_controller` - controller used when the first segment is empty
    /// * `metadata` - action tags and argument shapes per controller
    /// * `classes` - decides whether a controller FQN can be routed to
    #[must_use]
    pub fn new(
        default_controller: impl Into<String>,
        metadata: Arc<dyn MetadataProvider>,
        classes: Arc<dyn ClassLocator>,
    ) -> Self {
        Self {
            default_controller: default_controller.into(),
            metadata,
            classes,
        }
    }

    #[must_use]
    pub fn default_controller(&self) -> &str {
        &self.default_controller
    }

    /// Route a request path for an application.
    ///
    /// Never panics and never returns a generic error: every way the path can fail to
    /// resolve is a [`RouteResult::Failed`] with an [`ErrorKind`].
    #[must_use]
    pub fn route(&self, raw_path: &str, app_name: &str) -> RouteResult {
        debug!(path = %raw_path, app = %app_name, "Route attempt");

        let start = Instant::now();
        let result = self.resolve(raw_path, app_name);
        let duration = start.elapsed();

        match &result {
            Ok(route) => {
                if duration > Duration::from_millis(1) {
                    warn!(
                        path = %raw_path,
                        app = %app_name,
                        controller_fqn = %route.controller_fqn,
                        action = %route.action_name,
                        duration_us = duration.as_micros(),
                        "Slow route resolution detected"
                    );
                } else {
                    info!(
                        path = %raw_path,
                        app = %app_name,
                        controller_fqn = %route.controller_fqn,
                        action = %route.action_name,
                        parameters = ?route.parameters,
                        duration_us = duration.as_micros(),
                        "Route resolved"
                    );
                }
            }
            Err(failure) => warn!(
                path = %raw_path,
                app = %app_name,
                kind = %failure.kind,
                detail = %failure.detail,
                duration_us = duration.as_micros(),
                "Route failed"
            ),
        }

        result.into()
    }

    #[must_use]
    pub fn route_request(&self, request: &RouteRequest) -> RouteResult {
        self.route(&request.raw_path, &request.app_name)
    }

    fn resolve(&self, raw_path: &str, app_name: &str) -> Result<ResolvedRoute, RouteFailure> {
        let parsed = ParsedPath::parse(raw_path);

        let controller_name =
            capitalize_first(parsed.controller().unwrap_or(self.default_controller.as_str()));
        let controller_fqn = controller_fqn(app_name, &controller_name);

        if let Err(error) = self.classes.locate(&controller_fqn) {
            debug!(
                controller_fqn = %controller_fqn,
                error = %error,
                "Controller not locatable"
            );
            return Err(RouteFailure::of(ErrorKind::ControllerNotFound));
        }

        let actions = self.metadata.tagged_methods(&controller_fqn, ACTION_TAG);
        let named = parsed
            .action()
            .and_then(|name| actions.iter().copied().find(|a| a.name == name));

        let (action, raw_args) = match named {
            Some(action) => (action, parsed.args_from(2)),
            None => match self.default_action(&controller_fqn) {
                Some(action) => {
                    if let Some(requested) = parsed.action() {
                        debug!(
                            controller_fqn = %controller_fqn,
                            requested = %requested,
                            default_action = %action.name,
                            "Unknown action, using default"
                        );
                    }
                    (action, parsed.args_from(1))
                }
                None => return Err(RouteFailure::of(ErrorKind::InvalidAction)),
            },
        };

        let shapes = self.metadata.arg_shapes(action);
        if shapes.is_empty() {
            return Err(RouteFailure::of(ErrorKind::NoArgumentLists));
        }

        let (shape_index, parameters) = match_shape(shapes, raw_args)
            .ok_or_else(|| RouteFailure::of(ErrorKind::NoArgumentMatch))?;
        debug!(
            controller_fqn = %controller_fqn,
            action = %action.name,
            shape = %shapes[shape_index],
            "Argument shape matched"
        );

        Ok(ResolvedRoute {
            controller_fqn,
            controller_name,
            action_name: action.name.clone(),
            parameters,
            raw_args: raw_args.to_vec(),
        })
    }

    /// The method the controller names as its default action. It need not carry the action
    /// tag itself.
    fn default_action(&self, controller_fqn: &str) -> Option<&ActionDescriptor> {
        if !self
            .metadata
            .has_capability(controller_fqn, DEFAULT_ACTION_TAG)
        {
            return None;
        }
        self.metadata.default_action(controller_fqn)
    }
}

/// Upper-case the first character (ASCII only), leaving the rest untouched.
#[must_use]
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(name.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}

/// `App\Controller\Name`
#[must_use]
pub fn controller_fqn(app_name: &str, controller_name: &str) -> String {
    qualified(app_name, CONTROLLER_NAMESPACE, controller_name)
}

/// `App\Model\Name`
#[must_use]
pub fn model_fqn(app_name: &str, controller_name: &str) -> String {
    qualified(app_name, MODEL_NAMESPACE, controller_name)
}

fn qualified(app_name: &str, namespace: &str, name: &str) -> String {
    let mut fqn = String::with_capacity(app_name.len() + namespace.len() + name.len() + 2);
    fqn.push_str(app_name);
    fqn.push(NAMESPACE_SEPARATOR);
    fqn.push_str(namespace);
    fqn.push(NAMESPACE_SEPARATOR);
    fqn.push_str(name);
    fqn
}

/// The short name of a fully-qualified name (`Skel\Controller\Main` → `Main`).
#[must_use]
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(fqn)
}
