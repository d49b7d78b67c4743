//! # Front Controller
//!
//! [`App`] is the single entry point: it routes a request path, activates the controller and
//! owns the one recovery path the framework has.
//!
//! When routing fails, or activation reports a recoverable failure, the request is re-routed
//! exactly once to `PageNotFound/error/<detail>/` in either the application namespace or the
//! framework namespace (`use_app_namespace_for_not_found`). Anything that goes wrong while
//! handling that second request is returned as [`FrameworkError::NotFoundHandler`] and never
//! re-routed again.

use crate::config::AppConfig;
use crate::controller::{
    ActivationError, ControllerLifecycle, ControllerRegistry, PageNotFound, RenderedPage,
    NOT_FOUND_ACTION, NOT_FOUND_CONTROLLER,
};
use crate::ids::RequestId;
use crate::metadata::MetadataProvider;
use crate::resolver::{
    Autoloader, ClassLocator, DiskFileSystem, FileSystem, ModuleLoader, ModuleResolver,
    NAMESPACE_SEPARATOR,
};
use crate::router::{
    capitalize_first, ParamValue, ResolvedRoute, RouteFailure, RouteResult, Router,
};
use crate::view::ViewError;
use anyhow::Context;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, info_span, warn};

/// A failure the front controller could not recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameworkError {
    /// The view was misconfigured or failed to render
    View(ViewError),
    /// The controller could not dispatch the action
    Dispatch(String),
    /// The not-found handler itself failed
    NotFoundHandler { cause: String },
}

impl fmt::Display for FrameworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameworkError::View(err) => write!(f, "{err}"),
            FrameworkError::Dispatch(message) => write!(f, "Dispatch failed: {message}"),
            FrameworkError::NotFoundHandler { cause } => {
                write!(f, "Not-found handler failed: {cause}")
            }
        }
    }
}

impl std::error::Error for FrameworkError {}

/// The front controller of one application.
pub struct App {
    config: Arc<AppConfig>,
    app_name: String,
    router: Router,
    lifecycle: ControllerLifecycle,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("app_name", &self.app_name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build the application from its configuration and registered controllers.
    ///
    /// The framework's `PageNotFound` is registered under `framework_namespace`. With
    /// `autoload.enabled`, controllers must also resolve to a module file.
    ///
    /// # Errors
    ///
    /// Returns an error if the autoload namespace manifest cannot be imported.
    pub fn new(config: AppConfig, mut registry: ControllerRegistry) -> anyhow::Result<Self> {
        let app_name = capitalize_first(&config.app_name);
        registry.register::<PageNotFound>(&config.framework_namespace);

        let registry = Arc::new(registry);
        let config = Arc::new(config);

        let classes: Arc<dyn ClassLocator> = if config.autoload.enabled {
            Arc::new(Self::autoloader(&config, Arc::clone(&registry))?)
        } else {
            Arc::clone(&registry) as Arc<dyn ClassLocator>
        };
        let metadata: Arc<dyn MetadataProvider> = Arc::<ControllerRegistry>::clone(&registry);

        let router = Router::new(config.default_controller.clone(), metadata, classes);
        let lifecycle = ControllerLifecycle::new(registry, Arc::clone(&config));

        info!(
            app = %app_name,
            default_controller = %config.default_controller,
            debug = config.debug,
            autoload = config.autoload.enabled,
            custom_not_found = config.use_app_namespace_for_not_found,
            timezone = %config.timezone,
            locale = %config.locale,
            "Application initialised"
        );

        Ok(Self {
            config,
            app_name,
            router,
            lifecycle,
        })
    }

    fn autoloader(
        config: &AppConfig,
        registry: Arc<ControllerRegistry>,
    ) -> anyhow::Result<Autoloader> {
        let autoload = &config.autoload;
        let fs: Arc<dyn FileSystem> =
            Arc::new(DiskFileSystem::new(autoload.search_paths.clone()));
        let mut resolver = ModuleResolver::new(autoload.root.as_deref(), Arc::clone(&fs))
            .with_extension(&autoload.extension);
        resolver.add_namespaces(autoload.namespaces.iter().cloned());
        if let Some(manifest) = &autoload.namespace_manifest {
            resolver
                .import_namespace_manifest(manifest)
                .context("failed to import autoload namespaces")?;
        }

        let mut framework_prefix = config.framework_namespace.clone();
        framework_prefix.push(NAMESPACE_SEPARATOR);

        Ok(Autoloader::new(
            Arc::new(resolver),
            Arc::new(ModuleLoader::new(fs)),
            registry,
        )
        .with_compiled_prefix(framework_prefix))
    }

    /// Application name, first letter upper-cased.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handle one request path.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameworkError`] for failures the not-found re-route cannot recover:
    /// view misconfiguration, dispatch failures and any failure of the not-found handler.
    pub fn handle(&self, raw_path: &str) -> Result<RenderedPage, FrameworkError> {
        let request_id = RequestId::new();
        let span = info_span!("request", request_id = %request_id, path = %raw_path);
        let _guard = span.enter();

        match self.router.route(raw_path, &self.app_name) {
            RouteResult::Resolved(route) => {
                match self.lifecycle.activate_route(&route, &self.app_name) {
                    Ok(page) => Ok(page),
                    Err(ActivationError::NotFound(failure)) => self.not_found(&failure),
                    Err(ActivationError::View(err)) => {
                        error!(error = %err, "View configuration error");
                        Err(FrameworkError::View(err))
                    }
                    Err(ActivationError::Dispatch(message)) => {
                        error!(error = %message, "Dispatch error");
                        Err(FrameworkError::Dispatch(message))
                    }
                }
            }
            RouteResult::Failed(failure) => self.not_found(&failure),
        }
    }

    /// Namespace the not-found handler is resolved in.
    #[must_use]
    pub fn not_found_namespace(&self) -> &str {
        if self.config.use_app_namespace_for_not_found {
            &self.app_name
        } else {
            &self.config.framework_namespace
        }
    }

    /// Re-route to the not-found handler. Failures here are final.
    fn not_found(&self, failure: &RouteFailure) -> Result<RenderedPage, FrameworkError> {
        let namespace = self.not_found_namespace();
        let request = not_found_request(&failure.detail);
        warn!(
            kind = %failure.kind,
            detail = %failure.detail,
            namespace = %namespace,
            "Re-routing to not-found handler"
        );

        let fatal = |cause: String| {
            error!(cause = %cause, namespace = %namespace, "Not-found handler failed");
            FrameworkError::NotFoundHandler { cause }
        };

        let route = self
            .router
            .route(&request, namespace)
            .into_result()
            .map(decode_parameters)
            .map_err(|f| fatal(f.to_string()))?;
        self.lifecycle
            .activate_route(&route, namespace)
            .map_err(|e| fatal(e.to_string()))
    }
}

/// `PageNotFound/error/<urlencoded detail>/`, or just `PageNotFound` without a detail.
#[must_use]
pub fn not_found_request(detail: &str) -> String {
    if detail.is_empty() {
        NOT_FOUND_CONTROLLER.to_string()
    } else {
        format!(
            "{}/{}/{}/",
            NOT_FOUND_CONTROLLER,
            NOT_FOUND_ACTION,
            urlencoding::encode(detail)
        )
    }
}

/// Undo the percent-encoding of [`not_found_request`] so handlers see the plain detail.
fn decode_parameters(mut route: ResolvedRoute) -> ResolvedRoute {
    let decode = |raw: &mut String| {
        let decoded = match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => return,
        };
        *raw = decoded;
    };
    for value in route.parameters.values_mut() {
        match value {
            ParamValue::Single(raw) => decode(raw),
            ParamValue::List(raw) => raw.iter_mut().for_each(decode),
        }
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_request() {
        assert_eq!(not_found_request(""), "PageNotFound");
        assert_eq!(
            not_found_request("Controller class does not exist"),
            "PageNotFound/error/Controller%20class%20does%20not%20exist/"
        );
        assert_eq!(not_found_request("a/b"), "PageNotFound/error/a%2Fb/");
    }

    #[test]
    fn test_decode_parameters() {
        let mut route = ResolvedRoute {
            controller_fqn: "Skel\\Controller\\PageNotFound".to_string(),
            controller_name: "PageNotFound".to_string(),
            action_name: "error".to_string(),
            parameters: Default::default(),
            raw_args: vec!["a%2Fb%20c".to_string()],
        };
        route
            .parameters
            .insert("messages".to_string(), ParamValue::from("a%2Fb%20c"));
        route.parameters.insert(
            "args".to_string(),
            ParamValue::List(vec!["x%25".to_string(), "%FF".to_string()]),
        );

        let route = decode_parameters(route);
        assert_eq!(route.parameters["messages"].as_str(), Some("a/b c"));
        // invalid UTF-8 stays as sent
        assert_eq!(
            route.parameters["args"].as_list(),
            Some(["x%".to_string(), "%FF".to_string()].as_slice())
        );
    }
}
