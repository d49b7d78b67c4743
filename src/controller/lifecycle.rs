use super::core::{ControllerContext, ControllerError};
use super::registry::ControllerRegistry;
use crate::config::AppConfig;
use crate::router::{model_fqn, short_name, ErrorKind, Parameters, ResolvedRoute, RouteFailure};
use crate::view::ViewError;
use serde::Serialize;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Content type of rendered pages.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A rendered response body with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// Why activating a controller failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// Recoverable: the caller may re-route to the not-found handler
    NotFound(RouteFailure),
    /// The view was misconfigured or failed to render
    View(ViewError),
    /// The controller could not dispatch the action, or it panicked
    Dispatch(String),
}

impl ActivationError {
    /// Whether re-routing to the not-found handler may recover from this failure.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ActivationError::NotFound(_))
    }
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationError::NotFound(failure) => write!(f, "{failure}"),
            ActivationError::View(err) => write!(f, "{err}"),
            ActivationError::Dispatch(message) => write!(f, "Dispatch failed: {message}"),
        }
    }
}

impl std::error::Error for ActivationError {}

/// Constructs controllers, invokes actions and renders their views.
#[derive(Debug, Clone)]
pub struct ControllerLifecycle {
    registry: Arc<ControllerRegistry>,
    config: Arc<AppConfig>,
}

impl ControllerLifecycle {
    #[must_use]
    pub fn new(registry: Arc<ControllerRegistry>, config: Arc<AppConfig>) -> Self {
        Self { registry, config }
    }

    #[must_use]
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Activate a resolved route.
    ///
    /// # Errors
    ///
    /// See [`activate`](Self::activate).
    pub fn activate_route(
        &self,
        route: &ResolvedRoute,
        app_name: &str,
    ) -> Result<RenderedPage, ActivationError> {
        self.activate(
            &route.controller_fqn,
            &route.action_name,
            &route.parameters,
            app_name,
        )
    }

    /// Construct the controller (and its model unless it opted out), invoke `action`, render.
    ///
    /// # Errors
    ///
    /// - [`ActivationError::NotFound`] with [`ErrorKind::ControllerConstructionFailed`] if
    ///   the model is missing or the controller signals page-not-found
    /// - [`ActivationError::View`] if the view was never configured or fails to render
    /// - [`ActivationError::Dispatch`] if the action is unknown to the controller or panics
    pub fn activate(
        &self,
        controller_fqn: &str,
        action: &str,
        params: &Parameters,
        app_name: &str,
    ) -> Result<RenderedPage, ActivationError> {
        let start = Instant::now();
        let class_name = short_name(controller_fqn);

        let factory = self.registry.factory(controller_fqn).ok_or_else(|| {
            ActivationError::NotFound(RouteFailure::of(ErrorKind::ControllerNotFound))
        })?;

        let mut ctx = ControllerContext::new(
            app_name,
            class_name,
            self.config.debug,
            self.config.template_base.clone(),
        );

        let skips_model = self
            .registry
            .meta(controller_fqn)
            .is_some_and(|meta| meta.skips_model());
        if !skips_model {
            let model_fqn = model_fqn(app_name, class_name);
            match self.registry.create_model(&model_fqn) {
                Some(model) => ctx.set_model(model),
                None => {
                    warn!(
                        controller_fqn = %controller_fqn,
                        model_fqn = %model_fqn,
                        "Model not registered"
                    );
                    return Err(construction_failed(None));
                }
            }
        }

        let mut controller = factory(&mut ctx).map_err(|e| {
            warn!(controller_fqn = %controller_fqn, error = %e, "Controller construction failed");
            map_controller_error(e)
        })?;

        let invoked = catch_unwind(AssertUnwindSafe(|| {
            controller.invoke(&mut ctx, action, params)
        }));
        match invoked {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(
                    controller_fqn = %controller_fqn,
                    action = %action,
                    error = %e,
                    "Action failed"
                );
                return Err(map_controller_error(e));
            }
            Err(panic) => {
                let panic_message = panic_message(panic.as_ref());
                error!(
                    controller_fqn = %controller_fqn,
                    action = %action,
                    panic_message = %panic_message,
                    "Action panicked"
                );
                return Err(ActivationError::Dispatch(format!(
                    "action '{action}' panicked: {panic_message}"
                )));
            }
        }

        let body = ctx.render().map_err(ActivationError::View)?;
        info!(
            controller_fqn = %controller_fqn,
            action = %action,
            status = ctx.status(),
            bytes = body.len(),
            duration_us = start.elapsed().as_micros(),
            "Controller activated"
        );
        Ok(RenderedPage {
            status: ctx.status(),
            content_type: HTML_CONTENT_TYPE,
            body,
        })
    }
}

fn construction_failed(message: Option<&str>) -> ActivationError {
    let failure = match message {
        Some(message) if !message.is_empty() => {
            RouteFailure::new(ErrorKind::ControllerConstructionFailed, message)
        }
        _ => RouteFailure::of(ErrorKind::ControllerConstructionFailed),
    };
    ActivationError::NotFound(failure)
}

fn map_controller_error(err: ControllerError) -> ActivationError {
    match err {
        ControllerError::PageNotFound { message } => construction_failed(Some(&message)),
        ControllerError::UnknownAction { action } => {
            ActivationError::Dispatch(format!("controller has no action '{action}'"))
        }
        ControllerError::View(err) => ActivationError::View(err),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
