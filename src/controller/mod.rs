//! # Controller Module
//!
//! Controller types, their registry, and the lifecycle that turns a resolved route into a
//! rendered page.
//!
//! ## Defining Controllers
//!
//! A controller is a type implementing [`ControllerType`]. The `#[controller]` attribute
//! generates that implementation from an `impl` block whose actions are marked `#[action]`:
//!
//! ```rust,ignore
//! use frontmvc::controller;
//! use frontmvc::controller::{ControllerContext, ControllerError};
//! use frontmvc::router::Parameters;
//!
//! #[derive(Default)]
//! pub struct Blog;
//!
//! #[controller(default_action = "index", no_model)]
//! impl Blog {
//!     #[action(args = [[], [null]])]
//!     pub fn index(&mut self, ctx: &mut ControllerContext, params: &Parameters) -> Result<(), ControllerError> {
//!         let view = ctx.create_view();
//!         view.set("layoutName", "main")?;
//!         view.set("viewName", "index")?;
//!         Ok(())
//!     }
//!
//!     #[action(args = [["id"]])]
//!     pub fn show(&mut self, ctx: &mut ControllerContext, params: &Parameters) -> Result<(), ControllerError> {
//!         let id = params["id"].as_str().unwrap_or_default();
//!         if id.is_empty() {
//!             return Err(ControllerError::page_not_found("no such post"));
//!         }
//!         let view = ctx.create_view();
//!         view.set("layoutName", "main")?;
//!         view.set("viewName", "show")?;
//!         view.set("id", id)?;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! Attribute options:
//!
//! - `default_action = "name"` - action used when the path names none (or an unknown one)
//! - `no_model` - skip model construction
//! - `tag = "name"` - any other class-level tag
//! - `constructor = path::to::fn` - `fn(&mut ControllerContext) -> Result<Self, ControllerError>`
//!   instead of `Default`
//!
//! `#[action(args = [...])]` lists the accepted argument shapes in match order; `null` is a
//! rest slot collecting the remaining arguments under `args`. `#[action]` alone declares no
//! shapes, which the router reports as `NoArgumentLists`.
//!
//! ## Lifecycle
//!
//! [`ControllerLifecycle::activate`] constructs the model `App\Model\Name` (unless the
//! controller is tagged `noModel`), then the controller, invokes the action and renders the
//! view the action configured. A missing model or a [`ControllerError::PageNotFound`] is
//! reported as a recoverable [`ActivationError::NotFound`]; view problems and dispatch
//! failures are not recoverable.

mod core;
mod lifecycle;
mod not_found;
mod registry;
#[cfg(test)]
mod tests;

pub use core::{
    Controller, ControllerContext, ControllerError, ControllerType, Model, DEFAULT_STATUS,
};
pub use lifecycle::{ActivationError, ControllerLifecycle, RenderedPage, HTML_CONTENT_TYPE};
pub use not_found::{PageNotFound, NOT_FOUND_ACTION, NOT_FOUND_CONTROLLER, NOT_FOUND_STATUS};
pub use registry::{ControllerFactory, ControllerRegistry, ModelFactory};
