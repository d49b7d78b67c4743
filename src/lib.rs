//! # frontmvc
//!
//! **frontmvc** is a minimal front-controller MVC framework. A single entry point takes a
//! request path and an application name, resolves them to a controller type, an action and
//! a set of named parameters, instantiates the controller and renders a templated page.
//!
//! ## Overview
//!
//! Two pieces carry the weight:
//!
//! - **[`router`]** maps an arbitrary URI onto a controller, an action and positional/named
//!   arguments, using metadata declared on the controller (which methods are actions, which
//!   one is the default, which argument shapes each action accepts).
//! - **[`resolver`]** maps a fully-qualified symbolic name (`Skel\Controller\Main`) onto a file
//!   by walking an ordered list of namespace bindings with several casing/path-join fallbacks,
//!   and loads each module at most once.
//!
//! Everything else is thin: [`metadata`] holds the capability table the router queries,
//! [`controller`] owns construction/invocation/rendering, [`view`] wraps `minijinja`, and
//! [`app`] is the front controller tying them together with the single not-found recovery
//! path.
//!
//! ## Architecture
//!
//! - **[`config`]** - Immutable application configuration (YAML + `FRONTMVC_*` overrides)
//! - **[`logging`]** - `tracing` subscriber initialisation
//! - **[`resolver`]** - Namespace-aware module resolution and load-once loading
//! - **[`metadata`]** - Action descriptors, argument shapes, capability table, YAML manifest
//! - **[`router`]** - Request path → controller/action/parameters
//! - **[`controller`]** - Controller traits, registry, lifecycle, built-in not-found page
//! - **[`view`]** - View variables and template rendering
//! - **[`app`]** - Front controller
//! - **[`cli`]** - The `frontmvc` command line
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant App
//!     participant Router
//!     participant Meta as MetadataProvider
//!     participant Loader as Autoloader
//!     participant Life as ControllerLifecycle
//!     participant View as Template
//!
//!     Caller->>App: handle("/blog/show/42")
//!     App->>Router: route(path, "Skel")
//!     Router->>Loader: locate("Skel\Controller\Blog")
//!     Loader-->>Router: ✓ loaded
//!     Router->>Meta: actions / default action / arg shapes
//!     Router-->>App: Resolved{Blog, show, {id: "42"}}
//!     App->>Life: activate(route)
//!     Life->>Life: construct model + controller
//!     Life->>Life: invoke action
//!     Life->>View: render(view, layout)
//!     View-->>App: RenderedPage
//!
//!     alt routing or construction failed
//!         App->>Router: route("PageNotFound/error/<detail>/", namespace)
//!         App->>Life: activate (no further recovery)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use frontmvc::{controller, App, AppConfig, ControllerRegistry};
//! use frontmvc::controller::{ControllerContext, ControllerError};
//! use frontmvc::router::Parameters;
//!
//! #[derive(Default)]
//! pub struct Main;
//!
//! #[controller(default_action = "home", no_model)]
//! impl Main {
//!     #[action(args = [[]])]
//!     pub fn home(&mut self, ctx: &mut ControllerContext, _params: &Parameters) -> Result<(), ControllerError> {
//!         let view = ctx.create_view();
//!         view.set("layoutName", "main")?;
//!         view.set("viewName", "main")?;
//!         view.set("title", "Skel main page")?;
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register::<Main>("Skel");
//! let app = App::new(AppConfig::new("skel"), registry)?;
//! let page = app.handle("/")?;
//! ```

// Lets the controller macro refer to `::frontmvc` from inside this crate as well.
extern crate self as frontmvc;

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
mod ids;
pub mod logging;
pub mod metadata;
pub mod resolver;
pub mod router;
pub mod view;

pub use app::{App, FrameworkError};
pub use config::AppConfig;
pub use controller::{ControllerRegistry, RenderedPage};
pub use frontmvc_macros::controller;
pub use ids::RequestId;
pub use metadata::{ActionDescriptor, ArgShape, CapabilityTable, ControllerMeta, MetadataProvider};
pub use resolver::{ModuleResolver, NamespaceBinding};
pub use router::{ErrorKind, ParamValue, Parameters, RouteFailure, RouteResult, Router};
