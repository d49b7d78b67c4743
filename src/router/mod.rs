//! # Router Module
//!
//! Maps a request path and an application name onto a controller, one of its actions and a
//! set of named parameters.
//!
//! ## Overview
//!
//! Routing is a pure function of the path, the application name and the metadata the
//! controllers declared. It runs in these steps:
//!
//! 1. **Parse** - drop any `?` query suffix, trim one leading and one trailing `/`, split on
//!    `/` ([`ParsedPath`]).
//! 2. **Controller** - segment 0 (or the configured default), first letter upper-cased, joined
//!    into `App\Controller\Name`. If the [`ClassLocator`](crate::resolver::ClassLocator)
//!    cannot locate it the result is [`ErrorKind::ControllerNotFound`].
//! 3. **Action** - segment 1 is looked up among the controller's tagged actions, first match
//!    wins, and the arguments are segments 2 and beyond. When segment 1 is absent, empty or
//!    unknown, the controller's default action is used with arguments from segment 1 onwards.
//!    No default gives [`ErrorKind::InvalidAction`].
//! 4. **Arguments** - the action's argument shapes are scanned in declaration order and the
//!    first one that accepts the argument count binds them ([`match_shape`]). An action with
//!    no shapes is [`ErrorKind::NoArgumentLists`]; no accepting shape is
//!    [`ErrorKind::NoArgumentMatch`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use frontmvc::router::{Router, RouteResult};
//!
//! let router = Router::new("main", table.clone(), table);
//! match router.route("/blog/show/42", "Skel") {
//!     RouteResult::Resolved(route) => {
//!         assert_eq!(route.controller_fqn, "Skel\\Controller\\Blog");
//!         assert_eq!(route.parameters["id"].as_str(), Some("42"));
//!     }
//!     RouteResult::Failed(failure) => eprintln!("{failure}"),
//! }
//! ```
//!
//! Failures are values, not errors: the front controller decides whether to re-route to the
//! not-found handler.

mod core;
mod path;
mod result;
mod shapes;

pub use core::{
    capitalize_first, controller_fqn, model_fqn, short_name, Router, CONTROLLER_NAMESPACE,
    MODEL_NAMESPACE,
};
pub use path::{ParsedPath, MAX_INLINE_SEGMENTS};
pub use result::{
    ErrorKind, ParamValue, Parameters, ResolvedRoute, RouteFailure, RouteRequest, RouteResult,
};
pub use shapes::{bind, match_shape};
