//! # CLI Module
//!
//! The `frontmvc` command line: inspect routing decisions and module resolution, and push a
//! single request through the front controller.
//!
//! ## Commands
//!
//! ### `route`
//!
//! Route a path against a YAML controller manifest and print the [`RouteResult`] as JSON:
//!
//! ```bash
//! frontmvc route /blog/show/42 --app skel --manifest controllers.yaml
//! ```
//!
//! Options:
//! - `--app <NAME>` - Application name (default: `App`)
//! - `--manifest <FILE>` - Controller manifest (required)
//! - `--default-controller <NAME>` - Controller for an empty path (default: `main`)
//!
//! ### `resolve`
//!
//! Resolve a symbolic name to its module file, or list every candidate:
//!
//! ```bash
//! frontmvc resolve 'Skel\Controller\Main' --namespace 'Skel\=apps' --search-path .
//! frontmvc resolve 'Skel\Controller\Main' --namespace 'Skel\=apps' --candidates
//! ```
//!
//! Exits non-zero when no candidate exists.
//!
//! ### `run`
//!
//! Handle one request and print status, content type and body. Only the framework's own
//! controllers are registered, so any other path renders the not-found page:
//!
//! ```bash
//! frontmvc run / --config app.yaml --debug
//! ```
//!
//! [`RouteResult`]: crate::router::RouteResult

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
