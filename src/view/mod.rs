//! # View Module
//!
//! View variables and page rendering.
//!
//! An action fills a [`Template`] with variables through [`Template::set`]. Two names are
//! special: `viewName` and `layoutName` select the templates, and `js` appends to a list
//! instead of replacing it. `content` is reserved; the layout receives the rendered view
//! under that name.
//!
//! ```rust,ignore
//! let view = ctx.create_view();
//! view.set("layoutName", "main")?;
//! view.set("viewName", "show")?;
//! view.set("title", "Post")?;
//! view.set("js", "/js/post.js")?;
//! ```
//!
//! Rendering uses `minijinja`. The view template is rendered with the variables, then the
//! layout is rendered with the same variables plus `content`. A missing view or layout name
//! is a [`ViewError::ViewNotConfigured`], which is a configuration error and never triggers
//! a not-found re-route.
//!
//! Other engines can be plugged in by implementing [`View`].

mod template;
mod vars;

pub use template::{Template, View, ViewError, TEMPLATE_EXTENSION};
pub use vars::{ViewVars, CONTENT_VAR, JS_VAR, LAYOUT_NAME_VAR, VIEW_NAME_VAR};
