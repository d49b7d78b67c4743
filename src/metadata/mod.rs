//! # Metadata Module
//!
//! Controllers declare which of their methods are actions, which action is the default and
//! which argument shapes each action accepts. The router never inspects controller code; it
//! asks a [`MetadataProvider`] for those capability tags.
//!
//! ## Overview
//!
//! - [`ArgShape`] - an ordered list of parameter names; a `None` slot absorbs all remaining
//!   positional arguments as a list bound to `args`
//! - [`ActionDescriptor`] - an action name, its tags and its declared argument shapes
//! - [`ControllerMeta`] - per-controller tags, methods and default action
//! - [`CapabilityTable`] - controller FQN → [`ControllerMeta`], built once at registration and
//!   queried by the router as a pure lookup
//!
//! Metadata is normally produced by the `#[controller]` attribute macro. It can also be read
//! from a YAML manifest (see [`load_manifest`]), which is what the CLI uses:
//!
//! ```yaml
//! controllers:
//!   "Skel\\Controller\\Blog":
//!     default_action: index
//!     tags: [noModel]
//!     actions:
//!       - name: index
//!         args: [[]]
//!       - name: show
//!         args: [["id"], ["id", null]]
//! ```

mod core;
mod manifest;
mod table;

pub use core::{
    ActionDescriptor, ArgShape, MetadataProvider, ACTION_TAG, DEFAULT_ACTION_TAG, NO_MODEL_TAGS,
    REST_PARAMETER,
};
pub use manifest::{load_manifest, parse_manifest, ActionEntry, ControllerEntry, ControllerManifest};
pub use table::{CapabilityTable, ControllerMeta};
