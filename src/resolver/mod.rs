//! # Resolver Module
//!
//! Maps a fully-qualified symbolic name such as `Skel\Controller\Main` to the module file that
//! defines it, and loads that module at most once.
//!
//! ## Overview
//!
//! Resolution and loading are separate:
//!
//! - [`ModuleResolver::resolve`] is a pure lookup. It walks the ordered namespace bindings
//!   whose prefix matches the name and, for each binding, tries six casing/path-join forms in
//!   a fixed precedence before moving on. Names no binding claims are tried against the root.
//! - [`ModuleLoader::load`] performs the side effect once per symbolic name, even under
//!   concurrent first use.
//!
//! [`Autoloader`] combines both behind the [`ClassLocator`] seam the router uses to decide
//! whether a controller exists.
//!
//! ## Candidate Order
//!
//! For `Skel\Controller\Main` with binding `("Skel\", "apps")`, root `../..` and extension `rs`:
//!
//! ```text
//! apps/main.rs
//! apps/Main.rs
//! ../../apps/skel/controller/main.rs
//! ../../apps/Skel/Controller/Main.rs
//! apps/Skel/Controller/Main.rs
//! apps/skel/controller/main.rs
//! ```
//!
//! With no matching binding:
//!
//! ```text
//! ../../skel/controller/main.rs
//! ../../Skel/Controller/Main.rs
//! ```
//!
//! Underscores in the leaf name become directory separators (`Legacy_Thing` →
//! `Legacy/Thing.rs`).
//!
//! ## Filesystem
//!
//! Existence checks go through the [`FileSystem`] trait. [`DiskFileSystem`] checks absolute
//! paths directly and relative ones against its search directories in order;
//! [`MemoryFileSystem`] is an in-process implementation for embedding and tests.

mod autoloader;
mod core;
mod fs;
mod loader;

pub use autoloader::{Autoloader, ClassLocator};
pub use core::{
    ModuleResolver, NamespaceBinding, ResolveError, DEFAULT_EXTENSION, DEFAULT_ROOT,
    NAMESPACE_SEPARATOR,
};
pub use fs::{DiskFileSystem, FileSystem, MemoryFileSystem};
pub use loader::{LoadOutcome, ModuleLoader};
