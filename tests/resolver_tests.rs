mod common;

use common::temp_files::write_file;
use frontmvc::resolver::{
    DiskFileSystem, FileSystem, LoadOutcome, ModuleLoader, ModuleResolver, NamespaceBinding,
    ResolveError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn disk(search_paths: Vec<PathBuf>) -> Arc<dyn FileSystem> {
    Arc::new(DiskFileSystem::new(search_paths))
}

#[test]
fn test_lowercase_file_in_bound_directory() {
    let dir = TempDir::new().unwrap();
    let apps = dir.path().join("apps");
    let expected = write_file(&apps, "main.rs", "// main");

    let mut resolver = ModuleResolver::new(None, disk(vec![dir.path().to_path_buf()]));
    resolver.add_namespaces([NamespaceBinding::new("Skel\\", apps.display().to_string())]);

    assert_eq!(resolver.resolve("Skel\\Controller\\Main"), Some(expected));
}

#[test]
fn test_search_path_for_relative_binding() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "lib/Skel/Controller/Main.rs", "// main");

    let mut resolver = ModuleResolver::new(None, disk(vec![dir.path().to_path_buf()]));
    resolver.add_namespaces([NamespaceBinding::new("Skel\\", "lib/")]);

    // found as `<base>/<relative path>`, anchored by the search path
    assert_eq!(
        resolver.resolve("Skel\\Controller\\Main"),
        Some(dir.path().join("lib/Skel/Controller/Main.rs"))
    );
}

#[test]
fn test_root_relative_fallback() {
    let dir = TempDir::new().unwrap();
    let expected = write_file(dir.path(), "vendor/thing/widget.rs", "// widget");

    let resolver = ModuleResolver::new(Some(dir.path()), disk(vec![]));
    assert_eq!(resolver.resolve("Vendor\\Thing\\Widget"), Some(expected));
}

#[test]
fn test_not_found_reports_candidates_tried() {
    let dir = TempDir::new().unwrap();
    let mut resolver = ModuleResolver::new(Some(dir.path()), disk(vec![]));
    resolver.add_namespaces([
        NamespaceBinding::new("Skel\\", "apps"),
        NamespaceBinding::new("Skel\\Controller\\", "ctrl"),
    ]);

    match resolver.try_resolve("Skel\\Controller\\Missing") {
        Err(ResolveError::ModuleNotFound { name, tried }) => {
            assert_eq!(name, "Skel\\Controller\\Missing");
            assert_eq!(tried, 12);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_namespace_manifest_from_disk() {
    let dir = TempDir::new().unwrap();
    let expected = write_file(dir.path(), "vendor/acme/src/Client.rs", "// client");
    let manifest = write_file(
        dir.path(),
        "namespaces.json",
        r#"{"": "ignored", "Acme\\": ["nowhere", "vendor/acme/src"]}"#,
    );

    let mut resolver = ModuleResolver::new(Some(dir.path()), disk(vec![dir.path().to_path_buf()]));
    resolver.import_namespace_manifest(&manifest).unwrap();
    assert_eq!(resolver.bindings().len(), 2);
    assert_eq!(resolver.resolve("Acme\\Client"), Some(expected));
}

#[test]
fn test_invalid_namespace_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_file(dir.path(), "namespaces.json", r#"["not", "an", "object"]"#);
    let mut resolver = ModuleResolver::new(None, disk(vec![]));
    assert!(resolver.import_namespace_manifest(&manifest).is_err());
    assert!(resolver
        .import_namespace_manifest(&dir.path().join("absent.json"))
        .is_err());
}

#[test]
fn test_loader_reads_each_module_once() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "main.rs", "// main");
    let loader = ModuleLoader::new(disk(vec![]));

    assert_eq!(loader.load("Skel\\Main", &path).unwrap(), LoadOutcome::Loaded);
    std::fs::remove_file(&path).unwrap();
    // a second load never touches the file again
    assert_eq!(
        loader.load("Skel\\Main", &path).unwrap(),
        LoadOutcome::AlreadyLoaded
    );
    assert_eq!(loader.loaded_path("Skel\\Main"), Some(path));
}

#[test]
fn test_loader_reports_unreadable_module() {
    let dir = TempDir::new().unwrap();
    let loader = ModuleLoader::new(disk(vec![]));
    let err = loader
        .load("Skel\\Gone", &dir.path().join("gone.rs"))
        .unwrap_err();
    assert!(matches!(err, ResolveError::LoadFailed { .. }));
    assert!(!loader.is_loaded("Skel\\Gone"));
}
