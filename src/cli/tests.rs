//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_route_command_parses() {
    let cli = Cli::try_parse_from([
        "frontmvc",
        "route",
        "/blog/show/42",
        "--app",
        "skel",
        "--manifest",
        "controllers.yaml",
    ])
    .unwrap();

    match cli.command {
        Commands::Route {
            path,
            app,
            manifest,
            default_controller,
        } => {
            assert_eq!(path, "/blog/show/42");
            assert_eq!(app, "skel");
            assert_eq!(manifest, PathBuf::from("controllers.yaml"));
            assert_eq!(default_controller, "main");
        }
        _ => panic!("Expected Route command"),
    }
}

#[test]
fn test_resolve_command_bindings() {
    let cli = Cli::try_parse_from([
        "frontmvc",
        "resolve",
        "Skel\\Controller\\Main",
        "--namespace",
        "Skel\\=apps/",
        "-n",
        "Vendor\\=vendor/src",
        "--candidates",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            name,
            namespaces,
            extension,
            search_paths,
            candidates,
            ..
        } => {
            assert_eq!(name, "Skel\\Controller\\Main");
            assert_eq!(namespaces.len(), 2);
            assert_eq!(namespaces[0].prefix, "Skel\\");
            assert_eq!(namespaces[0].path, "apps");
            assert_eq!(namespaces[1].path, "vendor/src");
            assert_eq!(extension, "rs");
            assert_eq!(search_paths, vec![PathBuf::from(".")]);
            assert!(candidates);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_resolve_rejects_malformed_binding() {
    assert!(Cli::try_parse_from(["frontmvc", "resolve", "X", "--namespace", "nopath"]).is_err());
    assert!(Cli::try_parse_from(["frontmvc", "resolve", "X", "--namespace", "=apps"]).is_err());
}

#[test]
fn test_resolve_candidates_output() {
    let cli = Cli::try_parse_from([
        "frontmvc",
        "resolve",
        "Skel\\Controller\\Main",
        "--root",
        "/srv",
        "--candidates",
    ])
    .unwrap();

    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec!["/srv/skel/controller/main.rs", "/srv/Skel/Controller/Main.rs"]
    );
}

#[test]
fn test_run_renders_not_found_page() {
    let cli = Cli::try_parse_from(["frontmvc", "run", "/nowhere", "--app", "skel"]).unwrap();
    let mut out = Vec::new();
    execute(&cli, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("Status: 404\n"));
    assert!(out.contains("Page Not Found"));
}

#[test]
fn test_missing_command_is_error() {
    assert!(Cli::try_parse_from(["frontmvc"]).is_err());
}
