mod common;

use common::manifests::SKEL;
use frontmvc::metadata::{parse_manifest, CapabilityTable};
use frontmvc::router::{ErrorKind, ParamValue, RouteRequest, RouteResult, Router};
use std::sync::Arc;

fn router() -> Router {
    let table: Arc<CapabilityTable> = Arc::new(parse_manifest(SKEL).unwrap());
    Router::new("main", Arc::<CapabilityTable>::clone(&table), table)
}

fn resolved(path: &str) -> frontmvc::router::ResolvedRoute {
    match router().route(path, "Skel") {
        RouteResult::Resolved(route) => route,
        RouteResult::Failed(failure) => panic!("{path}: unexpected failure {failure}"),
    }
}

fn failed(path: &str) -> ErrorKind {
    match router().route(path, "Skel") {
        RouteResult::Failed(failure) => failure.kind,
        RouteResult::Resolved(route) => panic!("{path}: unexpectedly resolved {route:?}"),
    }
}

fn list(values: &[&str]) -> ParamValue {
    ParamValue::List(values.iter().map(|v| (*v).to_string()).collect())
}

#[test]
fn test_root_uses_default_controller() {
    let route = resolved("/");
    assert_eq!(route.controller_fqn, "Skel\\Controller\\Main");
    assert_eq!(route.controller_name, "Main");
    assert_eq!(route.action_name, "main");
    assert!(route.parameters.is_empty());
    assert!(route.raw_args.is_empty());
}

#[test]
fn test_named_action_with_positional_args() {
    let route = resolved("/blog/show/42");
    assert_eq!(route.action_name, "show");
    assert_eq!(route.parameters.get("id"), Some(&ParamValue::from("42")));
    assert_eq!(route.parameters.len(), 1);

    let route = resolved("/blog/show/42/hello-world");
    assert_eq!(route.parameters.get("id"), Some(&ParamValue::from("42")));
    assert_eq!(
        route.parameters.get("slug"),
        Some(&ParamValue::from("hello-world"))
    );
}

#[test]
fn test_rest_slot_collects_overflow() {
    let route = resolved("/blog/archive/2020/a/b");
    assert_eq!(route.parameters.get("year"), Some(&ParamValue::from("2020")));
    assert_eq!(route.parameters.get("args"), Some(&list(&["a", "b"])));

    let route = resolved("/blog/archive/2020/a");
    assert_eq!(route.parameters.get("args"), Some(&list(&["a"])));
}

#[test]
fn test_unknown_action_falls_back_to_default() {
    let route = resolved("/main/extra/stuff");
    assert_eq!(route.action_name, "main");
    assert_eq!(route.raw_args, vec!["extra".to_string(), "stuff".to_string()]);
    assert_eq!(route.parameters.get("args"), Some(&list(&["extra", "stuff"])));

    assert_eq!(resolved("/blog").action_name, "index");
}

#[test]
fn test_failures() {
    assert_eq!(failed("/nope"), ErrorKind::ControllerNotFound);
    assert_eq!(failed("/strict/zzz"), ErrorKind::InvalidAction);
    assert_eq!(failed("/bare"), ErrorKind::NoArgumentLists);
    assert_eq!(failed("/blog/show"), ErrorKind::NoArgumentMatch);
    // "42" is not an action, so it becomes an argument to the default
    assert_eq!(failed("/blog/42"), ErrorKind::NoArgumentMatch);
    assert_eq!(failed("/blog/archive/2020"), ErrorKind::NoArgumentMatch);
}

#[test]
fn test_other_application_namespace() {
    let result = router().route("/blog", "Other");
    assert_eq!(
        result.failure().map(|f| f.kind),
        Some(ErrorKind::ControllerNotFound)
    );
}

#[test]
fn test_route_request_and_json() {
    let result = router().route_request(&RouteRequest::new("/blog/show/7?ref=home", "Skel"));
    assert!(result.is_resolved());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "resolved");
    assert_eq!(json["action_name"], "show");
    assert_eq!(json["parameters"]["id"], "7");
}

#[test]
fn test_concurrent_routing() {
    let router = router();
    std::thread::scope(|scope| {
        for i in 0..8 {
            let router = &router;
            scope.spawn(move || {
                let path = format!("/blog/show/{i}");
                let route = router.route(&path, "Skel").into_result().unwrap();
                assert_eq!(
                    route.parameters.get("id"),
                    Some(&ParamValue::from(i.to_string().as_str()))
                );
            });
        }
    });
}
