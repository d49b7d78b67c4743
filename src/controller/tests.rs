use super::*;
use crate::config::AppConfig;
use crate::metadata::{ArgShape, ControllerMeta, MetadataProvider, ACTION_TAG};
use crate::router::{ErrorKind, ParamValue, Parameters};
use crate::view::ViewError;
use frontmvc_macros::controller;
use std::sync::Arc;

#[derive(Default)]
struct Blog {
    greeting: String,
}

fn blog_constructor(ctx: &mut ControllerContext) -> Result<Blog, ControllerError> {
    if ctx.model().is_none() {
        return Err(ControllerError::page_not_found("model missing"));
    }
    Ok(Blog {
        greeting: format!("hello from {}", ctx.class_name()),
    })
}

#[controller(default_action = "index", constructor = blog_constructor, tag = "cached")]
impl Blog {
    #[action(args = [[], [null]])]
    fn index(&mut self, ctx: &mut ControllerContext, _params: &Parameters) -> Result<(), ControllerError> {
        let view = ctx.create_view();
        view.set("layoutName", "main")?;
        view.set("viewName", "index")?;
        view.set("greeting", self.greeting.as_str())?;
        view.embed("skel/view/blog/index.html", "{{ greeting }}");
        view.embed("skel/layout/main.html", "<{{ content }}>");
        Ok(())
    }

    #[action(args = [["id"]])]
    fn show(&mut self, _ctx: &mut ControllerContext, params: &Parameters) -> Result<(), ControllerError> {
        Err(ControllerError::page_not_found(
            params.get("id").and_then(ParamValue::as_str).unwrap_or_default(),
        ))
    }

    #[action]
    fn noview(&mut self, _ctx: &mut ControllerContext, _params: &Parameters) -> Result<(), ControllerError> {
        Ok(())
    }

    #[action(args = [[]])]
    fn explode(&mut self, _ctx: &mut ControllerContext, _params: &Parameters) -> Result<(), ControllerError> {
        panic!("boom");
    }

    #[action(args = [[]])]
    fn reserved(&mut self, ctx: &mut ControllerContext, _params: &Parameters) -> Result<(), ControllerError> {
        ctx.create_view().set("content", "x")?;
        Ok(())
    }

    fn not_an_action(&self) -> usize {
        1
    }
}

struct BlogModel;

impl Model for BlogModel {
    fn collections(&self) -> Vec<String> {
        vec!["posts".to_string()]
    }
}

fn lifecycle(with_model: bool, debug: bool) -> ControllerLifecycle {
    let mut registry = ControllerRegistry::new();
    registry.register::<Blog>("Skel");
    registry.register::<PageNotFound>("Frontmvc");
    if with_model {
        registry.register_model("Skel", "Blog", || BlogModel);
    }
    let dir = std::env::temp_dir().join("frontmvc-controller-tests-no-such-dir");
    let config = AppConfig::new("Skel").with_debug(debug).with_template_base(dir);
    ControllerLifecycle::new(Arc::new(registry), Arc::new(config))
}

const BLOG: &str = "Skel\\Controller\\Blog";

#[test]
fn test_macro_metadata() {
    let meta = <Blog as ControllerType>::metadata();
    assert_eq!(<Blog as ControllerType>::NAME, "Blog");
    assert!(meta.has_tag("cached"));
    assert!(!meta.skips_model());
    assert_eq!(meta.default_action.as_deref(), Some("index"));

    let names: Vec<&str> = meta.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["index", "show", "noview", "explode", "reserved"]);
    assert!(meta.methods.iter().all(|m| m.has_tag(ACTION_TAG)));
    assert_eq!(
        meta.methods[0].arg_shapes,
        vec![ArgShape::empty(), ArgShape::new(vec![None])]
    );
    assert!(meta.methods[0].is_default);
    assert!(meta.methods[2].arg_shapes.is_empty());
    assert_eq!(Blog::default().not_an_action(), 1);
}

#[test]
fn test_not_found_metadata() {
    let meta = <PageNotFound as ControllerType>::metadata();
    assert!(meta.skips_model());
    assert_eq!(meta.default_action.as_deref(), Some(NOT_FOUND_ACTION));
    assert_eq!(
        meta.methods[0].arg_shapes,
        vec![ArgShape::empty(), ArgShape::named(&["messages"])]
    );
}

#[test]
fn test_registry_is_metadata_provider() {
    let mut registry = ControllerRegistry::new();
    registry.register::<Blog>("Skel");
    assert!(registry.contains(BLOG));
    assert_eq!(registry.tagged_methods(BLOG, ACTION_TAG).len(), 5);
    assert_eq!(
        registry.default_action(BLOG).map(|a| a.name.as_str()),
        Some("index")
    );
    assert!(registry.has_capability(BLOG, "cached"));
}

#[test]
fn test_activate_renders_with_model() {
    let page = lifecycle(true, false)
        .activate(BLOG, "index", &Parameters::new(), "Skel")
        .unwrap();
    assert_eq!(page.status, DEFAULT_STATUS);
    assert_eq!(page.content_type, HTML_CONTENT_TYPE);
    assert_eq!(page.body, "<hello from Blog>");
}

#[test]
fn test_missing_model_is_construction_failure() {
    let err = lifecycle(false, false)
        .activate(BLOG, "index", &Parameters::new(), "Skel")
        .unwrap_err();
    assert!(err.is_recoverable());
    match err {
        ActivationError::NotFound(failure) => {
            assert_eq!(failure.kind, ErrorKind::ControllerConstructionFailed);
            assert_eq!(failure.detail, "Failed to create the controller");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_page_not_found_from_action() {
    let mut params = Parameters::new();
    params.insert("id".to_string(), ParamValue::from("42"));
    let err = lifecycle(true, false)
        .activate(BLOG, "show", &params, "Skel")
        .unwrap_err();
    assert_eq!(
        err,
        ActivationError::NotFound(crate::router::RouteFailure::new(
            ErrorKind::ControllerConstructionFailed,
            "42"
        ))
    );
}

#[test]
fn test_view_never_set_is_fatal() {
    let err = lifecycle(true, false)
        .activate(BLOG, "noview", &Parameters::new(), "Skel")
        .unwrap_err();
    assert!(!err.is_recoverable());
    assert!(matches!(
        err,
        ActivationError::View(ViewError::ViewNotConfigured { .. })
    ));
}

#[test]
fn test_reserved_view_variable_is_fatal() {
    let err = lifecycle(true, false)
        .activate(BLOG, "reserved", &Parameters::new(), "Skel")
        .unwrap_err();
    assert!(matches!(
        err,
        ActivationError::View(ViewError::ReservedName { .. })
    ));
}

#[test]
fn test_panicking_action_is_contained() {
    let err = lifecycle(true, false)
        .activate(BLOG, "explode", &Parameters::new(), "Skel")
        .unwrap_err();
    match err {
        ActivationError::Dispatch(message) => assert!(message.contains("boom")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_unknown_action_is_dispatch_error() {
    let err = lifecycle(true, false)
        .activate(BLOG, "nope", &Parameters::new(), "Skel")
        .unwrap_err();
    assert!(matches!(err, ActivationError::Dispatch(_)));
}

#[test]
fn test_unregistered_controller() {
    let err = lifecycle(true, false)
        .activate("Skel\\Controller\\Ghost", "index", &Parameters::new(), "Skel")
        .unwrap_err();
    assert_eq!(
        err,
        ActivationError::NotFound(crate::router::RouteFailure::of(
            ErrorKind::ControllerNotFound
        ))
    );
}

#[test]
fn test_hand_registered_controller() {
    struct Plain;
    impl Controller for Plain {
        fn invoke(
            &mut self,
            ctx: &mut ControllerContext,
            action: &str,
            _params: &Parameters,
        ) -> Result<(), ControllerError> {
            let view = ctx.create_view();
            view.set("layoutName", "l")?;
            view.set("viewName", action)?;
            view.embed("skel/view/plain/go.html", "went");
            view.embed("skel/layout/l.html", "{{ content }}");
            ctx.set_status(201);
            Ok(())
        }
    }

    let mut registry = ControllerRegistry::new();
    registry.register_with(
        "Skel\\Controller\\Plain",
        ControllerMeta::new()
            .tag("nomodel")
            .action("go", vec![ArgShape::empty()]),
        |_ctx| Ok(Box::new(Plain) as Box<dyn Controller>),
    );
    let lifecycle = ControllerLifecycle::new(Arc::new(registry), Arc::new(AppConfig::new("Skel")));
    let page = lifecycle
        .activate("Skel\\Controller\\Plain", "go", &Parameters::new(), "Skel")
        .unwrap();
    assert_eq!(page.status, 201);
    assert_eq!(page.body, "went");
}

#[test]
fn test_not_found_page_debug_messages() {
    let mut params = Parameters::new();
    params.insert(
        "messages".to_string(),
        ParamValue::from("Controller class does not exist"),
    );

    let page = lifecycle(false, true)
        .activate(
            "Frontmvc\\Controller\\PageNotFound",
            NOT_FOUND_ACTION,
            &params,
            "Frontmvc",
        )
        .unwrap();
    assert_eq!(page.status, NOT_FOUND_STATUS);
    assert!(page.body.contains("<title>Page Not Found</title>"));
    assert!(page.body.contains("<li>Controller class does not exist</li>"));

    let page = lifecycle(false, false)
        .activate(
            "Frontmvc\\Controller\\PageNotFound",
            NOT_FOUND_ACTION,
            &params,
            "Frontmvc",
        )
        .unwrap();
    assert!(!page.body.contains("Controller class does not exist"));
}

#[test]
fn test_model_collections_stub() {
    assert_eq!(BlogModel.collections(), vec!["posts".to_string()]);
    struct Bare;
    impl Model for Bare {}
    assert!(Bare.collections().is_empty());
}
