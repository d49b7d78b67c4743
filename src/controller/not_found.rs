use super::core::{ControllerContext, ControllerError};
use crate::router::{ParamValue, Parameters};
use frontmvc_macros::controller;
use serde_json::Value;

/// Name the not-found handler is routed by.
pub const NOT_FOUND_CONTROLLER: &str = "PageNotFound";

/// Its only action.
pub const NOT_FOUND_ACTION: &str = "error";

/// Status the not-found page is sent with.
pub const NOT_FOUND_STATUS: u16 = 404;

const VIEW_SOURCE: &str = include_str!("templates/pagenotfound.html");
const LAYOUT_SOURCE: &str = include_str!("templates/main.html");

/// Built-in not-found page, registered in the framework namespace.
///
/// Applications that enable `use_app_namespace_for_not_found` register their own
/// `PageNotFound` instead. Template files on disk take precedence over the embedded ones.
#[derive(Debug, Default)]
pub struct PageNotFound;

#[controller(default_action = "error", no_model)]
impl PageNotFound {
    /// Render the 404 page. The failure detail is shown only in debug mode.
    #[action(args = [[], ["messages"]])]
    pub fn error(
        &mut self,
        ctx: &mut ControllerContext,
        params: &Parameters,
    ) -> Result<(), ControllerError> {
        let debug = ctx.is_debug();
        let view = ctx.create_view();
        let view_path = view.view_path("pagenotfound");
        let layout_path = view.layout_path("main");
        view.embed(view_path, VIEW_SOURCE);
        view.embed(layout_path, LAYOUT_SOURCE);

        view.set("layoutName", "main")?;
        view.set("viewName", "pagenotfound")?;
        view.set("title", "Page Not Found")?;

        if debug {
            if let Some(messages) = params.get("messages").map(message_list) {
                view.set("messages", messages)?;
            }
        }

        ctx.set_status(NOT_FOUND_STATUS);
        Ok(())
    }
}

/// Messages arrive already decoded by the front controller.
fn message_list(value: &ParamValue) -> Value {
    match value {
        ParamValue::Single(message) => Value::Array(vec![Value::String(message.clone())]),
        ParamValue::List(messages) => {
            Value::Array(messages.iter().cloned().map(Value::String).collect())
        }
    }
}
