use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A bound parameter: one raw argument, or the overflow list a rest slot collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::List(values) => Some(values),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

/// Named parameters bound from a single argument shape.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Why routing (or controller construction) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ControllerNotFound,
    InvalidAction,
    NoArgumentLists,
    NoArgumentMatch,
    ControllerConstructionFailed,
}

impl ErrorKind {
    /// Detail text reported for this kind when nothing more specific is known.
    #[must_use]
    pub fn default_detail(self) -> &'static str {
        match self {
            ErrorKind::ControllerNotFound => "Controller class does not exist",
            ErrorKind::InvalidAction => "Invalid action with no default",
            ErrorKind::NoArgumentLists => "No argument lists specified",
            ErrorKind::NoArgumentMatch => "No argument lists matched the provided arguments",
            ErrorKind::ControllerConstructionFailed => "Failed to create the controller",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A typed routing failure. The caller decides whether to re-route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFailure {
    pub kind: ErrorKind,
    pub detail: String,
}

impl RouteFailure {
    #[must_use]
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Failure carrying the kind's standard detail text.
    #[must_use]
    pub fn of(kind: ErrorKind) -> Self {
        Self::new(kind, kind.default_detail())
    }
}

impl fmt::Display for RouteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

impl std::error::Error for RouteFailure {}

/// A ready-to-invoke controller/action/parameters tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRoute {
    /// `App\Controller\Name`
    pub controller_fqn: String,
    /// `Name`
    pub controller_name: String,
    pub action_name: String,
    pub parameters: Parameters,
    /// Positional arguments the parameters were bound from
    pub raw_args: Vec<String>,
}

/// Outcome of [`Router::route`](super::Router::route).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResult {
    Resolved(ResolvedRoute),
    Failed(RouteFailure),
}

impl RouteResult {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, RouteResult::Resolved(_))
    }

    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedRoute> {
        match self {
            RouteResult::Resolved(route) => Some(route),
            RouteResult::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&RouteFailure> {
        match self {
            RouteResult::Resolved(_) => None,
            RouteResult::Failed(failure) => Some(failure),
        }
    }

    /// Convert into a `Result` for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteFailure`] when routing failed.
    pub fn into_result(self) -> Result<ResolvedRoute, RouteFailure> {
        match self {
            RouteResult::Resolved(route) => Ok(route),
            RouteResult::Failed(failure) => Err(failure),
        }
    }
}

impl From<Result<ResolvedRoute, RouteFailure>> for RouteResult {
    fn from(result: Result<ResolvedRoute, RouteFailure>) -> Self {
        match result {
            Ok(route) => RouteResult::Resolved(route),
            Err(failure) => RouteResult::Failed(failure),
        }
    }
}

/// The per-request routing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub raw_path: String,
    pub app_name: String,
}

impl RouteRequest {
    #[must_use]
    pub fn new(raw_path: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
            app_name: app_name.into(),
        }
    }
}
