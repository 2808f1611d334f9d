//! What a controller action returns.
//!
//! Every action produces a [`Reply`]: a status code plus a tagged [`Body`].
//! The tag decides how the dispatcher serializes it, so there is no runtime
//! type inspection on the response path.

use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::method::Action;

/// Response body of a controller action.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// A mapping, written as `application/json`.
    Json(Map<String, Value>),
    /// Written verbatim as `text/plain`.
    Text(String),
    /// Written verbatim as `application/octet-stream`.
    Bytes(Bytes),
}

/// Status and body produced by a controller action.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) body: Body,
}

impl Reply {
    pub fn json(status: StatusCode, map: Map<String, Value>) -> Self {
        Self { status, body: Body::Json(map) }
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self { status, body: Body::Text(body.into()) }
    }

    pub fn bytes(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: Body::Bytes(body.into()) }
    }

    /// Serializes `value` into a JSON mapping.
    ///
    /// Values that do not serialize to a JSON object yield
    /// [`Reply::internal_error`].
    pub fn to_json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Self::json(status, map),
            Ok(other) => {
                error!(kind = json_kind(&other), "reply value is not a JSON mapping");
                Self::internal_error()
            }
            Err(err) => {
                error!(error = %err, "reply value cannot be serialized");
                Self::internal_error()
            }
        }
    }

    /// `404 Not Found` with a generic body.
    pub fn not_found() -> Self {
        Self::text(StatusCode::NOT_FOUND, "Not Found")
    }

    /// `500 Internal Server Error` with a generic body.
    pub fn internal_error() -> Self {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// `405 Method Not Allowed` for a capability the controller lacks.
    pub fn unsupported(action: Action) -> Self {
        Self::text(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("{action} method not implemented by this resource"),
        )
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn body(&self) -> &Body { &self.body }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
