//! Outgoing HTTP responses.
//!
//! Controllers never see this type. They return a [`Reply`]; the dispatcher
//! turns it into a [`Response`] here and hands the result to hyper.

use bytes::{Bytes, BytesMut};
use http::header::{CONTENT_TYPE, HeaderValue, LOCATION};
use http::StatusCode;
use http_body_util::Full;
use tracing::error;

use crate::reply::{Body, Reply};

// ── ContentType ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ContentType {
    Json,        // application/json
    OctetStream, // application/octet-stream
    Text,        // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// A serialized response, ready to be written.
#[derive(Debug)]
pub(crate) struct Response {
    status: StatusCode,
    content_type: ContentType,
    location: Option<HeaderValue>,
    body: Bytes,
}

impl Response {
    /// Plain-text response, used for the dispatcher's own errors.
    pub(crate) fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self { body: Bytes::from(body.into()), ..Self::typed(status, ContentType::Text) }
    }

    /// `301` to `location`. An unrepresentable location leaves the header out.
    pub(crate) fn moved_permanently(location: &str) -> Self {
        Self {
            location: HeaderValue::from_str(location).ok(),
            ..Self::text(StatusCode::MOVED_PERMANENTLY, "Moved Permanently")
        }
    }

    fn typed(status: StatusCode, content_type: ContentType) -> Self {
        Self { status, content_type, location: None, body: Bytes::new() }
    }

    /// Serializes a controller reply by its tag.
    ///
    /// A mapping that fails to encode becomes a `500` instead.
    pub(crate) fn from_reply(reply: Reply) -> Self {
        let status = reply.status;
        match reply.body {
            Body::Json(map) => match serde_json::to_vec(&map) {
                Ok(body) => Self { body: body.into(), ..Self::typed(status, ContentType::Json) },
                Err(err) => {
                    error!(error = %err, "controller reply cannot be encoded as JSON");
                    Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            Body::Text(text) => Self { body: text.into(), ..Self::typed(status, ContentType::Text) },
            Body::Bytes(bytes) => Self { body: bytes, ..Self::typed(status, ContentType::OctetStream) },
        }
    }

    /// Appends `next`'s body after this one's, separated by a newline.
    ///
    /// Status and content type stay those of `self`: they were decided first.
    pub(crate) fn followed_by(self, next: Response) -> Self {
        let mut body = BytesMut::with_capacity(self.body.len() + 1 + next.body.len());
        body.extend_from_slice(&self.body);
        body.extend_from_slice(b"\n");
        body.extend_from_slice(&next.body);
        Self { body: body.freeze(), ..self }
    }

    pub(crate) fn status(&self) -> StatusCode { self.status }

    #[cfg(test)]
    pub(crate) fn content_type(&self) -> &'static str { self.content_type.as_str() }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &[u8] { &self.body }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type.as_str()));
        if let Some(location) = self.location {
            res.headers_mut().insert(LOCATION, location);
        }
        res
    }
}
