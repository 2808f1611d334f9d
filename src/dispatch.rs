//! Request dispatch: one request in, one response out.
//!
//! ```text
//! path ──► Router ──► Mount ──► MethodMap ──► Action   (405 if none)
//!                        │
//!                        ├── Target::parse(path, base, shape)
//!                        ├── read_payload(kind, body)            (422 on failure)
//!                        └── controller action ──► Reply ──► Response
//! ```
//!
//! Routing and target parsing see the percent-decoded path.
//!
//! The error type is [`Infallible`]: every failure becomes a status code
//! here, so hyper never sees an error.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use percent_encoding::percent_decode_str;
use tracing::{debug, info, warn};

use crate::controller;
use crate::method::Action;
use crate::payload::{Payload, PayloadError, read_payload};
use crate::response::Response;
use crate::router::{BodyErrorPolicy, Mount, Router};
use crate::target::Target;

const NOT_FOUND_BODY: &str = "404 page not found";
const METHOD_NOT_SUPPORTED_BODY: &str = "Method not supported";
const BAD_BODY: &str = "Error while reading request body";

/// Core hot path: routes one request and produces one response.
pub(crate) async fn dispatch(
    router: Arc<Router>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = decode_path(req.uri().path());

    let Some(mount) = router.lookup(&path) else {
        if router.is_subtree_root(&path) {
            let location = match req.uri().query() {
                Some(query) => format!("{}/?{query}", req.uri().path()),
                None => format!("{}/", req.uri().path()),
            };
            debug!(%method, %path, %location, "redirecting to subtree root");
            return Ok(Response::moved_permanently(&location).into_inner());
        }
        debug!(%method, %path, "no controller mounted");
        return Ok(Response::text(StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_inner());
    };

    let response = match mount.options.methods.action(&method) {
        None => Response::text(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_SUPPORTED_BODY),
        Some(action) => {
            let query = req.uri().query().map(str::to_owned);
            let content_type = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = req.into_body().collect().await.map(|c| c.to_bytes());
            let payload = read_payload(
                mount.controller.payload_kind(),
                content_type.as_deref(),
                query.as_deref(),
                body,
            );
            handle(&mount, action, &path, payload)
        }
    };

    info!(
        %method,
        %path,
        controller = mount.controller.name(),
        status = response.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request handled"
    );

    Ok(response.into_inner())
}

/// Invalid UTF-8 after decoding is replaced rather than rejected; malformed
/// escapes are kept as written.
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Runs `action` against the mount once the body has been read.
pub(crate) fn handle(
    mount: &Mount,
    action: Action,
    path: &str,
    payload: Result<Payload, PayloadError>,
) -> Response {
    let target = Target::parse(path, &mount.base_path, mount.options.shape);
    let controller = mount.controller.as_ref();

    match payload {
        Ok(payload) => Response::from_reply(controller::invoke(controller, action, &target, payload)),
        Err(err) => {
            warn!(%path, controller = controller.name(), error = %err, "unreadable request body");
            let rejected = Response::text(StatusCode::UNPROCESSABLE_ENTITY, BAD_BODY);
            match mount.options.on_bad_body {
                BodyErrorPolicy::Reject => rejected,
                BodyErrorPolicy::Proceed => {
                    let empty = Payload::empty(controller.payload_kind());
                    let reply = controller::invoke(controller, action, &target, empty);
                    rejected.followed_by(Response::from_reply(reply))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::controller::Controller;
    use crate::payload::PayloadKind;
    use crate::reply::Reply;
    use crate::router::MountOptions;
    use crate::target::PathShape;

    #[derive(Default)]
    struct Counting {
        creates: AtomicUsize,
        last_size: AtomicUsize,
    }

    impl Controller for Counting {
        fn name(&self) -> &str { "Counting" }

        fn create(&self, target: &Target, payload: Payload) -> Reply {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.last_size.store(payload.bytes().len(), Ordering::SeqCst);
            Reply::text(StatusCode::CREATED, format!("created in {}", target.repository()))
        }
    }

    fn mount(controller: Arc<Counting>, options: MountOptions) -> Mount {
        Mount { base_path: "/data/".into(), controller, options }
    }

    fn truncated() -> Result<Payload, PayloadError> {
        let err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        Err(PayloadError::Read(Box::new(err)))
    }

    #[test]
    fn payload_reaches_the_action() {
        let counting = Arc::new(Counting::default());
        let mount = mount(Arc::clone(&counting), MountOptions::new().shape(PathShape::RepositoryFirst));

        let payload = Ok(Payload::Binary(Bytes::from_static(b"val_1")));
        let res = handle(&mount, Action::Create, "/data/photos", payload);

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.body(), b"created in photos");
        assert_eq!(counting.last_size.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn bad_body_is_rejected_without_invoking() {
        let counting = Arc::new(Counting::default());
        let mount = mount(Arc::clone(&counting), MountOptions::new());

        let res = handle(&mount, Action::Create, "/data/", truncated());

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body(), BAD_BODY.as_bytes());
        assert_eq!(counting.creates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn bad_body_can_fall_through_to_the_action() {
        let counting = Arc::new(Counting::default());
        let options = MountOptions::new()
            .shape(PathShape::RepositoryFirst)
            .on_bad_body(BodyErrorPolicy::Proceed);
        let mount = mount(Arc::clone(&counting), options);

        let res = handle(&mount, Action::Create, "/data/r", truncated());

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(res.body(), b"Error while reading request body\ncreated in r");
        assert_eq!(counting.creates.load(Ordering::SeqCst), 1);
        assert_eq!(counting.last_size.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn paths_are_percent_decoded() {
        assert_eq!(decode_path("/media/docs/my%20file.txt"), "/media/docs/my file.txt");
        assert_eq!(decode_path("/media/caf%C3%A9"), "/media/café");
        assert_eq!(decode_path("/media/100%"), "/media/100%");
        assert_eq!(decode_path("/data/a+b"), "/data/a+b");
    }

    #[test]
    fn unsupported_action_is_405() {
        let counting = Arc::new(Counting::default());
        let mount = mount(counting, MountOptions::new());

        let res = handle(&mount, Action::Edit, "/data/x", Ok(Payload::empty(PayloadKind::Binary)));

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.body(), b"Edit method not implemented by this resource");
    }
}
