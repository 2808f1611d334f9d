//! Media metadata under `{base}/{path...}`.

use http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::controller::Controller;
use crate::media::{Media, MediaLibrary, now_ms};
use crate::payload::{Payload, PayloadKind};
use crate::reply::Reply;
use crate::target::Target;

/// Form-driven media uploads.
///
/// `PUT {base}` with fields `path`, `content`, `file_name`, `description`,
/// `mime` and comma-separated `tags` stores a file; `GET {base}{path}` returns
/// its metadata as JSON.
pub struct MediaController {
    library: MediaLibrary,
}

#[derive(Serialize)]
struct Stored<'a> {
    path: &'a str,
    hash: &'a str,
    size: usize,
}

impl MediaController {
    pub fn new(library: MediaLibrary) -> Self {
        Self { library }
    }
}

impl Controller for MediaController {
    fn name(&self) -> &str {
        "Media"
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Form
    }

    fn show(&self, target: &Target) -> Reply {
        let path = format!("/{}", target.remainder());
        match self.library.find(&path) {
            Ok(Some(media)) => Reply::to_json(StatusCode::OK, &media),
            Ok(None) => Reply::not_found(),
            Err(err) => {
                error!(%path, error = %err, "media lookup failed");
                Reply::internal_error()
            }
        }
    }

    fn create(&self, _target: &Target, payload: Payload) -> Reply {
        let Some(path) = payload.param("path").filter(|p| !p.is_empty()) else {
            return Reply::text(StatusCode::BAD_REQUEST, "missing path");
        };
        // Shown paths are always `/` + remainder.
        let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
        let field = |name| payload.param(name).unwrap_or_default().to_owned();
        let content = payload.param("content").unwrap_or_default();

        let now = now_ms();
        let media = Media {
            path: path.clone(),
            hash: String::new(),
            file_name: field("file_name"),
            tags: payload
                .param("tags")
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            description: field("description"),
            mime: field("mime"),
            created: now,
            modified: now,
        };

        match self.library.store(media, content.as_bytes()) {
            Ok(stored) => Reply::to_json(
                StatusCode::CREATED,
                &Stored { path: &stored.path, hash: &stored.hash, size: content.len() },
            ),
            Err(err) => {
                error!(%path, error = %err, "storing media failed");
                Reply::internal_error()
            }
        }
    }
}
