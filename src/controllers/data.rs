//! Raw byte storage under `{base}/{repository}/{id}`.

use std::sync::Arc;

use http::StatusCode;
use serde_json::{Map, Value};

use crate::controller::Controller;
use crate::payload::{Payload, PayloadKind};
use crate::reply::Reply;
use crate::store::RepositoryStore;
use crate::target::Target;

/// Show, create and destroy opaque payloads in a [`RepositoryStore`].
///
/// Edit is not supported. Mount it with
/// [`PathShape::RepositoryFirst`](crate::PathShape::RepositoryFirst) to
/// address repositories by path; with the default shape every resource lives
/// in the unnamed repository.
pub struct DataController {
    store: Arc<RepositoryStore>,
}

impl DataController {
    pub fn new() -> Self {
        Self::with_store(Arc::new(RepositoryStore::new()))
    }

    pub fn with_store(store: Arc<RepositoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RepositoryStore {
        &self.store
    }
}

impl Default for DataController {
    fn default() -> Self { Self::new() }
}

impl Controller for DataController {
    fn name(&self) -> &str {
        "Data Storage"
    }

    fn payload_kind(&self) -> PayloadKind {
        PayloadKind::Binary
    }

    fn show(&self, target: &Target) -> Reply {
        match self.store.get(target.repository(), target.resource_id()) {
            Some(bytes) => Reply::bytes(StatusCode::OK, bytes),
            None => Reply::not_found(),
        }
    }

    fn create(&self, target: &Target, payload: Payload) -> Reply {
        let bytes = match payload {
            Payload::Binary(bytes) => bytes,
            Payload::Form(_) => Default::default(),
        };
        let size = bytes.len();
        let oid = self.store.insert(target.repository(), bytes);

        let mut created = Map::new();
        created.insert("oid".into(), Value::String(oid));
        created.insert("size".into(), Value::from(size));
        Reply::json(StatusCode::CREATED, created)
    }

    fn destroy(&self, target: &Target) -> Reply {
        if self.store.remove(target.repository(), target.resource_id()) {
            Reply::text(StatusCode::OK, "OK")
        } else {
            Reply::not_found()
        }
    }
}
