//! Concurrent two-level object store.
//!
//! ```text
//! repos: DashMap<repository, Arc<Bucket>>
//!                              └── DashMap<resource_id, Bytes>
//! ```
//!
//! A repository bucket is installed with a single atomic insert-if-absent
//! (`entry().or_insert_with()`), so concurrent first writers to an unseen
//! name all end up in the same bucket. Inside a bucket every operation is
//! atomic per key: inserting a fresh id goes through the vacant entry, and
//! removal is an atomic check-and-remove, so two racing removals of the same
//! id cannot both succeed.
//!
//! The outer shard lock is only held long enough to clone the bucket's `Arc`;
//! operations on a bucket never hold it. Buckets are never removed.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};
use uuid::Uuid;

type Bucket = DashMap<String, Bytes>;

/// Produces resource ids for newly created resources.
///
/// The store retries when a generated id is already taken, so a generator
/// must eventually produce a fresh value.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> String;
}

/// Random UUID v4 ids in simple (32 hex digit) form.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync + 'static,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Process-wide repository → resource map.
pub struct RepositoryStore {
    repos: DashMap<String, Arc<Bucket>>,
    ids: Box<dyn IdGenerator>,
}

impl RepositoryStore {
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    pub fn with_ids(ids: impl IdGenerator) -> Self {
        Self { repos: DashMap::new(), ids: Box::new(ids) }
    }

    /// Returns the payload stored under `id`, if both repository and id
    /// exist.
    pub fn get(&self, repository: &str, id: &str) -> Option<Bytes> {
        let bucket = self.bucket(repository)?;
        bucket.get(id).map(|entry| entry.value().clone())
    }

    /// Stores `payload` under a freshly generated id in `repository`,
    /// creating the repository on first use. Returns the id.
    pub fn insert(&self, repository: &str, payload: Bytes) -> String {
        let bucket = self.bucket_or_create(repository);
        loop {
            match bucket.entry(self.ids.next_id()) {
                Entry::Vacant(slot) => {
                    let id = slot.key().clone();
                    slot.insert(payload);
                    return id;
                }
                Entry::Occupied(slot) => {
                    warn!(repository, id = %slot.key(), "generated id already in use, retrying");
                }
            }
        }
    }

    /// Removes `id` from `repository`. Returns whether it was present.
    pub fn remove(&self, repository: &str, id: &str) -> bool {
        self.bucket(repository)
            .is_some_and(|bucket| bucket.remove(id).is_some())
    }

    pub fn contains_repository(&self, repository: &str) -> bool {
        self.repos.contains_key(repository)
    }

    /// Number of resources in `repository`; `None` if it was never created.
    pub fn len(&self, repository: &str) -> Option<usize> {
        self.bucket(repository).map(|bucket| bucket.len())
    }

    fn bucket(&self, repository: &str) -> Option<Arc<Bucket>> {
        self.repos.get(repository).map(|entry| Arc::clone(entry.value()))
    }

    fn bucket_or_create(&self, repository: &str) -> Arc<Bucket> {
        if let Some(bucket) = self.bucket(repository) {
            return bucket;
        }
        let entry = self.repos.entry(repository.to_owned()).or_insert_with(|| {
            debug!(repository, "repository created");
            Arc::default()
        });
        Arc::clone(entry.value())
    }
}

impl Default for RepositoryStore {
    fn default() -> Self { Self::new() }
}
