//! Media files: content on disk by hash, metadata by path.
//!
//! Both stores are built from an explicit [`StorageContext`] and handed to a
//! [`MediaLibrary`]; nothing here lives in global state.

mod content;
mod metadata;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::info;

use crate::error::Result;

pub use content::{ContentStore, FsContentStore, content_hash};
pub use metadata::{MemoryMetadataStore, MetadataStore};

/// Where media content lives.
#[derive(Clone, Debug)]
pub struct StorageContext {
    root: PathBuf,
}

impl StorageContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// A media file's metadata. Timestamps are unix milliseconds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Media {
    pub path: String,
    pub hash: String,
    pub file_name: String,
    pub tags: Vec<String>,
    pub description: String,
    pub mime: String,
    pub created: u64,
    pub modified: u64,
}

/// Metadata plus content, kept consistent with each other.
#[derive(Clone)]
pub struct MediaLibrary {
    content: Arc<dyn ContentStore>,
    metadata: Arc<dyn MetadataStore>,
}

impl MediaLibrary {
    pub fn new(content: Arc<dyn ContentStore>, metadata: Arc<dyn MetadataStore>) -> Self {
        Self { content, metadata }
    }

    /// Writes `content` under its hash, then saves `media` with that hash.
    ///
    /// Re-storing an existing path keeps its original `created` time.
    pub fn store(&self, mut media: Media, content: &[u8]) -> Result<Media> {
        media.hash = content_hash(content);
        self.content.write(&media.hash, content)?;

        if let Some(existing) = self.metadata.save(&media)? {
            info!(path = %existing.path, hash = %existing.hash, "replaced existing media");
            media.created = existing.created;
        }
        Ok(media)
    }

    pub fn find(&self, path: &str) -> Result<Option<Media>> {
        self.metadata.find_by_path(path)
    }

    pub fn content(&self, media: &Media) -> Result<Vec<u8>> {
        self.content.read(&media.hash)
    }
}

pub(crate) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
