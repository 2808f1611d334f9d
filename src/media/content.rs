//! Content-addressed blob storage.

use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::StorageContext;
use crate::error::Result;

/// Lowercase hex SHA-256 of `content`; the key content is stored under.
pub fn content_hash(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}

/// Stores blobs by content hash.
pub trait ContentStore: Send + Sync {
    fn write(&self, hash: &str, content: &[u8]) -> Result<()>;
    fn read(&self, hash: &str) -> Result<Vec<u8>>;
}

/// One file per blob, named by its hash, directly under the storage root.
#[derive(Debug)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Creates the storage root if it does not exist yet.
    pub fn open(ctx: &StorageContext) -> Result<Self> {
        fs::create_dir_all(ctx.root())?;
        Ok(Self { root: ctx.root().to_path_buf() })
    }
}

impl ContentStore for FsContentStore {
    fn write(&self, hash: &str, content: &[u8]) -> Result<()> {
        let path = self.root.join(hash);
        debug!(path = %path.display(), bytes = content.len(), "writing content");
        fs::write(path, content)?;
        Ok(())
    }

    fn read(&self, hash: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(hash))?)
    }
}
