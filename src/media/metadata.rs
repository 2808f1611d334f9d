//! Media metadata records.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::Media;
use crate::error::Result;

/// Persists [`Media`] records keyed by path.
pub trait MetadataStore: Send + Sync {
    /// Saves `media`, replacing any record with the same path. A replaced
    /// record's `created` time carries over to the new one in the same step.
    /// Returns the replaced record.
    fn save(&self, media: &Media) -> Result<Option<Media>>;

    fn find_by_path(&self, path: &str) -> Result<Option<Media>>;
}

/// Keeps records in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: DashMap<String, Media>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self { Self::default() }
}

impl MetadataStore for MemoryMetadataStore {
    fn save(&self, media: &Media) -> Result<Option<Media>> {
        match self.records.entry(media.path.clone()) {
            Entry::Occupied(mut slot) => {
                let created = slot.get().created;
                Ok(Some(slot.insert(Media { created, ..media.clone() })))
            }
            Entry::Vacant(slot) => {
                slot.insert(media.clone());
                Ok(None)
            }
        }
    }

    fn find_by_path(&self, path: &str) -> Result<Option<Media>> {
        Ok(self.records.get(path).map(|r| r.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(path: &str, description: &str) -> Media {
        Media {
            path: path.into(),
            description: description.into(),
            ..Media::default()
        }
    }

    #[test]
    fn save_and_find() {
        let store = MemoryMetadataStore::new();
        assert_eq!(store.save(&media("/a", "first")).unwrap(), None);
        assert_eq!(store.find_by_path("/a").unwrap(), Some(media("/a", "first")));
        assert_eq!(store.find_by_path("/b").unwrap(), None);
    }

    #[test]
    fn save_replaces_by_path() {
        let store = MemoryMetadataStore::new();
        store.save(&media("/a", "first")).unwrap();
        let previous = store.save(&media("/a", "second")).unwrap();
        assert_eq!(previous, Some(media("/a", "first")));
        assert_eq!(store.find_by_path("/a").unwrap().unwrap().description, "second");
    }

    #[test]
    fn concurrent_saves_keep_the_first_created_time() {
        use std::sync::{Arc, Barrier};

        let store = Arc::new(MemoryMetadataStore::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (1..=8u64)
            .map(|n| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    let record = Media { path: "/a".into(), created: n, modified: n, ..Media::default() };
                    store.save(&record).unwrap()
                })
            })
            .collect();
        let replaced: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Exactly one writer found the path empty; its time is the one kept.
        let first: Vec<_> = replaced.iter().filter(|r| r.is_none()).collect();
        assert_eq!(first.len(), 1);
        let kept = store.find_by_path("/a").unwrap().unwrap().created;
        assert!(replaced.iter().flatten().all(|r| r.created == kept));
    }
}
