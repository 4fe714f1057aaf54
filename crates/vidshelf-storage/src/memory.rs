use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;
use vidshelf_core::error::Result;
use vidshelf_core::{ReadRepository, Repository, StorageError, Video};

/// In-memory implementation of the repository contract using DashMap.
///
/// Title filtering is a case-sensitive substring match.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    storage: DashMap<String, Video>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Video>> {
        let mut videos: Vec<Video> = self
            .storage
            .iter()
            .filter(|entry| title_filter.is_none_or(|q| entry.title.contains(q)))
            .map(|entry| entry.value().clone())
            .collect();

        videos.sort_by(|a, b| {
            a.uploaded_at
                .cmp(&b.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        trace!(count = videos.len(), "listed videos");
        Ok(videos)
    }

    async fn get(&self, id: &str) -> Result<Option<Video>> {
        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.storage.contains_key(id))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, video: &Video) -> Result<()> {
        match self.storage.entry(video.id.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(video.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(video.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, id: &str, video: &Video) -> Result<bool> {
        if video.id == id {
            let Some(mut entry) = self.storage.get_mut(id) else {
                return Ok(false);
            };
            *entry = video.clone();
            return Ok(true);
        }

        // take the row out first so a concurrent delete of `id` either wins
        // outright or finds nothing to remove
        let Some((old_id, old_video)) = self.storage.remove(id) else {
            return Ok(false);
        };

        let renamed = match self.storage.entry(video.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(video.clone());
                true
            }
        };

        if !renamed {
            self.storage.insert(old_id, old_video);
            return Err(StorageError::Conflict(video.id.clone()));
        }

        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.storage.remove(id).is_some())
    }
}
