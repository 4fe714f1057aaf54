use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace};
use vidshelf_core::video::upload_timestamp;
use vidshelf_core::{Catalog, CatalogError, NewVideo, Repository, Video, VideoPatch};

/// A concrete implementation of the `Catalog` trait.
///
/// This service wraps a `Repository` to handle:
/// - Duplicate id detection on create
/// - Server-side upload timestamps
/// - Validation and merging of partial updates
///
/// The existence checks and the writes that follow are separate store
/// calls. Concurrent writers to the same id race; the store's unique key
/// still rejects duplicate inserts.
#[derive(Debug, Clone)]
pub struct CatalogService<R> {
    repository: Arc<R>,
}

impl<R: Repository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }
}

#[async_trait]
impl<R: Repository> Catalog for CatalogService<R> {
    async fn list(&self, query: Option<String>) -> Result<Vec<Video>, CatalogError> {
        let filter = query.as_deref().filter(|q| !q.is_empty());
        trace!(filter = ?filter, "listing videos");

        Ok(self.repository.list(filter).await?)
    }

    async fn create(&self, params: NewVideo) -> Result<Video, CatalogError> {
        if self.repository.exists(&params.id).await? {
            return Err(CatalogError::AlreadyExists(params.id));
        }

        let video = Video {
            id: params.id,
            title: params.title,
            video_length: params.video_length,
            uploaded_at: upload_timestamp(),
        };

        self.repository.insert(&video).await?;

        debug!(video_id = %video.id, uploaded_at = %video.uploaded_at, "created video");
        Ok(video)
    }

    async fn update(&self, id: &str, patch: VideoPatch) -> Result<Video, CatalogError> {
        let Some(current) = self.repository.get(id).await? else {
            return Err(CatalogError::NotFound(id.to_string()));
        };

        patch.validate()?;

        if let Some(new_id) = patch.id.as_deref() {
            if new_id != id && self.repository.exists(new_id).await? {
                return Err(CatalogError::AlreadyExists(new_id.to_string()));
            }
        }

        let merged = patch.apply(&current);

        if !self.repository.update(id, &merged).await? {
            // deleted between the read and the write
            return Err(CatalogError::NotFound(id.to_string()));
        }

        debug!(video_id = %id, new_video_id = %merged.id, "updated video");
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        debug!(video_id = %id, "deleted video");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use vidshelf_storage::InMemoryRepository;

    fn test_service() -> CatalogService<InMemoryRepository> {
        CatalogService::new(InMemoryRepository::new())
    }

    fn new_video(id: &str, title: &str, video_length: f64) -> NewVideo {
        NewVideo {
            id: id.to_string(),
            title: title.to_string(),
            video_length,
        }
    }

    #[tokio::test]
    async fn create_stamps_upload_time() {
        let service = test_service();
        let before = Timestamp::now();

        let video = service
            .create(new_video("v1", "Intro", 95.0))
            .await
            .unwrap();

        assert_eq!(video.id, "v1");
        assert_eq!(video.title, "Intro");
        assert_eq!(video.video_length, 95.0);
        // truncation to milliseconds can move the stamp just below `before`
        assert!(video.uploaded_at.as_millisecond() >= before.as_millisecond());

        let listed = service.list(None).await.unwrap();
        assert_eq!(listed, vec![video]);
    }

    #[tokio::test]
    async fn create_with_duplicate_id_fails_and_keeps_original() {
        let service = test_service();

        let original = service
            .create(new_video("v1", "First", 60.0))
            .await
            .unwrap();

        let err = service
            .create(new_video("v1", "Second", 90.0))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists(_)));

        let listed = service.list(None).await.unwrap();
        assert_eq!(listed, vec![original]);
    }

    #[tokio::test]
    async fn list_with_query_filters_titles() {
        let service = test_service();

        service
            .create(new_video("v1", "Rust basics", 60.0))
            .await
            .unwrap();
        service
            .create(new_video("v2", "Cooking", 60.0))
            .await
            .unwrap();

        let found = service.list(Some("Rust".to_string())).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v1");

        let all = service.list(Some(String::new())).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn update_nonexistent_fails() {
        let service = test_service();

        let patch = VideoPatch {
            title: Some("Title".to_string()),
            ..Default::default()
        };
        let err = service.update("nope", patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_invalid_fields() {
        let service = test_service();
        service
            .create(new_video("v1", "Intro", 60.0))
            .await
            .unwrap();

        let short_title = VideoPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        let err = service.update("v1", short_title).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let short_length = VideoPatch {
            video_length: Some(29.0),
            ..Default::default()
        };
        let err = service.update("v1", short_length).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let stored = service.list(None).await.unwrap();
        assert_eq!(stored[0].title, "Intro");
        assert_eq!(stored[0].video_length, 60.0);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let service = test_service();
        let created = service
            .create(new_video("v1", "Intro", 60.0))
            .await
            .unwrap();

        let patch = VideoPatch {
            title: Some("Introduction".to_string()),
            ..Default::default()
        };
        let updated = service.update("v1", patch).await.unwrap();

        assert_eq!(updated.title, "Introduction");
        assert_eq!(updated.video_length, created.video_length);
        assert_eq!(updated.uploaded_at, created.uploaded_at);
        assert_eq!(service.list(None).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn update_can_rename_id() {
        let service = test_service();
        service
            .create(new_video("v1", "Intro", 60.0))
            .await
            .unwrap();

        let patch = VideoPatch {
            id: Some("v9".to_string()),
            ..Default::default()
        };
        let updated = service.update("v1", patch).await.unwrap();
        assert_eq!(updated.id, "v9");

        let ids: Vec<String> = service
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, ["v9"]);
    }

    #[tokio::test]
    async fn update_rename_onto_taken_id_fails() {
        let service = test_service();
        service
            .create(new_video("v1", "One", 60.0))
            .await
            .unwrap();
        service
            .create(new_video("v2", "Two", 60.0))
            .await
            .unwrap();

        let patch = VideoPatch {
            id: Some("v2".to_string()),
            ..Default::default()
        };
        let err = service.update("v1", patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn delete_existing_and_nonexistent() {
        let service = test_service();
        service
            .create(new_video("v1", "Intro", 60.0))
            .await
            .unwrap();

        service.delete("v1").await.unwrap();
        assert!(service.list(None).await.unwrap().is_empty());

        let err = service.delete("v1").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
