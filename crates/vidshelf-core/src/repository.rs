use crate::error::Result;
use crate::video::Video;
use async_trait::async_trait;

/// A read-only view of a video repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Lists stored videos ordered by upload time, then id.
    ///
    /// When `title_filter` is set only videos whose title contains it
    /// are returned.
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Video>>;

    /// Retrieves the video with the given id.
    /// Returns `None` if the id does not exist.
    async fn get(&self, id: &str) -> Result<Option<Video>>;

    /// Checks whether a video with the given id exists.
    async fn exists(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new video. Returns `Err(Conflict)` if the id already exists.
    async fn insert(&self, video: &Video) -> Result<()>;

    /// Overwrites the row stored under `id` with `video`, which may carry a
    /// different id. Returns `true` if a row matched `id`.
    async fn update(&self, id: &str, video: &Video) -> Result<bool>;

    /// Deletes the video with the given id.
    /// Returns `true` if the video existed and was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
