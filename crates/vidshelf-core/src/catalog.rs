use crate::error::CatalogError;
use crate::video::{Video, MIN_TITLE_CHARS, MIN_VIDEO_LENGTH_SECS};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, CatalogError>;

/// Parameters for creating a video.
///
/// The upload timestamp is always assigned by the catalog.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub id: String,
    pub title: String,
    pub video_length: f64,
}

/// A partial update of a stored video.
///
/// `None` fields keep the stored value. Provided fields must pass
/// [`VideoPatch::validate`] before being merged.
#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    /// Renames the video.
    pub id: Option<String>,
    pub title: Option<String>,
    pub video_length: Option<f64>,
}

impl VideoPatch {
    /// Checks the provided fields against the update rules.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = &self.id {
            if id.is_empty() {
                return Err(CatalogError::Validation(
                    "'id' must not be empty".to_string(),
                ));
            }
        }

        if let Some(title) = &self.title {
            if title.chars().count() < MIN_TITLE_CHARS {
                return Err(CatalogError::Validation(format!(
                    "'title' must have at least {} characters",
                    MIN_TITLE_CHARS
                )));
            }
        }

        if let Some(length) = self.video_length {
            // NaN fails this comparison too
            if !(length >= MIN_VIDEO_LENGTH_SECS) {
                return Err(CatalogError::Validation(format!(
                    "'video_length' must be at least {} seconds",
                    MIN_VIDEO_LENGTH_SECS
                )));
            }
        }

        Ok(())
    }

    /// Merges the patch over `current`. The upload timestamp is kept.
    pub fn apply(self, current: &Video) -> Video {
        Video {
            id: self.id.unwrap_or_else(|| current.id.clone()),
            title: self.title.unwrap_or_else(|| current.title.clone()),
            video_length: self.video_length.unwrap_or(current.video_length),
            uploaded_at: current.uploaded_at,
        }
    }
}

/// Business-level operations over the video catalog.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Lists videos, keeping only those whose title contains `query` when
    /// it is set and non-empty.
    async fn list(&self, query: Option<String>) -> Result<Vec<Video>>;

    /// Creates a video stamped with the current server time.
    async fn create(&self, params: NewVideo) -> Result<Video>;

    /// Applies `patch` to the video stored under `id` and returns the
    /// merged record.
    async fn update(&self, id: &str, patch: VideoPatch) -> Result<Video>;

    /// Deletes the video stored under `id`.
    async fn delete(&self, id: &str) -> Result<()>;
}
