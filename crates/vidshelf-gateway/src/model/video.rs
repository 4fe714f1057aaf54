use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use vidshelf_core::{NewVideo, Video, VideoPatch};

#[derive(Debug, Deserialize)]
pub struct ListVideosQuery {
    /// Title substring filter.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub id: String,
    pub title: String,
    pub video_length: f64,
    /// Required for compatibility, replaced by the server time.
    pub uploaded_at: String,
}

impl From<CreateVideoRequest> for NewVideo {
    fn from(request: CreateVideoRequest) -> Self {
        NewVideo {
            id: request.id,
            title: request.title,
            video_length: request.video_length,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVideoRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub video_length: Option<f64>,
}

impl From<UpdateVideoRequest> for VideoPatch {
    fn from(request: UpdateVideoRequest) -> Self {
        VideoPatch {
            id: request.id,
            title: request.title,
            video_length: request.video_length,
        }
    }
}

#[derive(Serialize)]
pub struct CreateVideoResponse {
    pub message: &'static str,
    pub video: Video,
}

/// A video rendered with the persisted column names.
#[derive(Debug, Serialize)]
pub struct VideoRow {
    pub id: String,
    pub title: String,
    pub video_length: f64,
    pub uploaded_at: Timestamp,
}

impl From<Video> for VideoRow {
    fn from(video: Video) -> Self {
        VideoRow {
            id: video.id,
            title: video.title,
            video_length: video.video_length,
            uploaded_at: video.uploaded_at,
        }
    }
}

/// Unlike the other responses, the updated record uses row keys.
#[derive(Serialize)]
pub struct UpdateVideoResponse {
    pub message: &'static str,
    #[serde(rename = "Video")]
    pub video: VideoRow,
}
