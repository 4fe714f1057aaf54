use crate::error::{AppError, Result};
use crate::model::{
    CreateVideoRequest, CreateVideoResponse, ListVideosQuery, UpdateVideoRequest,
    UpdateVideoResponse,
};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;
use vidshelf_core::{CatalogError, Video};

pub async fn list_videos_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListVideosQuery>, QueryRejection>,
) -> Result<Json<Vec<Video>>> {
    let Query(query) = query?;
    let videos = state.catalog().list(query.q).await?;
    Ok(Json(videos))
}

pub async fn create_video_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Json<CreateVideoResponse>> {
    let Json(request) = payload?;
    debug!(
        video_id = %request.id,
        client_uploaded_at = %request.uploaded_at,
        "client upload timestamp replaced by server time"
    );

    let video = state.catalog().create(request.into()).await?;

    Ok(Json(CreateVideoResponse {
        message: "Video created successfully",
        video,
    }))
}

pub async fn update_video_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> Result<Json<UpdateVideoResponse>> {
    let Json(request) = payload?;
    let video = state.catalog().update(&id, request.into()).await?;

    Ok(Json(UpdateVideoResponse {
        message: "Video updated successfully",
        video: video.into(),
    }))
}

pub async fn delete_video_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<String> {
    state
        .catalog()
        .delete(&id)
        .await
        .map_err(|error| match error {
            CatalogError::NotFound(_) => AppError::NotFound(error.to_string()),
            other => other.into(),
        })?;

    Ok(format!("Video with id '{}' deleted successfully", id))
}
