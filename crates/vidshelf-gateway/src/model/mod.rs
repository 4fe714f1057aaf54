mod health;
mod video;

pub use health::PingResponse;
pub use video::{
    CreateVideoRequest, CreateVideoResponse, ListVideosQuery, UpdateVideoRequest,
    UpdateVideoResponse, VideoRow,
};
