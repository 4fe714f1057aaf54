use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::FALLBACK_ERROR_MESSAGE;
use crate::handlers::{
    create_video_handler, delete_video_handler, list_videos_handler, ping_handler,
    update_video_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/ping", get(ping_handler))
            .route(
                "/videos",
                get(list_videos_handler).post(create_video_handler),
            )
            .route(
                "/videos/{id}",
                put(update_video_handler).delete(delete_video_handler),
            )
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_ERROR_MESSAGE).into_response()
}
