use crate::model::PingResponse;
use axum::Json;

pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { message: "Pong!" })
}
