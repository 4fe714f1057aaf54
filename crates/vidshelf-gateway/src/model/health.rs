use serde::Serialize;

#[derive(Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
