use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};
use vidshelf_core::CatalogError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Body sent when a request fails without a usable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error";

/// Errors returned by request handlers.
///
/// Rendered as a plain-text body holding the error message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every catalog rejection is a client error except storage failures.
/// Callers that need a 404 map `CatalogError::NotFound` themselves.
impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Validation(_)
            | CatalogError::NotFound(_)
            | CatalogError::AlreadyExists(_) => AppError::BadRequest(error.to_string()),
            CatalogError::Storage(_) => AppError::Internal(error.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let mut message = self.to_string();
        if message.is_empty() {
            message = FALLBACK_ERROR_MESSAGE.to_string();
        }

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_status_codes() {
        let cases = [
            (CatalogError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (CatalogError::NotFound("v1".into()), StatusCode::BAD_REQUEST),
            (CatalogError::AlreadyExists("v1".into()), StatusCode::BAD_REQUEST),
            (
                CatalogError::Storage("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(AppError::from(error).status(), expected);
        }
    }

    #[tokio::test]
    async fn empty_message_falls_back() {
        use http_body_util::BodyExt;

        let response = AppError::Internal(String::new()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], FALLBACK_ERROR_MESSAGE.as_bytes());
    }
}
