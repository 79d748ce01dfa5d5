use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hwl_worklist::WorklistError;
use serde_json::json;
use thiserror::Error;

/// Failures while configuring or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] hwl_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Failure of a single request, rendered as `{"status": code, "message": msg}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Worklist(#[from] WorklistError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Worklist(WorklistError::BadRequest(_)) | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Worklist(WorklistError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Worklist(WorklistError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Worklist(WorklistError::BackendFailure { .. }) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Worklist(err) => err.message().to_string(),
            Self::InvalidBody(_) => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Worklist(err @ WorklistError::BackendFailure { .. }) = &self {
            tracing::error!(error = %err, "request failed in the backend");
        }
        let body = Json(json!({
            "status": status.as_u16(),
            "message": self.message(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
