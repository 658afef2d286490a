use crate::codec::CodecError;
use crate::payload::DetectResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inference::InferenceError;
use thiserror::Error;

/// Every way a detection request can fail. All of them map to the same
/// `500 {success: false, error}` response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Decode(#[from] CodecError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Short label used in logs and metric attributes.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Decode(_) => "decode",
            ApiError::Inference(_) => "inference",
            ApiError::Internal(_) => "internal",
        }
    }

    /// Errors pointing at a broken model or a bug rather than a bad request.
    pub fn is_integration_fault(&self) -> bool {
        matches!(
            self,
            ApiError::Inference(InferenceError::OutputShape(_) | InferenceError::UnknownClass(_))
                | ApiError::Internal(_)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DetectResponse::failure(self.to_string())),
        )
            .into_response()
    }
}
