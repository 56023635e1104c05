use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::response::ApiResponse;

#[derive(Error, Debug)]
pub enum OcrGateError {
    /// Caller-supplied data failed a validation rule. Always a 400.
    #[error("{0}")]
    Validation(String),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl OcrGateError {
    /// Whether the error was caused by the caller's input rather than by the
    /// engine, the codec or the network.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, OcrGateError::Validation(_))
    }
}

impl IntoResponse for OcrGateError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OcrGateError>;
