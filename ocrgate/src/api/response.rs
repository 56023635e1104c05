//! # Response Envelope
//!
//! Every endpoint answers with the same three-field envelope:
//!
//! ```json
//! { "resultcode": 200, "message": "Success", "data": [ ... ] }
//! ```
//!
//! `resultcode` mirrors the HTTP status and names the outcome class:
//! 200 success, 400 caller input error, 500 engine or internal failure.
//! Error envelopes carry the message and `"data": null`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::OcrGateError;

pub const SUCCESS_MESSAGE: &str = "Success";

/// Outcome class of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// HTTP 200.
    Success,
    /// Caller-supplied data failed validation. HTTP 400.
    InvalidInput,
    /// Engine, codec, network or internal failure. HTTP 500.
    EngineFailure,
}

impl ResultCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::EngineFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub resultcode: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with the default `"Success"` message.
    pub fn success(data: T) -> Self {
        Self::success_with_message(SUCCESS_MESSAGE, data)
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            resultcode: ResultCode::Success.status().as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(code: ResultCode, message: impl Into<String>) -> Self {
        Self {
            resultcode: code.status().as_u16(),
            message: message.into(),
            data: None,
        }
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.resultcode).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response envelope");
                let code = ResultCode::EngineFailure;
                let body = serde_json::json!({
                    "resultcode": code.status().as_u16(),
                    "message": format!("识别失败: {e}"),
                    "data": null,
                });
                (code.status(), Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<OcrGateError> for ApiResponse<T> {
    /// Validation errors keep their message. Everything else becomes a 500
    /// whose message carries the underlying error text.
    fn from(err: OcrGateError) -> Self {
        match err {
            OcrGateError::Validation(msg) => {
                tracing::debug!(message = %msg, "Rejected invalid input");
                ApiResponse::error(ResultCode::InvalidInput, msg)
            }
            failure => {
                tracing::error!(error = %failure, "Recognition failed");
                ApiResponse::error(ResultCode::EngineFailure, format!("识别失败: {failure}"))
            }
        }
    }
}
