//! Request bodies and documentation-only envelope shapes.

use serde::{Deserialize, Serialize};

use crate::ocr::TextRegion;

/// JSON body for `POST /ocr/predict`.
///
/// ```json
/// { "type": "url", "data": "https://example.com/receipt.jpg" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PredictJsonBody {
    /// One of `path`, `url`, `base64`. Case-insensitive.
    #[serde(rename = "type")]
    pub source_type: String,
    /// Local path, image URL or base64 string, depending on `type`.
    pub data: String,
}

/// Multipart form accepted by `POST /ocr/predict`.
///
/// Only the field matching `type` is read.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PredictFormBody {
    /// One of `path`, `url`, `base64`, `file`.
    #[serde(rename = "type")]
    pub source_type: String,
    pub image_path: Option<String>,
    pub base64_str: Option<String>,
    pub image_url: Option<String>,
    /// `.jpg` or `.png` upload.
    #[schema(value_type = Option<String>, format = Binary)]
    pub file: Option<Vec<u8>>,
}

/// Multipart form accepted by `POST /ocr/predict-by-file`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadFormBody {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Envelope returned by the recognition endpoints on success.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RecognitionEnvelope {
    #[schema(example = 200)]
    pub resultcode: u16,
    /// `"Success"`, or the uploaded filename for `/ocr/predict-by-file`.
    pub message: String,
    pub data: Vec<TextRegion>,
}

/// Envelope returned by `GET /ocr/health`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthEnvelope {
    #[schema(example = 200)]
    pub resultcode: u16,
    #[schema(example = "Success")]
    pub message: String,
    #[schema(example = "OK")]
    pub data: String,
}

/// Envelope returned on failure. `resultcode` is 400 for invalid input and
/// 500 for engine failures.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = 400)]
    pub resultcode: u16,
    #[schema(example = "请上传 .jpg 或 .png 格式图片")]
    pub message: String,
    #[schema(value_type = Option<String>)]
    pub data: Option<()>,
}
