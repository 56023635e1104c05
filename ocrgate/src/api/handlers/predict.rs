//! Recognition handlers.
//!
//! Both endpoints run the same pipeline: resolve the image source, run the
//! engine once, wrap the regions in an [`ApiResponse`] envelope. Validation
//! errors become 400s, everything else a 500.

use axum::extract::State;
use tracing::info;

use crate::api::extractors::{PredictForm, UploadForm};
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::error::Result;
use crate::ocr::RecognitionResult;
use crate::source::{self, PredictRequest, ResolvedImage, SourceType};

async fn run_pipeline(state: &AppState, request: PredictRequest) -> Result<RecognitionResult> {
    let ResolvedImage {
        source: source_type,
        input,
        ..
    } = source::resolve(request, &state.fetcher).await?;
    let regions = state.ocr.recognize(input).await?;

    info!(source = %source_type, regions = regions.len(), "Recognition finished");
    Ok(regions)
}

/// `POST /ocr/predict`
///
/// Unified recognition endpoint. The `type` field selects how the image is
/// supplied:
/// - `path`: local path on the server (`image_path`, or JSON `data`)
/// - `url`: remote JPEG/PNG (`image_url`, or JSON `data`)
/// - `base64`: base64 image bytes (`base64_str`, or JSON `data`)
/// - `file`: multipart upload (`file`), `.jpg` or `.png` only
#[utoipa::path(
    post,
    path = "/ocr/predict",
    tag = "OCR",
    summary = "统一识别接口",
    request_body(content(
        (crate::api::dto::PredictJsonBody = "application/json"),
        (crate::api::dto::PredictFormBody = "multipart/form-data"),
    )),
    responses(
        (status = 200, description = "Recognized text regions", body = crate::api::dto::RecognitionEnvelope),
        (status = 400, description = "Unsupported type, missing field or unsupported image", body = crate::api::dto::ErrorEnvelope),
        (status = 500, description = "Engine, decode or fetch failure", body = crate::api::dto::ErrorEnvelope),
    )
)]
pub async fn predict(
    State(state): State<AppState>,
    PredictForm(request): PredictForm,
) -> ApiResponse<RecognitionResult> {
    match run_pipeline(&state, request).await {
        Ok(regions) => ApiResponse::success(regions),
        Err(e) => e.into(),
    }
}

/// `POST /ocr/predict-by-file`
///
/// Recognize an uploaded `.jpg` or `.png`. On success the envelope's
/// `message` is the uploaded filename.
#[utoipa::path(
    post,
    path = "/ocr/predict-by-file",
    tag = "OCR",
    summary = "识别上传文件",
    request_body(content(
        (crate::api::dto::UploadFormBody = "multipart/form-data"),
    )),
    responses(
        (status = 200, description = "Recognized text regions; message is the filename", body = crate::api::dto::RecognitionEnvelope),
        (status = 400, description = "Missing file or not a .jpg/.png", body = crate::api::dto::ErrorEnvelope),
        (status = 500, description = "Engine or decode failure", body = crate::api::dto::ErrorEnvelope),
    )
)]
pub async fn predict_by_file(
    State(state): State<AppState>,
    UploadForm(file): UploadForm,
) -> ApiResponse<RecognitionResult> {
    let file = match source::required_file(file) {
        Ok(f) => f,
        Err(e) => return e.into(),
    };
    let filename = file.filename.clone();

    let request = PredictRequest {
        source_type: SourceType::File.to_string(),
        file: Some(file),
        ..Default::default()
    };

    match run_pipeline(&state, request).await {
        Ok(regions) => ApiResponse::success_with_message(filename, regions),
        Err(e) => e.into(),
    }
}
