use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ocrgate API",
        version = "1.0.0",
        description = "OCR over HTTP. Images by local path, URL, base64 string or upload in; recognized text lines out.",
    ),
    paths(
        handlers::health::health_check,
        handlers::predict::predict,
        handlers::predict::predict_by_file,
    ),
    components(schemas(
        dto::PredictJsonBody,
        dto::PredictFormBody,
        dto::UploadFormBody,
        dto::RecognitionEnvelope,
        dto::HealthEnvelope,
        dto::ErrorEnvelope,
        crate::ocr::TextRegion,
        crate::source::SourceType,
    )),
    tags(
        (name = "OCR", description = "Text recognition"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
