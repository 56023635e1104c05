use crate::api::response::ApiResponse;

/// `GET /ocr/health`
///
/// Answers without touching the engine or the request body.
#[utoipa::path(
    get,
    path = "/ocr/health",
    tag = "OCR",
    summary = "健康检查",
    responses(
        (status = 200, description = "Service is up", body = crate::api::dto::HealthEnvelope),
    )
)]
pub async fn health_check() -> ApiResponse<String> {
    ApiResponse::success("OK".to_string())
}
