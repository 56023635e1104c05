use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;

use crate::api::dto::PredictJsonBody;
use crate::error::{OcrGateError, Result};
use crate::source::{PredictRequest, UploadedFile};

/// `/ocr/predict` body, accepted as JSON `{type, data}` or as a multipart
/// form with `type, image_path, base64_str, image_url, file` fields.
#[derive(Debug)]
pub struct PredictForm(pub PredictRequest);

impl<S> FromRequest<S> for PredictForm
where
    S: Send + Sync,
{
    type Rejection = OcrGateError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(map_multipart_rejection)?;
            return read_predict_form(multipart).await.map(PredictForm);
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<PredictJsonBody>::from_request(req, state)
                .await
                .map_err(map_json_rejection)?;
            return Ok(PredictForm(PredictRequest::from_typed_data(
                body.source_type,
                body.data,
            )));
        }

        Err(OcrGateError::Validation(
            "Content-Type 必须是 application/json 或 multipart/form-data".to_string(),
        ))
    }
}

/// `/ocr/predict-by-file` body: a multipart form with a `file` field.
#[derive(Debug)]
pub struct UploadForm(pub Option<UploadedFile>);

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = OcrGateError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(map_multipart_rejection)?;

        let mut file = None;
        while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
            if field.name() == Some("file") {
                file = Some(read_upload(field).await?);
            }
        }

        Ok(UploadForm(file))
    }
}

async fn read_predict_form(mut multipart: Multipart) -> Result<PredictRequest> {
    let mut request = PredictRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "type" => request.source_type = read_text(field).await?,
            "image_path" => request.image_path = Some(read_text(field).await?),
            "base64_str" => request.base64_str = Some(read_text(field).await?),
            "image_url" => request.image_url = Some(read_text(field).await?),
            "file" => request.file = Some(read_upload(field).await?),
            _ => {}
        }
    }

    Ok(request)
}

async fn read_text(field: Field<'_>) -> Result<String> {
    field.text().await.map_err(map_multipart_error)
}

async fn read_upload(field: Field<'_>) -> Result<UploadedFile> {
    let filename = field.file_name().unwrap_or("").to_string();
    let bytes = field.bytes().await.map_err(map_multipart_error)?;

    Ok(UploadedFile {
        filename,
        bytes: bytes.to_vec(),
    })
}

fn map_multipart_error(err: MultipartError) -> OcrGateError {
    OcrGateError::Validation(format!("无法读取表单: {}", err.body_text()))
}

fn map_multipart_rejection(rejection: MultipartRejection) -> OcrGateError {
    OcrGateError::Validation(format!("无法读取表单: {}", rejection.body_text()))
}

fn map_json_rejection(rejection: JsonRejection) -> OcrGateError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                OcrGateError::Validation(crate::source::missing_field(field))
            } else {
                OcrGateError::Validation(format!("JSON 格式错误: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            OcrGateError::Validation(format!("JSON 语法错误: {}", err.body_text()))
        }
        JsonRejection::BytesRejection(err) => {
            OcrGateError::Validation(format!("无法读取请求体: {}", err.body_text()))
        }
        _ => OcrGateError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_missing_field_name() {
        let msg = "Failed to deserialize the JSON body into the target type: missing field `data` at line 1 column 16";
        assert_eq!(extract_missing_field(msg), Some("data"));
    }

    #[test]
    fn no_missing_field_in_other_errors() {
        assert_eq!(extract_missing_field("invalid type: integer"), None);
    }
}
