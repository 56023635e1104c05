use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::{OcrGateError, Result};
use crate::ocr::{decode_base64, decode_bytes, ImageInput};

use super::fetcher::RemoteFetcher;
use super::request::{PredictRequest, SourceType, UploadedFile};
use super::{missing_field, UNSUPPORTED_IMAGE_MESSAGE};

/// A request after validation, ready for recognition.
#[derive(Debug)]
pub struct ResolvedImage {
    pub source: SourceType,
    pub input: ImageInput,
    /// Upload filename for the `file` source.
    pub filename: Option<String>,
}

/// Upload filenames must end in `.jpg` or `.png`. The check is case-sensitive.
pub fn has_image_extension(filename: &str) -> bool {
    filename.ends_with(".jpg") || filename.ends_with(".png")
}

/// Parse an absolute `http`/`https` URL.
pub fn parse_image_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| OcrGateError::Validation(format!("image_url 不是合法的 URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(OcrGateError::Validation(format!(
            "image_url 只支持 http 或 https, 收到: {scheme}"
        ))),
    }
}

/// Validate a request and produce an engine input.
///
/// Validation problems surface as `OcrGateError::Validation`; fetch and
/// decode failures keep their own variants.
pub async fn resolve(request: PredictRequest, fetcher: &RemoteFetcher) -> Result<ResolvedImage> {
    if request.source_type.trim().is_empty() {
        return Err(OcrGateError::Validation(missing_field("type")));
    }
    let source: SourceType = request.source_type.parse()?;
    debug!(source = %source, "Resolving image source");

    let resolved = match source {
        SourceType::Path => {
            let path = required_text(request.image_path, source)?;
            ResolvedImage {
                source,
                input: ImageInput::Path(PathBuf::from(path)),
                filename: None,
            }
        }
        SourceType::Base64 => {
            let encoded = required_text(request.base64_str, source)?;
            ResolvedImage {
                source,
                input: ImageInput::Decoded(decode_base64(&encoded)?),
                filename: None,
            }
        }
        SourceType::Url => {
            let raw = required_text(request.image_url, source)?;
            let url = parse_image_url(&raw)?;
            ResolvedImage {
                source,
                input: ImageInput::Decoded(fetcher.fetch(&url).await?),
                filename: None,
            }
        }
        SourceType::File => {
            let file = required_file(request.file)?;
            let image = decode_bytes(&file.bytes)?;
            ResolvedImage {
                source,
                input: ImageInput::Decoded(image),
                filename: Some(file.filename),
            }
        }
    };

    Ok(resolved)
}

fn required_text(value: Option<String>, source: SourceType) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(OcrGateError::Validation(missing_field(source.field_name()))),
    }
}

/// Validate an upload: present, non-empty and named `*.jpg` / `*.png`.
pub(crate) fn required_file(file: Option<UploadedFile>) -> Result<UploadedFile> {
    let file = match file {
        Some(f) if !f.bytes.is_empty() => f,
        _ => {
            return Err(OcrGateError::Validation(missing_field(
                SourceType::File.field_name(),
            )))
        }
    };

    if !has_image_extension(&file.filename) {
        return Err(OcrGateError::Validation(UNSUPPORTED_IMAGE_MESSAGE.to_string()));
    }

    Ok(file)
}
