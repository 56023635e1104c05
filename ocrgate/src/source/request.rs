use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OcrGateError;

use super::UNSUPPORTED_TYPE_MESSAGE;

/// How the caller supplies the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Local file path readable by the server.
    Path,
    /// Remote JPEG or PNG fetched with a GET request.
    Url,
    /// Base64-encoded image bytes.
    Base64,
    /// Uploaded `.jpg` or `.png` file.
    File,
}

impl SourceType {
    /// Name of the request field carrying this source's payload.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Path => "image_path",
            Self::Url => "image_url",
            Self::Base64 => "base64_str",
            Self::File => "file",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Url => "url",
            Self::Base64 => "base64",
            Self::File => "file",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = OcrGateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "url" => Ok(Self::Url),
            "base64" => Ok(Self::Base64),
            "file" => Ok(Self::File),
            _ => Err(OcrGateError::Validation(UNSUPPORTED_TYPE_MESSAGE.to_string())),
        }
    }
}

/// An uploaded file as received from a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A prediction request, independent of the body format it arrived in.
///
/// Only the field matching `source_type` is read; the others are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictRequest {
    pub source_type: String,
    pub image_path: Option<String>,
    pub image_url: Option<String>,
    pub base64_str: Option<String>,
    pub file: Option<UploadedFile>,
}

impl PredictRequest {
    /// Build from the `{type, data}` JSON shape: `data` lands in the field the
    /// type names. An unknown type keeps every payload field empty and is
    /// rejected later during resolution.
    pub fn from_typed_data(source_type: impl Into<String>, data: String) -> Self {
        let mut request = Self {
            source_type: source_type.into(),
            ..Self::default()
        };

        match request.source_type.parse::<SourceType>() {
            Ok(SourceType::Path) => request.image_path = Some(data),
            Ok(SourceType::Url) => request.image_url = Some(data),
            Ok(SourceType::Base64) => request.base64_str = Some(data),
            // Files cannot travel as a JSON string.
            Ok(SourceType::File) | Err(_) => {}
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_type_parses_case_insensitively() {
        assert_eq!("path".parse::<SourceType>().unwrap(), SourceType::Path);
        assert_eq!("URL".parse::<SourceType>().unwrap(), SourceType::Url);
        assert_eq!(" Base64 ".parse::<SourceType>().unwrap(), SourceType::Base64);
        assert_eq!("file".parse::<SourceType>().unwrap(), SourceType::File);
    }

    #[test]
    fn unknown_source_type_is_validation_error() {
        let err = "xml".parse::<SourceType>().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), UNSUPPORTED_TYPE_MESSAGE);
    }

    #[test]
    fn field_names_match_form_fields() {
        assert_eq!(SourceType::Path.field_name(), "image_path");
        assert_eq!(SourceType::Url.field_name(), "image_url");
        assert_eq!(SourceType::Base64.field_name(), "base64_str");
        assert_eq!(SourceType::File.field_name(), "file");
    }

    #[test]
    fn typed_data_routes_into_matching_field() {
        let req = PredictRequest::from_typed_data("url", "http://x/a.png".into());
        assert_eq!(req.image_url.as_deref(), Some("http://x/a.png"));
        assert!(req.image_path.is_none());
        assert!(req.base64_str.is_none());

        let req = PredictRequest::from_typed_data("BASE64", "aGk=".into());
        assert_eq!(req.base64_str.as_deref(), Some("aGk="));
    }

    #[test]
    fn typed_data_with_unknown_type_keeps_fields_empty() {
        let req = PredictRequest::from_typed_data("xml", "<a/>".into());
        assert_eq!(req.source_type, "xml");
        assert_eq!(
            req,
            PredictRequest {
                source_type: "xml".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn uploaded_file_debug_hides_bytes() {
        let file = UploadedFile {
            filename: "photo.jpg".into(),
            bytes: vec![0; 1024],
        };
        let debug = format!("{file:?}");
        assert!(debug.contains("photo.jpg"));
        assert!(debug.contains("1024"));
    }
}
