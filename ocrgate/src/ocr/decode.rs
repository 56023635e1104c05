use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};

use crate::error::{OcrGateError, Result};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Image formats accepted from remote sources, identified by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSignature {
    Jpeg,
    Png,
}

impl ImageSignature {
    /// Inspect the leading bytes of a buffer.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(JPEG_MAGIC) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(Self::Png)
        } else {
            None
        }
    }

    pub fn format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

/// An in-memory, 3-channel RGB pixel array.
///
/// Lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    image: RgbImage,
}

impl DecodedImage {
    pub const CHANNELS: u8 = 3;

    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn channels(&self) -> u8 {
        Self::CHANNELS
    }

    /// Row-major `width * height * channels` pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    /// Re-encode as PNG for engines that only accept encoded image data.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.image
            .write_to(&mut std::io::Cursor::new(&mut output), ImageFormat::Png)
            .map_err(|e| OcrGateError::Decode(format!("Failed to encode image: {e}")))?;
        Ok(output)
    }
}

/// Decode raw image bytes (JPEG, PNG, or anything else the codec recognises).
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.is_empty() {
        return Err(OcrGateError::Decode("Image data is empty".to_string()));
    }

    let reader = ImageReader::new(std::io::Cursor::new(bytes));
    let reader = match ImageSignature::sniff(bytes) {
        Some(signature) => {
            let mut reader = reader;
            reader.set_format(signature.format());
            reader
        }
        None => reader
            .with_guessed_format()
            .map_err(|e| OcrGateError::Decode(format!("Failed to read image: {e}")))?,
    };

    let img = reader
        .decode()
        .map_err(|e| OcrGateError::Decode(format!("Failed to decode image: {e}")))?;

    Ok(DecodedImage::from_rgb(to_rgb(img)))
}

/// Decode a base64 string into an image.
///
/// A `data:image/...;base64,` prefix and embedded whitespace are tolerated.
/// A string that is not valid base64 is the caller's fault and yields a
/// validation error; valid base64 that is not an image is a decode error.
pub fn decode_base64(encoded: &str) -> Result<DecodedImage> {
    let bytes = decode_base64_payload(encoded)?;
    decode_bytes(&bytes)
}

fn decode_base64_payload(encoded: &str) -> Result<Vec<u8>> {
    let payload = strip_data_url_prefix(encoded.trim());
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return Err(OcrGateError::Validation("缺少必填字段: base64_str".to_string()));
    }

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| OcrGateError::Validation(format!("base64 解码失败: {e}")))
}

fn strip_data_url_prefix(value: &str) -> &str {
    if value.starts_with("data:") {
        if let Some((_, rest)) = value.split_once(";base64,") {
            return rest;
        }
    }
    value
}

fn to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}
