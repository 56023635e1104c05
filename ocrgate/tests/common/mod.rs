// Common test utilities for integration tests
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Once;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use ocrgate::api::{create_router, AppState};
use ocrgate::config::{Config, OcrConfig, ServerConfig, DEFAULT_MAX_BODY_BYTES};
use ocrgate::error::{OcrGateError, Result};
use ocrgate::ocr::{ImageInput, OcrEngine, OcrProvider, RecognitionResult, TextRegion};
use ocrgate::source::RemoteFetcher;

pub use tempfile;
pub use wiremock;

static INIT: Once = Once::new();

pub const BOUNDARY: &str = "----ocrgate-test-boundary";

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Engine stand-in: one region covering the whole decoded image, or a fixed
/// box for path inputs.
pub struct FakeEngine;

impl OcrEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn recognize(&self, input: &ImageInput, _classify_angle: bool) -> Result<RecognitionResult> {
        let region = match input {
            ImageInput::Path(path) => TextRegion::from_rect(
                0.0,
                0.0,
                10.0,
                10.0,
                path.display().to_string(),
                0.9,
            ),
            ImageInput::Decoded(image) => TextRegion::from_rect(
                0.0,
                0.0,
                image.width() as f32,
                image.height() as f32,
                "hello".to_string(),
                0.99,
            ),
        };
        Ok(vec![region])
    }
}

/// Engine stand-in that always fails.
pub struct FailingEngine;

impl OcrEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn recognize(&self, _input: &ImageInput, _classify_angle: bool) -> Result<RecognitionResult> {
        Err(OcrGateError::Engine("model exploded".to_string()))
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        },
        ocr: OcrConfig::default(),
    }
}

pub fn app_with(ocr: OcrProvider) -> axum::Router {
    init_test_logger();
    let fetcher = RemoteFetcher::new(DEFAULT_MAX_BODY_BYTES).expect("http client");
    create_router(AppState::new(test_config(), ocr, fetcher))
}

pub fn app() -> axum::Router {
    app_with(OcrProvider::from_engine(std::sync::Arc::new(FakeEngine)))
}

pub fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode fixture image");
    buf
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
