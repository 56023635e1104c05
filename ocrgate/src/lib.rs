//! ocrgate: an HTTP front for a single OCR engine.
//!
//! Request flow: `api` parses the body into a [`source::PredictRequest`],
//! [`source::resolve`] validates it and produces an [`ocr::ImageInput`]
//! (fetching or decoding as needed), [`ocr::OcrProvider`] runs the engine,
//! and [`api::response::ApiResponse`] shapes the reply.

pub mod api;
pub mod config;
pub mod error;
pub mod ocr;
pub mod source;
