//! OCR (Optical Character Recognition) Module
//!
//! Everything between a resolved image and a list of recognized text lines.
//!
//! # Architecture
//!
//! - `OcrEngine` trait is the seam to the external engine
//! - `TesseractEngine` implements it locally via leptess
//! - `OcrProvider` is the process-wide facade handlers call into; it owns the
//!   engine behind an `Arc` and runs each call on the blocking pool
//! - `decode` turns base64 strings and raw bytes into `DecodedImage`s and
//!   checks JPEG/PNG signatures
//!
//! # Configuration
//!
//! Controlled via `OcrConfig` (see `config.rs`):
//! - `language`: `OCR_LANGUAGE`, PaddleOCR or Tesseract language code
//! - `data_path`: `OCR_DATA_PATH`, Tesseract traineddata directory
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr);
//! let regions = ocr.recognize(ImageInput::Decoded(decode_bytes(&bytes)?)).await?;
//! ```

pub mod decode;
mod engine;
mod provider;
mod types;

pub use decode::{decode_base64, decode_bytes, DecodedImage, ImageSignature};
pub use engine::{tesseract_language, OcrEngine, TesseractEngine};
pub use provider::OcrProvider;
pub use types::{ImageInput, RecognitionResult, TextRegion};
