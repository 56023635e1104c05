use leptess::{LepTess, Variable};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::OcrConfig;
use crate::error::{OcrGateError, Result};

use super::types::{ImageInput, RecognitionResult, TextRegion};

/// An OCR engine: text detection, angle classification and recognition.
///
/// Implementations are called from a blocking worker thread and may be
/// invoked concurrently, so they must synchronise internally.
pub trait OcrEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn recognize(&self, input: &ImageInput, classify_angle: bool) -> Result<RecognitionResult>;
}

/// Map PaddleOCR-style language codes onto Tesseract traineddata names.
///
/// Unknown codes pass through untouched so native Tesseract specs such as
/// `eng+chi_sim` keep working.
pub fn tesseract_language(code: &str) -> String {
    let code = code.trim();
    let mapped = match code.to_lowercase().as_str() {
        "ch" | "chinese" => "chi_sim",
        "chinese_cht" | "cht" => "chi_tra",
        "en" | "english" => "eng",
        "japan" | "ja" => "jpn",
        "korean" | "ko" => "kor",
        "french" | "fr" => "fra",
        "german" | "de" => "deu",
        "ru" | "russian" => "rus",
        _ => return code.to_string(),
    };
    mapped.to_string()
}

// Tesseract page segmentation modes.
const PSM_AUTO_OSD: &str = "1";
const PSM_AUTO: &str = "3";

fn page_seg_mode(classify_angle: bool) -> &'static str {
    if classify_angle {
        PSM_AUTO_OSD
    } else {
        PSM_AUTO
    }
}

/// Tesseract reports 0..=100, or -1 when nothing was recognised.
fn scale_confidence(mean_text_conf: i32) -> f32 {
    mean_text_conf.clamp(0, 100) as f32 / 100.0
}

/// Local Tesseract engine via leptess.
///
/// A `LepTess` handle is not thread-safe, so calls are serialised. The lock
/// is taken with `blocking_lock`, so `recognize` must run off the async
/// runtime.
pub struct TesseractEngine {
    tesseract: Mutex<LepTess>,
    language: String,
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let language = tesseract_language(&config.language);
        let tesseract = LepTess::new(config.data_path.as_deref(), &language).map_err(|e| {
            OcrGateError::EngineUnavailable(format!(
                "Failed to initialize Tesseract with language '{language}': {e}"
            ))
        })?;

        Ok(Self {
            tesseract: Mutex::new(tesseract),
            language,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, input: &ImageInput, classify_angle: bool) -> Result<RecognitionResult> {
        let mut lt = self.tesseract.blocking_lock();

        lt.set_variable(Variable::TesseditPagesegMode, page_seg_mode(classify_angle))
            .map_err(|e| OcrGateError::Engine(format!("Failed to set page segmentation: {e}")))?;

        match input {
            ImageInput::Path(path) => lt.set_image(path).map_err(|e| {
                OcrGateError::Engine(format!(
                    "Failed to load image '{}': {e}",
                    path.display()
                ))
            })?,
            ImageInput::Decoded(image) => {
                let png = image.encode_png()?;
                lt.set_image_from_mem(&png)
                    .map_err(|e| OcrGateError::Engine(format!("Failed to set image: {e}")))?
            }
        }

        // No boxes means no text, which is not an error.
        let level = leptess::capi::TessPageIteratorLevel_RIL_TEXTLINE;
        let boxes = match lt.get_component_boxes(level, true) {
            Some(boxes) => boxes,
            None => return Ok(Vec::new()),
        };

        let mut regions = Vec::new();
        for bbox in &boxes {
            let geom = bbox.get_geometry();
            lt.set_rectangle(geom.x, geom.y, geom.w, geom.h);

            let text = lt
                .get_utf8_text()
                .map_err(|e| OcrGateError::Engine(format!("Failed to extract text: {e}")))?
                .trim()
                .to_string();
            if text.is_empty() {
                continue;
            }
            let confidence = scale_confidence(lt.mean_text_conf());

            debug!(
                text = %text,
                confidence,
                x = geom.x,
                y = geom.y,
                w = geom.w,
                h = geom.h,
                "Recognized text line"
            );

            regions.push(TextRegion::from_rect(
                geom.x as f32,
                geom.y as f32,
                geom.w as f32,
                geom.h as f32,
                text,
                confidence,
            ));
        }

        Ok(regions)
    }
}
