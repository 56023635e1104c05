use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::OcrConfig;
use crate::error::{OcrGateError, Result};

use super::engine::{OcrEngine, TesseractEngine};
use super::types::{ImageInput, RecognitionResult};

/// Angle classification is always requested.
const CLASSIFY_ANGLE: bool = true;

#[derive(Clone)]
enum OcrBackend {
    Engine { engine: Arc<dyn OcrEngine> },
    Unavailable { reason: String },
}

/// Process-wide handle to the OCR engine.
///
/// Created once at start-up and shared read-only between requests. If the
/// engine cannot be initialised the provider degrades to an unavailable
/// state and every recognition fails with an engine error.
#[derive(Clone)]
pub struct OcrProvider {
    backend: OcrBackend,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Self {
        let backend = match TesseractEngine::new(config) {
            Ok(engine) => {
                info!(language = %engine.language(), "Tesseract OCR initialized");
                OcrBackend::Engine {
                    engine: Arc::new(engine),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Self { backend }
    }

    /// Wrap an already constructed engine.
    pub fn from_engine(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            backend: OcrBackend::Engine { engine },
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: OcrBackend::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    /// Run the engine once on a blocking worker. No retry, no timeout.
    pub async fn recognize(&self, input: ImageInput) -> Result<RecognitionResult> {
        let engine = match &self.backend {
            OcrBackend::Engine { engine } => Arc::clone(engine),
            OcrBackend::Unavailable { reason } => {
                return Err(OcrGateError::EngineUnavailable(reason.clone()))
            }
        };

        debug!(engine = engine.name(), input = input.kind(), "Running recognition");
        tokio::task::spawn_blocking(move || engine.recognize(&input, CLASSIFY_ANGLE))
            .await
            .map_err(|e| OcrGateError::Engine(format!("OCR task panicked: {e}")))?
    }
}
