use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::decode::DecodedImage;

/// A single recognized line of text.
///
/// `bounding_box` holds four `[x, y]` points, clockwise from the top-left
/// corner, in pixel coordinates of the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextRegion {
    #[schema(value_type = Vec<Vec<f32>>)]
    pub bounding_box: [[f32; 2]; 4],
    pub text: String,
    pub confidence: f32,
}

impl TextRegion {
    /// Build a region from an axis-aligned rectangle.
    pub fn from_rect(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        confidence: f32,
    ) -> Self {
        Self {
            bounding_box: [
                [x, y],
                [x + width, y],
                [x + width, y + height],
                [x, y + height],
            ],
            text,
            confidence,
        }
    }

    pub fn within(&self, width: u32, height: u32) -> bool {
        let (w, h) = (width as f32, height as f32);
        self.bounding_box
            .iter()
            .all(|[x, y]| (0.0..=w).contains(x) && (0.0..=h).contains(y))
    }
}

/// Ordered engine output, passed to the caller unmodified.
pub type RecognitionResult = Vec<TextRegion>;

/// What the engine is asked to read.
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Local file, handed to the engine as-is.
    Path(PathBuf),
    Decoded(DecodedImage),
}

impl ImageInput {
    pub fn kind(&self) -> &'static str {
        match self {
            ImageInput::Path(_) => "path",
            ImageInput::Decoded(_) => "decoded",
        }
    }
}
