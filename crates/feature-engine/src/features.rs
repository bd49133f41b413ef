//! Feature Vector Extraction

use crate::error::FeatureError;
use canvas::{StrokeCanvas, CANVAS_SIZE};
use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of features in the vector (one per raster cell)
pub const FEATURE_DIMENSION: usize = (CANVAS_SIZE * CANVAS_SIZE) as usize;

/// Weighted luma: 0.299*R + 0.587*G + 0.114*B, rounded half up
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(f64::from);
    (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8
}

/// Ink intensity of a pixel: 0 for white background, 255 for solid black
pub fn inverted_luma(rgb: [u8; 3]) -> u8 {
    255 - luma(rgb)
}

/// Row-major ink intensities over the 28x28 raster.
///
/// Always exactly [`FEATURE_DIMENSION`] values; serializes as a plain JSON
/// array of integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct FeatureVector {
    values: Vec<u8>,
}

impl FeatureVector {
    /// Read every raster cell of a canvas
    pub fn from_canvas(canvas: &StrokeCanvas) -> Self {
        Self::from_raster(canvas.image())
    }

    /// Read a saved drawing; the image must already be raster sized
    pub fn from_image(image: RgbImage) -> Result<Self, FeatureError> {
        Ok(Self::from_canvas(&StrokeCanvas::from_image(image)?))
    }

    fn from_raster(image: &RgbImage) -> Self {
        // `pixels()` walks rows top to bottom, left to right
        let values: Vec<u8> = image.pixels().map(|p| inverted_luma(p.0)).collect();
        debug!(
            "Extracted feature vector: {} values, {} inked",
            values.len(),
            values.iter().filter(|&&v| v > 0).count()
        );
        Self { values }
    }

    /// All values in row-major order
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Value at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        let size = CANVAS_SIZE as usize;
        if row >= size || col >= size {
            return None;
        }
        self.values.get(row * size + col).copied()
    }

    /// Number of non-background cells
    pub fn inked(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0).count()
    }

    /// Inputs as the classifier consumes them: `v / 255 * 0.99 + 0.01`
    pub fn scaled_inputs(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|&v| f64::from(v) / 255.0 * 0.99 + 0.01)
            .collect()
    }

    /// Render back to a grayscale thumbnail, value used directly as gray level
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(CANVAS_SIZE, CANVAS_SIZE, |x, y| {
            Luma([self.values[(y * CANVAS_SIZE + x) as usize]])
        })
    }
}

impl TryFrom<Vec<u8>> for FeatureVector {
    type Error = FeatureError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        if values.len() != FEATURE_DIMENSION {
            return Err(FeatureError::InvalidLength {
                expected: FEATURE_DIMENSION,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }
}

impl From<FeatureVector> for Vec<u8> {
    fn from(vector: FeatureVector) -> Self {
        vector.values
    }
}
