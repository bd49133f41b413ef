//! Feature Error Types

use canvas::CanvasError;
use thiserror::Error;

/// Errors during gesture handling or feature decoding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Vector does not have one value per raster cell
    #[error("Feature vector must have {expected} values, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Pointer input could not be mapped onto the raster
    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),
}
