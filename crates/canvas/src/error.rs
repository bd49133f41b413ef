//! Canvas Error Types

use thiserror::Error;

/// Errors raised while mapping input or building a raster
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    /// Display surface has no drawable area
    #[error("Display surface must have a positive size, got {width}x{height}")]
    ZeroSizedSurface { width: f32, height: f32 },

    /// Touch event carried no touch points
    #[error("Touch event has no touch points")]
    NoTouchPoints,

    /// Raster image has the wrong dimensions
    #[error("Raster must be {expected}x{expected}, got {width}x{height}")]
    DimensionMismatch {
        expected: u32,
        width: u32,
        height: u32,
    },
}
