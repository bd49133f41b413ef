//! Drawing Canvas
//!
//! Provides the logical 28x28 raster that freehand strokes are rendered onto,
//! and the mapping from display-surface pointer/touch coordinates into it.

mod error;
mod raster;
mod surface;

pub use error::CanvasError;
pub use raster::{StrokeCanvas, BACKGROUND, CANVAS_SIZE, INK, STROKE_WIDTH};
pub use surface::{DisplaySurface, GridPoint, PointerInput, TouchPoint};
