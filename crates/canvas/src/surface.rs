//! Display Surface Coordinate Mapping

use crate::error::CanvasError;
use crate::raster::CANVAS_SIZE;
use serde::{Deserialize, Serialize};

/// Point in logical raster space (continuous, 0.0..=28.0 on each axis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f32,
    pub y: f32,
}

impl GridPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Raster cell containing this point as `(column, row)`, clamped to the grid
    pub fn cell(&self) -> (u32, u32) {
        let max = (CANVAS_SIZE - 1) as f32;
        (
            self.x.floor().clamp(0.0, max) as u32,
            self.y.floor().clamp(0.0, max) as u32,
        )
    }
}

/// One finger position reported by a touch event, in client (page) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Raw pointer input from either of the two event sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PointerInput {
    /// Mouse event, coordinates relative to the surface's top-left corner
    Mouse { offset_x: f32, offset_y: f32 },
    /// Touch event; only the first touch point is used
    Touch { touches: Vec<TouchPoint> },
}

impl PointerInput {
    pub fn mouse(offset_x: f32, offset_y: f32) -> Self {
        PointerInput::Mouse { offset_x, offset_y }
    }

    pub fn touch(client_x: f32, client_y: f32) -> Self {
        PointerInput::Touch {
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }
}

/// On-screen rectangle the logical raster is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySurface {
    /// Left edge in client coordinates
    pub left: f32,
    /// Top edge in client coordinates
    pub top: f32,
    /// Displayed width in pixels
    pub width: f32,
    /// Displayed height in pixels
    pub height: f32,
}

impl DisplaySurface {
    /// Create a surface, rejecting zero or negative sizes
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, CanvasError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(CanvasError::ZeroSizedSurface { width, height });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// Square surface anchored at the client origin
    pub fn square(size: f32) -> Result<Self, CanvasError> {
        Self::new(0.0, 0.0, size, size)
    }

    /// Map a surface-relative offset into raster space
    pub fn map_offset(&self, offset_x: f32, offset_y: f32) -> GridPoint {
        // Multiply before dividing so the exact center lands on 14.0
        let logical = CANVAS_SIZE as f32;
        GridPoint::new(
            offset_x * logical / self.width,
            offset_y * logical / self.height,
        )
    }

    /// Map a client (page) coordinate into raster space
    pub fn map_client(&self, client_x: f32, client_y: f32) -> GridPoint {
        self.map_offset(client_x - self.left, client_y - self.top)
    }

    /// Normalize mouse or touch input into one raster coordinate
    pub fn map(&self, input: &PointerInput) -> Result<GridPoint, CanvasError> {
        match input {
            PointerInput::Mouse { offset_x, offset_y } => Ok(self.map_offset(*offset_x, *offset_y)),
            PointerInput::Touch { touches } => {
                let first = touches.first().ok_or(CanvasError::NoTouchPoints)?;
                Ok(self.map_client(first.client_x, first.client_y))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_maps_to_middle_cell() {
        for size in [28.0, 100.0, 280.0, 333.0, 1024.0] {
            let surface = DisplaySurface::square(size).unwrap();
            let point = surface.map_offset(size / 2.0, size / 2.0);
            assert_eq!(point.cell(), (14, 14), "size {}", size);
        }
    }

    #[test]
    fn test_axes_scale_independently() {
        let surface = DisplaySurface::new(0.0, 0.0, 280.0, 56.0).unwrap();
        let point = surface.map_offset(140.0, 14.0);
        assert!((point.x - 14.0).abs() < 1e-4);
        assert!((point.y - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_touch_and_mouse_agree() {
        let surface = DisplaySurface::new(40.0, 120.0, 280.0, 280.0).unwrap();
        let mouse = surface.map(&PointerInput::mouse(70.0, 210.0)).unwrap();
        let touch = surface.map(&PointerInput::touch(110.0, 330.0)).unwrap();
        assert_eq!(mouse, touch);
        assert_eq!(mouse.cell(), (7, 21));
    }

    #[test]
    fn test_touch_without_points() {
        let surface = DisplaySurface::square(280.0).unwrap();
        let input = PointerInput::Touch { touches: vec![] };
        assert_eq!(surface.map(&input), Err(CanvasError::NoTouchPoints));
    }

    #[test]
    fn test_zero_sized_surface_rejected() {
        assert!(DisplaySurface::square(0.0).is_err());
        assert!(DisplaySurface::new(0.0, 0.0, 280.0, -1.0).is_err());
        assert!(DisplaySurface::new(0.0, 0.0, f32::NAN, 10.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_points_on_surface_land_in_grid(
            width in 1.0f32..4000.0,
            height in 1.0f32..4000.0,
            fx in 0.0f32..1.0,
            fy in 0.0f32..1.0,
        ) {
            let surface = DisplaySurface::new(0.0, 0.0, width, height).unwrap();
            let point = surface.map_offset(fx * width, fy * height);
            prop_assert!(point.x >= 0.0 && point.x <= CANVAS_SIZE as f32 + 1e-3);
            prop_assert!(point.y >= 0.0 && point.y <= CANVAS_SIZE as f32 + 1e-3);
            let (col, row) = point.cell();
            prop_assert!(col < CANVAS_SIZE && row < CANVAS_SIZE);
        }
    }
}
