//! Logical Stroke Raster

use crate::error::CanvasError;
use crate::surface::GridPoint;
use image::{Rgb, RgbImage};
use tracing::trace;

/// Width and height of the logical raster
pub const CANVAS_SIZE: u32 = 28;

/// Stroke width in logical pixels
pub const STROKE_WIDTH: f32 = 2.0;

/// Background color
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Stroke color
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Fixed-size drawing raster.
///
/// Strokes are accumulated as a polyline: `begin_path` sets the pen position
/// and each `line_to` renders one round-capped segment from the pen to the new
/// point. Several strokes inside one gesture simply keep extending the path.
#[derive(Debug, Clone)]
pub struct StrokeCanvas {
    image: RgbImage,
    pen: Option<GridPoint>,
    segments: usize,
}

impl StrokeCanvas {
    /// Create an all-white canvas
    pub fn new() -> Self {
        Self {
            image: RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, BACKGROUND),
            pen: None,
            segments: 0,
        }
    }

    /// Wrap an existing 28x28 image
    pub fn from_image(image: RgbImage) -> Result<Self, CanvasError> {
        if image.width() != CANVAS_SIZE || image.height() != CANVAS_SIZE {
            return Err(CanvasError::DimensionMismatch {
                expected: CANVAS_SIZE,
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(Self {
            image,
            pen: None,
            segments: 0,
        })
    }

    /// Reset to an all-white background and drop the current path
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BACKGROUND;
        }
        self.pen = None;
        self.segments = 0;
    }

    /// Start a new path at `at` without drawing
    pub fn begin_path(&mut self, at: GridPoint) {
        self.pen = Some(at);
    }

    /// Extend the path to `to`, rendering the segment.
    ///
    /// Without a current pen position this only moves the pen.
    pub fn line_to(&mut self, to: GridPoint) {
        if let Some(from) = self.pen {
            self.stroke_segment(from, to);
            self.segments += 1;
        }
        self.pen = Some(to);
    }

    /// Number of segments rendered since the last clear
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Current pen position
    pub fn pen(&self) -> Option<GridPoint> {
        self.pen
    }

    /// RGB value at `(x, y)`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= CANVAS_SIZE || y >= CANVAS_SIZE {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    /// Underlying raster
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Ink every cell whose center lies within half the stroke width of the
    /// segment. Round caps fall out of the distance test at the endpoints.
    fn stroke_segment(&mut self, from: GridPoint, to: GridPoint) {
        let radius = STROKE_WIDTH / 2.0;
        trace!("Stroke ({:.2}, {:.2}) -> ({:.2}, {:.2})", from.x, from.y, to.x, to.y);

        let (x_start, x_end) = covered_cells(from.x, to.x, radius);
        let (y_start, y_end) = covered_cells(from.y, to.y, radius);
        for y in y_start..y_end {
            for x in x_start..x_end {
                let center = GridPoint::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, from, to) <= radius {
                    self.image.put_pixel(x, y, INK);
                }
            }
        }
    }
}

/// Cells `[start, end)` along one axis that a stroke from `a` to `b` can reach,
/// clipped to the raster
fn covered_cells(a: f32, b: f32, radius: f32) -> (u32, u32) {
    let size = CANVAS_SIZE as f32;
    let start = (a.min(b) - radius - 0.5).floor().clamp(0.0, size);
    let end = (a.max(b) + radius + 0.5).ceil().clamp(0.0, size);
    (start as u32, end as u32)
}

fn distance_to_segment(p: GridPoint, a: GridPoint, b: GridPoint) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq <= f32::EPSILON {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (ex, ey) = (p.x - (a.x + t * dx), p.y - (a.y + t * dy));
    (ex * ex + ey * ey).sqrt()
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inked_cells(canvas: &StrokeCanvas) -> usize {
        canvas.image().pixels().filter(|p| **p != BACKGROUND).count()
    }

    #[test]
    fn test_new_canvas_is_white() {
        let canvas = StrokeCanvas::new();
        assert_eq!(canvas.image().dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        assert_eq!(inked_cells(&canvas), 0);
        assert_eq!(canvas.segments(), 0);
    }

    #[test]
    fn test_line_to_draws_segment() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(4.0, 14.0));
        canvas.line_to(GridPoint::new(24.0, 14.0));

        assert_eq!(canvas.segments(), 1);
        assert_eq!(canvas.pixel(14, 14), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(4, 14), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(24, 14), Some([0, 0, 0]));
        // Far from the stroke stays white
        assert_eq!(canvas.pixel(14, 2), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(14, 26), Some([255, 255, 255]));
    }

    fn inked_in_column(canvas: &StrokeCanvas, x: u32) -> Vec<u32> {
        (0..CANVAS_SIZE)
            .filter(|&y| canvas.pixel(x, y) == Some([0, 0, 0]))
            .collect()
    }

    fn inked_in_row(canvas: &StrokeCanvas, y: u32) -> Vec<u32> {
        (0..CANVAS_SIZE)
            .filter(|&x| canvas.pixel(x, y) == Some([0, 0, 0]))
            .collect()
    }

    #[test]
    fn test_horizontal_stroke_is_two_cells_wide() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(4.0, 14.0));
        canvas.line_to(GridPoint::new(24.0, 14.0));

        assert_eq!(inked_in_column(&canvas, 14), vec![13, 14]);
        // round caps reach half a width past each end
        assert_eq!(inked_in_row(&canvas, 14), (3..=24).collect::<Vec<_>>());
        assert_eq!(inked_in_row(&canvas, 13), (3..=24).collect::<Vec<_>>());
        assert_eq!(inked_cells(&canvas), 2 * 22);
    }

    #[test]
    fn test_vertical_stroke_is_two_cells_wide() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(14.0, 4.0));
        canvas.line_to(GridPoint::new(14.0, 24.0));

        assert_eq!(inked_in_row(&canvas, 14), vec![13, 14]);
        assert_eq!(inked_in_column(&canvas, 14), (3..=24).collect::<Vec<_>>());
    }

    #[test]
    fn test_huge_coordinates_stay_on_raster() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(14.0, 14.0));
        canvas.line_to(GridPoint::new(3.0e9, 14.0));
        canvas.line_to(GridPoint::new(-3.0e9, -3.0e9));

        assert_eq!(canvas.segments(), 2);
        assert_eq!(inked_in_column(&canvas, 27), vec![13, 14]);
    }

    #[test]
    fn test_line_to_without_pen_only_moves() {
        let mut canvas = StrokeCanvas::new();
        canvas.line_to(GridPoint::new(10.0, 10.0));
        assert_eq!(canvas.segments(), 0);
        assert_eq!(inked_cells(&canvas), 0);
        assert_eq!(canvas.pen(), Some(GridPoint::new(10.0, 10.0)));
    }

    #[test]
    fn test_polyline_accumulates() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(5.0, 5.0));
        canvas.line_to(GridPoint::new(20.0, 5.0));
        canvas.line_to(GridPoint::new(20.0, 20.0));
        canvas.line_to(GridPoint::new(5.0, 20.0));

        assert_eq!(canvas.segments(), 3);
        assert_eq!(canvas.pixel(12, 5), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(20, 12), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(12, 20), Some([0, 0, 0]));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(5.0, 5.0));
        canvas.line_to(GridPoint::new(20.0, 20.0));
        assert!(inked_cells(&canvas) > 0);

        canvas.clear();
        assert_eq!(inked_cells(&canvas), 0);
        assert_eq!(canvas.segments(), 0);
        assert_eq!(canvas.pen(), None);
    }

    #[test]
    fn test_strokes_off_edge_are_clipped() {
        let mut canvas = StrokeCanvas::new();
        canvas.begin_path(GridPoint::new(-5.0, 14.0));
        canvas.line_to(GridPoint::new(40.0, 14.0));
        assert_eq!(canvas.pixel(0, 14), Some([0, 0, 0]));
        assert_eq!(canvas.pixel(27, 14), Some([0, 0, 0]));
    }

    #[test]
    fn test_from_image_checks_dimensions() {
        assert!(StrokeCanvas::from_image(RgbImage::new(28, 28)).is_ok());
        assert_eq!(
            StrokeCanvas::from_image(RgbImage::new(28, 10)).unwrap_err(),
            CanvasError::DimensionMismatch {
                expected: 28,
                width: 28,
                height: 10
            }
        );
    }
}
