//! Gesture Recording
//!
//! State machine driven by pointer/touch callbacks. A gesture runs from
//! press to release; on release the raster is read into a [`FeatureVector`]
//! and wiped for the next gesture.

use crate::error::FeatureError;
use crate::features::FeatureVector;
use canvas::{DisplaySurface, GridPoint, PointerInput, StrokeCanvas};
use tracing::{debug, info};

/// Gesture callback delivered by the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Pointer down or touch start
    Start(PointerInput),
    /// Pointer or touch move
    Move(PointerInput),
    /// Pointer up, pointer leaving the surface, or touch end
    End,
}

/// Records one gesture at a time onto a [`StrokeCanvas`]
pub struct GestureRecorder {
    canvas: StrokeCanvas,
    surface: DisplaySurface,
    /// Pointer is down
    is_drawing: bool,
    /// At least one segment was drawn in the current gesture
    has_drawn: bool,
}

impl GestureRecorder {
    /// Create a recorder for a surface displayed at the given size
    pub fn new(surface: DisplaySurface) -> Self {
        Self {
            canvas: StrokeCanvas::new(),
            surface,
            is_drawing: false,
            has_drawn: false,
        }
    }

    /// Begin a gesture at the pressed point
    pub fn start(&mut self, input: &PointerInput) -> Result<(), FeatureError> {
        let point = self.surface.map(input)?;
        self.is_drawing = true;
        self.has_drawn = false;
        self.canvas.begin_path(point);
        debug!("Gesture started at ({:.2}, {:.2})", point.x, point.y);
        Ok(())
    }

    /// Extend the stroke; ignored when no gesture is active.
    ///
    /// A move that maps onto the current pen position draws nothing.
    pub fn draw(&mut self, input: &PointerInput) -> Result<(), FeatureError> {
        if !self.is_drawing {
            return Ok(());
        }
        let point = self.surface.map(input)?;
        if self.canvas.pen() == Some(point) {
            return Ok(());
        }
        self.canvas.line_to(point);
        self.has_drawn = true;
        Ok(())
    }

    /// Finish the gesture.
    ///
    /// Returns the extracted vector when something was drawn, then resets the
    /// raster to white. A tap without movement returns `None` and leaves no
    /// trace.
    pub fn end(&mut self) -> Option<FeatureVector> {
        if !self.is_drawing {
            return None;
        }
        self.is_drawing = false;

        if !self.has_drawn {
            debug!("Gesture ended without movement, nothing to extract");
            return None;
        }

        let vector = FeatureVector::from_canvas(&self.canvas);
        info!(
            "Gesture complete: {} segments, {} inked cells",
            self.canvas.segments(),
            vector.inked()
        );
        self.canvas.clear();
        self.has_drawn = false;
        Some(vector)
    }

    /// Dispatch a single event
    pub fn handle(&mut self, event: &GestureEvent) -> Result<Option<FeatureVector>, FeatureError> {
        match event {
            GestureEvent::Start(input) => self.start(input).map(|_| None),
            GestureEvent::Move(input) => self.draw(input).map(|_| None),
            GestureEvent::End => Ok(self.end()),
        }
    }

    /// Whether a gesture is in progress
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Current raster
    pub fn canvas(&self) -> &StrokeCanvas {
        &self.canvas
    }

    /// Map a raw input with this recorder's surface
    pub fn map(&self, input: &PointerInput) -> Result<GridPoint, FeatureError> {
        Ok(self.surface.map(input)?)
    }
}
