//! Recorded Gesture Files
//!
//! JSON capture of the raw pointer/touch callbacks a browser canvas delivers.

use anyhow::{Context, Result};
use canvas::{DisplaySurface, PointerInput, TouchPoint};
use feature_engine::GestureEvent;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One raw UI callback
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordedEvent {
    MouseDown { offset_x: f32, offset_y: f32 },
    MouseMove { offset_x: f32, offset_y: f32 },
    MouseUp,
    MouseLeave,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
}

impl RecordedEvent {
    /// Collapse both event sources into recorder callbacks
    pub fn to_gesture_event(&self) -> GestureEvent {
        match self {
            RecordedEvent::MouseDown { offset_x, offset_y } => {
                GestureEvent::Start(PointerInput::mouse(*offset_x, *offset_y))
            }
            RecordedEvent::MouseMove { offset_x, offset_y } => {
                GestureEvent::Move(PointerInput::mouse(*offset_x, *offset_y))
            }
            RecordedEvent::TouchStart { touches } => GestureEvent::Start(PointerInput::Touch {
                touches: touches.clone(),
            }),
            RecordedEvent::TouchMove { touches } => GestureEvent::Move(PointerInput::Touch {
                touches: touches.clone(),
            }),
            RecordedEvent::MouseUp | RecordedEvent::MouseLeave | RecordedEvent::TouchEnd => {
                GestureEvent::End
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct SurfaceSpec {
    #[serde(default)]
    left: f32,
    #[serde(default)]
    top: f32,
    width: f32,
    height: f32,
}

/// A recorded session: optional surface geometry plus the event stream
#[derive(Debug, Clone, Deserialize)]
pub struct GestureFile {
    #[serde(default)]
    surface: Option<SurfaceSpec>,
    pub events: Vec<RecordedEvent>,
}

impl GestureFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading gesture file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing gesture file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Surface from the file, or a `fallback_width` x `fallback_height` one at the origin
    pub fn surface(&self, fallback_width: f32, fallback_height: f32) -> Result<DisplaySurface> {
        let surface = match self.surface {
            Some(s) => DisplaySurface::new(s.left, s.top, s.width, s.height)?,
            None => DisplaySurface::new(0.0, 0.0, fallback_width, fallback_height)?,
        };
        Ok(surface)
    }

    pub fn gesture_events(&self) -> Vec<GestureEvent> {
        self.events.iter().map(RecordedEvent::to_gesture_event).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "surface": {"left": 10, "top": 20, "width": 280, "height": 280},
        "events": [
            {"type": "mouse_down", "offset_x": 40, "offset_y": 40},
            {"type": "mouse_move", "offset_x": 240, "offset_y": 240},
            {"type": "mouse_up", "offset_x": 240, "offset_y": 240},
            {"type": "touch_start", "touches": [{"client_x": 50, "client_y": 60}]},
            {"type": "touch_move", "touches": [{"client_x": 150, "client_y": 160}]},
            {"type": "touch_end"},
            {"type": "mouse_leave"}
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let file = GestureFile::parse(SAMPLE).unwrap();
        assert_eq!(file.events.len(), 7);

        let surface = file.surface(1.0, 1.0).unwrap();
        assert_eq!(surface.left, 10.0);
        assert_eq!(surface.width, 280.0);

        let events = file.gesture_events();
        assert_eq!(events[0], GestureEvent::Start(PointerInput::mouse(40.0, 40.0)));
        assert_eq!(events[2], GestureEvent::End);
        assert_eq!(events[3], GestureEvent::Start(PointerInput::touch(50.0, 60.0)));
        assert_eq!(events[5], GestureEvent::End);
        assert_eq!(events[6], GestureEvent::End);
    }

    #[test]
    fn test_surface_fallback() {
        let file = GestureFile::parse(r#"{"events": []}"#).unwrap();
        let surface = file.surface(560.0, 280.0).unwrap();
        assert_eq!((surface.width, surface.height), (560.0, 280.0));
    }

    #[test]
    fn test_zero_surface_rejected() {
        let file =
            GestureFile::parse(r#"{"surface": {"width": 0, "height": 10}, "events": []}"#).unwrap();
        assert!(file.surface(280.0, 280.0).is_err());
    }

    #[test]
    fn test_unknown_event_type() {
        assert!(GestureFile::parse(r#"{"events": [{"type": "pinch"}]}"#).is_err());
    }
}
