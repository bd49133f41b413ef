//! Feature Engineering Engine
//!
//! Turns freehand gestures into the canonical 784-value feature vector
//! expected by the digit classifier.

mod error;
mod features;
mod gesture;

pub use error::FeatureError;
pub use features::{inverted_luma, luma, FeatureVector, FEATURE_DIMENSION};
pub use gesture::{GestureEvent, GestureRecorder};
