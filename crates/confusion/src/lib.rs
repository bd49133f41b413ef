//! Confusion Matrix
//!
//! Tabulates (actual, predicted) label pairs from a snapshot of prediction
//! records. Holds no state between snapshots: rebuild on every change.

mod matrix;

pub use matrix::{ConfusionMatrix, MatrixSummary};
