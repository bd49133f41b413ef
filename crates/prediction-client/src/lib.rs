//! Prediction Client
//!
//! Sends feature vectors to the remote classifier with:
//! - A single JSON contract: `POST {base}/api/predict` with `{"data": [...]}`
//! - Fire-and-forget dispatch that reports pending/success/failure
//! - No retries; failures surface as one generic notification

mod client;
mod dispatch;

pub use client::{ClientConfig, PredictResponse, PredictionClient, PREDICT_PATH};
pub use dispatch::{Dispatcher, PendingPrediction, PredictionStatus};

use thiserror::Error;

/// Prediction request errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Prediction service returned HTTP {0}")]
    Status(u16),

    #[error("Undecodable response: {0}")]
    Decode(String),

    #[error("Predicted label {0} is not a digit")]
    InvalidLabel(i64),
}
