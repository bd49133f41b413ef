//! HTTP Prediction Client

use crate::PredictError;
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storage::Label;
use tracing::{debug, info, warn};

/// Path of the prediction endpoint below the base URL
pub const PREDICT_PATH: &str = "/api/predict";

/// Prediction client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the prediction service
    pub base_url: String,
    /// Transport timeout; `None` waits for as long as the connection lives
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9696".to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    data: &'a FeatureVector,
}

#[derive(Debug, Deserialize)]
struct RawPredictResponse {
    predicted_label: i64,
    #[serde(default)]
    message: Option<String>,
}

/// Successful prediction
#[derive(Debug, Clone, PartialEq)]
pub struct PredictResponse {
    pub predicted_label: Label,
    /// Free-form status text from the service
    pub message: Option<String>,
}

/// Client for the remote classifier
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    /// Create a client for `config.base_url`
    pub fn new(config: &ClientConfig) -> Result<Self, PredictError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let endpoint = format!("{}{}", config.base_url.trim_end_matches('/'), PREDICT_PATH);
        info!("Prediction endpoint: {}", endpoint);
        Ok(Self { http, endpoint })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Classify one feature vector
    pub async fn predict(&self, features: &FeatureVector) -> Result<PredictResponse, PredictError> {
        debug!("Posting {} values to {}", features.values().len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&PredictRequest { data: features })
            .send()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Prediction service answered {}", status);
            return Err(PredictError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PredictError::Transport(e.to_string()))?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<PredictResponse, PredictError> {
    let raw: RawPredictResponse =
        serde_json::from_str(body).map_err(|e| PredictError::Decode(e.to_string()))?;
    let predicted_label = u8::try_from(raw.predicted_label)
        .ok()
        .and_then(|v| Label::new(v).ok())
        .ok_or(PredictError::InvalidLabel(raw.predicted_label))?;
    Ok(PredictResponse {
        predicted_label,
        message: raw.message,
    })
}
