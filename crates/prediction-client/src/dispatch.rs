//! Fire-and-forget Prediction Dispatch

use crate::client::{PredictResponse, PredictionClient};
use feature_engine::FeatureVector;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

/// Progress of one prediction request
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionStatus {
    Pending,
    Success(PredictResponse),
    Failure(String),
}

impl PredictionStatus {
    /// Whether the request has finished either way
    pub fn is_settled(&self) -> bool {
        !matches!(self, PredictionStatus::Pending)
    }

    /// Transient text shown to the user
    pub fn notification(&self) -> String {
        match self {
            PredictionStatus::Pending => "Loading...".to_string(),
            PredictionStatus::Success(response) => format!("Guessed {}!", response.predicted_label),
            PredictionStatus::Failure(_) => "Error sending data.".to_string(),
        }
    }
}

/// Handle to a request in flight.
///
/// Dropping it does not cancel the request.
pub struct PendingPrediction {
    status: watch::Receiver<PredictionStatus>,
}

impl PendingPrediction {
    /// Latest status
    pub fn status(&self) -> PredictionStatus {
        self.status.borrow().clone()
    }

    /// Receiver for driving a status indicator
    pub fn subscribe(&self) -> watch::Receiver<PredictionStatus> {
        self.status.clone()
    }

    /// Wait until the request succeeds or fails
    pub async fn settled(mut self) -> PredictionStatus {
        self.status
            .wait_for(PredictionStatus::is_settled)
            .await
            .map(|status| status.clone())
            .unwrap_or_else(|_| PredictionStatus::Failure("prediction task stopped".to_string()))
    }
}

/// Spawns one background request per feature vector
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<PredictionClient>,
}

impl Dispatcher {
    pub fn new(client: PredictionClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Send `features` without waiting; must be called inside a Tokio runtime.
    ///
    /// The vector is moved into the request task and dropped once it completes.
    pub fn dispatch(&self, features: FeatureVector) -> PendingPrediction {
        let (tx, rx) = watch::channel(PredictionStatus::Pending);
        let client = Arc::clone(&self.client);

        tokio::spawn(async move {
            let status = match client.predict(&features).await {
                Ok(response) => {
                    info!("Prediction: {}", response.predicted_label);
                    PredictionStatus::Success(response)
                }
                Err(e) => {
                    error!("Error sending data: {}", e);
                    PredictionStatus::Failure(e.to_string())
                }
            };
            tx.send_replace(status);
        });

        PendingPrediction { status: rx }
    }
}
