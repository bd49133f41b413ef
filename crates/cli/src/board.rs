//! Results Board
//!
//! Follows the live record collection and rebuilds the confusion matrix from
//! scratch for every snapshot.

use confusion::ConfusionMatrix;
use std::fmt;
use storage::{PredictionRecord, RecordStore};
use tokio::sync::watch;

/// Everything the results page shows for one snapshot
#[derive(Debug, Clone)]
pub struct BoardView {
    /// Records, newest first
    pub records: Vec<PredictionRecord>,
    pub matrix: ConfusionMatrix,
}

impl BoardView {
    pub fn from_snapshot(records: Vec<PredictionRecord>) -> Self {
        let matrix = ConfusionMatrix::from_records(&records);
        Self { records, matrix }
    }
}

fn label_or_dash<T: fmt::Display>(label: Option<T>) -> String {
    label.map_or_else(|| "-".to_string(), |l| l.to_string())
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix")?;
        write!(f, "{}", self.matrix)?;
        writeln!(f, "{}", self.matrix.summary())?;
        writeln!(f)?;
        writeln!(f, "Prediction Results")?;
        for record in &self.records {
            writeln!(
                f,
                "  {}  predicted: {}  actual: {}",
                record.id,
                label_or_dash(record.predicted_label),
                label_or_dash(record.actual_label)
            )?;
        }
        Ok(())
    }
}

/// Subscriber to a [`RecordStore`]
pub struct ResultsBoard {
    updates: watch::Receiver<Vec<PredictionRecord>>,
}

impl ResultsBoard {
    pub fn new(store: &dyn RecordStore) -> Self {
        Self {
            updates: store.subscribe(),
        }
    }

    /// View of the latest snapshot
    pub fn current(&mut self) -> BoardView {
        BoardView::from_snapshot(self.updates.borrow_and_update().clone())
    }

    /// View of the latest snapshot if it changed since the last look
    pub fn poll(&mut self) -> Option<BoardView> {
        match self.updates.has_changed() {
            Ok(true) => Some(self.current()),
            _ => None,
        }
    }

    /// Wait for the next snapshot; `None` once the store is gone
    pub async fn next(&mut self) -> Option<BoardView> {
        self.updates.changed().await.ok()?;
        Some(self.current())
    }
}
