//! Storage Layer
//!
//! Prediction records, digit labels, and the record store that the
//! rendering layer reads snapshots from and sends label edits to.

mod label;
mod record;
mod repository;

pub use label::{Label, NUM_LABELS};
pub use record::PredictionRecord;
pub use repository::{RecordStore, Repository};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Label {0} is not a digit between 0 and 9")]
    InvalidLabel(u8),
}
