//! Prediction Record

use crate::label::Label;
use chrono::{DateTime, Utc};
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};

/// One classified drawing.
///
/// Created by the prediction service with `actual_label` unset; the user
/// supplies ground truth later through the record editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<FeatureVector>,
    #[serde(default)]
    pub predicted_label: Option<Label>,
    #[serde(default)]
    pub actual_label: Option<Label>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PredictionRecord {
    /// Record as stored right after a prediction
    pub fn predicted(
        id: impl Into<String>,
        input_data: FeatureVector,
        predicted_label: Label,
    ) -> Self {
        Self {
            id: id.into(),
            input_data: Some(input_data),
            predicted_label: Some(predicted_label),
            actual_label: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// `(actual, predicted)` when both labels are set
    pub fn labeled_pair(&self) -> Option<(Label, Label)> {
        Some((self.actual_label?, self.predicted_label?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_pair_requires_both() {
        let mut record = PredictionRecord {
            id: "a".to_string(),
            input_data: None,
            predicted_label: Label::new(3).ok(),
            actual_label: None,
            timestamp: None,
        };
        assert_eq!(record.labeled_pair(), None);

        record.actual_label = Label::new(5).ok();
        assert_eq!(
            record.labeled_pair(),
            Some((Label::new(5).unwrap(), Label::new(3).unwrap()))
        );
    }

    #[test]
    fn test_sparse_json_document() {
        let record: PredictionRecord =
            serde_json::from_str(r#"{"id":"x1","actual_label":2}"#).unwrap();
        assert_eq!(record.actual_label, Label::new(2).ok());
        assert_eq!(record.predicted_label, None);
        assert_eq!(record.input_data, None);
        assert_eq!(record.timestamp, None);
    }
}
