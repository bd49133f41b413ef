//! Digit Labels

use crate::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digit classes
pub const NUM_LABELS: usize = 10;

/// A digit class, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Label(u8);

impl Label {
    /// Every label in ascending order, as offered by the record editor
    pub const ALL: [Label; NUM_LABELS] = [
        Label(0),
        Label(1),
        Label(2),
        Label(3),
        Label(4),
        Label(5),
        Label(6),
        Label(7),
        Label(8),
        Label(9),
    ];

    pub fn new(value: u8) -> Result<Self, StorageError> {
        if (value as usize) < NUM_LABELS {
            Ok(Self(value))
        } else {
            Err(StorageError::InvalidLabel(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Row/column index in a class-indexed table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Label {
    type Error = StorageError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_range() {
        assert_eq!(Label::new(0).unwrap().value(), 0);
        assert_eq!(Label::new(9).unwrap().index(), 9);
        assert_eq!(Label::new(10), Err(StorageError::InvalidLabel(10)));
    }

    #[test]
    fn test_all_labels() {
        let values: Vec<u8> = Label::ALL.iter().map(|l| l.value()).collect();
        assert_eq!(values, (0..10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_label_json() {
        assert_eq!(serde_json::to_string(&Label::new(7).unwrap()).unwrap(), "7");
        assert!(serde_json::from_str::<Label>("12").is_err());
    }
}
