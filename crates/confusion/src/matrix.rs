//! Confusion Matrix Aggregation

use serde::Serialize;
use std::fmt;
use storage::{Label, PredictionRecord, NUM_LABELS};
use tracing::debug;

/// Intensity above which a cell is drawn with high-contrast text
const HIGH_CONTRAST_THRESHOLD: f64 = 0.5;

/// 10x10 count table indexed by `[actual][predicted]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    cells: [[u32; NUM_LABELS]; NUM_LABELS],
}

/// Headline numbers for a matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatrixSummary {
    /// Records with both labels set
    pub labeled: u32,
    /// Records on the diagonal
    pub correct: u32,
    /// `correct / labeled`, absent when nothing is labeled
    pub accuracy: Option<f64>,
}

impl ConfusionMatrix {
    /// All-zero matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every record that carries both labels; others are skipped
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        let mut matrix = Self::new();
        let mut skipped = 0usize;
        for record in records {
            match record.labeled_pair() {
                Some((actual, predicted)) => matrix.record(actual, predicted),
                None => skipped += 1,
            }
        }
        debug!(
            "Built confusion matrix: {} labeled, {} skipped",
            matrix.total(),
            skipped
        );
        matrix
    }

    /// Add one observation
    pub fn record(&mut self, actual: Label, predicted: Label) {
        self.cells[actual.index()][predicted.index()] += 1;
    }

    /// Count for one `(actual, predicted)` pair
    pub fn get(&self, actual: Label, predicted: Label) -> u32 {
        self.cells[actual.index()][predicted.index()]
    }

    /// Raw rows, indexed by actual label
    pub fn rows(&self) -> &[[u32; NUM_LABELS]; NUM_LABELS] {
        &self.cells
    }

    /// Sum of all cells
    pub fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// Largest single cell
    pub fn max_count(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> u32 {
        (0..NUM_LABELS).map(|i| self.cells[i][i]).sum()
    }

    /// Cell shade in `[0, 1]`: count relative to the largest cell, 0 for an empty matrix
    pub fn intensity(&self, actual: Label, predicted: Label) -> f64 {
        let max = self.max_count();
        if max == 0 {
            return 0.0;
        }
        f64::from(self.get(actual, predicted)) / f64::from(max)
    }

    /// Whether a cell is dark enough to need light text
    pub fn is_high_contrast(&self, actual: Label, predicted: Label) -> bool {
        self.intensity(actual, predicted) > HIGH_CONTRAST_THRESHOLD
    }

    pub fn summary(&self) -> MatrixSummary {
        let labeled = self.total();
        let correct = self.correct();
        MatrixSummary {
            labeled,
            correct,
            accuracy: (labeled > 0).then(|| f64::from(correct) / f64::from(labeled)),
        }
    }

    /// Intensities rendered as a table with two decimals
    pub fn intensity_table(&self) -> String {
        let mut out = header();
        for actual in Label::ALL {
            out.push_str(&format!("{:>6}", actual));
            for predicted in Label::ALL {
                out.push_str(&format!("{:>6.2}", self.intensity(actual, predicted)));
            }
            out.push('\n');
        }
        out
    }
}

fn header() -> String {
    let mut out = String::from("Actual (rows) vs Predicted (columns)\n");
    out.push_str(&format!("{:>6}", ""));
    for predicted in Label::ALL {
        out.push_str(&format!("{:>6}", predicted));
    }
    out.push('\n');
    out
}

impl fmt::Display for ConfusionMatrix {
    /// Count table; `*` marks high-contrast cells
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", header())?;
        for actual in Label::ALL {
            write!(f, "{:>6}", actual)?;
            for predicted in Label::ALL {
                let marker = if self.is_high_contrast(actual, predicted) { "*" } else { " " };
                write!(f, "{:>5}{}", self.get(actual, predicted), marker)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for MatrixSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accuracy {
            Some(accuracy) => write!(
                f,
                "{} labeled, {} correct, accuracy {:.1}%",
                self.labeled,
                self.correct,
                accuracy * 100.0
            ),
            None => write!(f, "no labeled predictions yet"),
        }
    }
}
