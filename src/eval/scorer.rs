//! Field-level confusion scoring.
//!
//! Every (record pair, numeric field) combination lands in exactly one of
//! four outcomes. The null cases carry real signal: a reference null with a
//! predicted null is a correctly identified absence (TN), a reference null
//! with a predicted value is a hallucination (FP). A present-but-wrong
//! value is a miss of the correct value (FN), never additionally a
//! hallucination. Changing that policy would silently shift reported
//! precision/recall.

use crate::record::{NumericField, OutcomeType, Record};
use serde::{Deserialize, Serialize};

/// Default relative tolerance for numeric comparison (1%).
pub const DEFAULT_NUMBER_TOLERANCE: f64 = 0.01;

/// The four-way classification of one field on one (possibly unmatched)
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfusionOutcome {
    /// Both sides present and numerically matching.
    TruePositive,
    /// Both sides absent: correctly identified missing data.
    TrueNegative,
    /// Predicted a value the reference does not have (hallucination).
    FalsePositive,
    /// Missed an available value, or extracted the wrong one.
    FalseNegative,
}

/// Confusion counts with rate derivations.
///
/// Every rate is defined as 0.0 when its denominator is 0; degenerate
/// documents must never raise an arithmetic fault.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// True positives.
    pub tp: usize,
    /// True negatives.
    pub tn: usize,
    /// False positives.
    pub fp: usize,
    /// False negatives.
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionCounts {
    /// Record one outcome.
    pub fn record(&mut self, outcome: ConfusionOutcome) {
        match outcome {
            ConfusionOutcome::TruePositive => self.tp += 1,
            ConfusionOutcome::TrueNegative => self.tn += 1,
            ConfusionOutcome::FalsePositive => self.fp += 1,
            ConfusionOutcome::FalseNegative => self.fn_ += 1,
        }
    }

    /// Sum of all four cells.
    #[must_use]
    pub fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// `TP / (TP + FP)`, 0.0 when undefined.
    #[must_use]
    pub fn precision(&self) -> f64 {
        let denom = self.tp + self.fp;
        if denom == 0 {
            return 0.0;
        }
        self.tp as f64 / denom as f64
    }

    /// `TP / (TP + FN)`, 0.0 when undefined.
    #[must_use]
    pub fn recall(&self) -> f64 {
        let denom = self.tp + self.fn_;
        if denom == 0 {
            return 0.0;
        }
        self.tp as f64 / denom as f64
    }

    /// Harmonic mean of precision and recall, 0.0 when undefined.
    #[must_use]
    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            return 0.0;
        }
        2.0 * p * r / (p + r)
    }

    /// Merge counts from another set (associative, order-independent).
    pub fn merge(&mut self, other: &ConfusionCounts) {
        self.tp += other.tp;
        self.tn += other.tn;
        self.fp += other.fp;
        self.fn_ += other.fn_;
    }
}

/// Whether two values match within relative tolerance:
/// `|a - b| <= tol * max(|a|, |b|)`.
///
/// Relative, not absolute, so small and large magnitudes are held to the
/// same proportional standard.
#[must_use]
pub fn numbers_match(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

/// The scored outcome of one field slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldScore {
    /// Which slot was scored.
    pub field: NumericField,
    /// The confusion cell it landed in.
    pub outcome: ConfusionOutcome,
    /// Squared error, present whenever both sides carried a value
    /// (within tolerance or not).
    pub squared_error: Option<f64>,
}

/// Score every field of a matched (reference, prediction) pair.
pub fn score_pair(reference: &Record, prediction: &Record, tolerance: f64) -> Vec<FieldScore> {
    NumericField::ALL
        .iter()
        .map(|&field| {
            let ref_val = reference.value(field);
            let pred_val = prediction.value(field);
            match (ref_val, pred_val) {
                (None, None) => FieldScore {
                    field,
                    outcome: ConfusionOutcome::TrueNegative,
                    squared_error: None,
                },
                (None, Some(_)) => FieldScore {
                    field,
                    outcome: ConfusionOutcome::FalsePositive,
                    squared_error: None,
                },
                (Some(_), None) => FieldScore {
                    field,
                    outcome: ConfusionOutcome::FalseNegative,
                    squared_error: None,
                },
                (Some(g), Some(p)) => {
                    let outcome = if numbers_match(p, g, tolerance) {
                        ConfusionOutcome::TruePositive
                    } else {
                        ConfusionOutcome::FalseNegative
                    };
                    FieldScore {
                        field,
                        outcome,
                        squared_error: Some((p - g) * (p - g)),
                    }
                }
            }
        })
        .collect()
}

/// Score every field of a reference record no prediction claimed:
/// available values were missed (FN), absent values were correctly not
/// invented (TN).
pub fn score_unmatched_reference(reference: &Record) -> Vec<FieldScore> {
    NumericField::ALL
        .iter()
        .map(|&field| FieldScore {
            field,
            outcome: if reference.value(field).is_some() {
                ConfusionOutcome::FalseNegative
            } else {
                ConfusionOutcome::TrueNegative
            },
            squared_error: None,
        })
        .collect()
}

/// Score every field of a prediction record that matched nothing: every
/// value it carries is a hallucination (FP); its empty slots are TN so
/// that each record contributes exactly one cell per field.
pub fn score_unmatched_prediction(prediction: &Record) -> Vec<FieldScore> {
    NumericField::ALL
        .iter()
        .map(|&field| FieldScore {
            field,
            outcome: if prediction.value(field).is_some() {
                ConfusionOutcome::FalsePositive
            } else {
                ConfusionOutcome::TrueNegative
            },
            squared_error: None,
        })
        .collect()
}

/// Record-level exact-match judgment for a matched pair.
///
/// The reference record's populated fields decide the outcome type and
/// with it the required field set: binary needs both group sizes and both
/// event counts; continuous needs both group sizes, both means, and both
/// standard deviations. Exact iff every required field is present on both
/// sides and within tolerance. Unknown-type records are excluded from the
/// statistic (but counted by the caller).
#[must_use]
pub fn exact_match(reference: &Record, prediction: &Record, tolerance: f64) -> (OutcomeType, bool) {
    let outcome_type = reference.inferred_outcome_type();
    let required: &[NumericField] = match outcome_type {
        OutcomeType::Binary => &NumericField::BINARY_REQUIRED,
        OutcomeType::Continuous => &NumericField::CONTINUOUS_REQUIRED,
        OutcomeType::Unknown => return (OutcomeType::Unknown, false),
    };

    let all_match = required.iter().all(|&field| {
        match (reference.value(field), prediction.value(field)) {
            (Some(g), Some(p)) => numbers_match(p, g, tolerance),
            _ => false,
        }
    });

    (outcome_type, all_match)
}
