//! Per-document metric accumulation.
//!
//! A [`DocumentMetrics`] absorbs the field scores of one document's aligned
//! pairs and unmatched records, then exposes the derived rates. All of its
//! pieces merge associatively so corpus aggregation (and bootstrap
//! resampling) can combine documents in any order.

use crate::eval::scorer::{self, ConfusionCounts, FieldScore};
use crate::record::{NumericField, OutcomeType, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Squared-error accumulation over both-present field comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Sum of squared errors.
    pub sum_squared_error: f64,
    /// Number of comparisons (both sides present, matching or not).
    pub comparisons: usize,
}

impl ErrorStats {
    /// Record one squared error.
    pub fn record(&mut self, squared_error: f64) {
        self.sum_squared_error += squared_error;
        self.comparisons += 1;
    }

    /// Mean squared error, 0.0 when no comparisons exist.
    #[must_use]
    pub fn mse(&self) -> f64 {
        if self.comparisons == 0 {
            return 0.0;
        }
        self.sum_squared_error / self.comparisons as f64
    }

    /// Root mean squared error, 0.0 when no comparisons exist.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        self.mse().sqrt()
    }

    /// Merge another accumulator (equivalent to pooling the raw errors).
    pub fn merge(&mut self, other: &ErrorStats) {
        self.sum_squared_error += other.sum_squared_error;
        self.comparisons += other.comparisons;
    }
}

/// Correct/total tally for the record-level exact-match statistic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactMatchCounts {
    /// Records where every required field was present and within tolerance.
    pub correct: usize,
    /// Records attempted (binary or continuous type only).
    pub total: usize,
}

impl ExactMatchCounts {
    /// `correct / total`, 0.0 when no records were attempted.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// Merge another tally.
    pub fn merge(&mut self, other: &ExactMatchCounts) {
        self.correct += other.correct;
        self.total += other.total;
    }
}

/// Exact-match tallies, overall and split by inferred outcome type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactMatchStats {
    /// Pooled over binary and continuous records.
    pub overall: ExactMatchCounts,
    /// Binary-type records only.
    pub binary: ExactMatchCounts,
    /// Continuous-type records only.
    pub continuous: ExactMatchCounts,
    /// Matched pairs whose reference type could not be classified; excluded
    /// from the statistic but surfaced so callers can audit the ambiguity.
    pub unknown: usize,
}

impl ExactMatchStats {
    /// Record one judged pair.
    pub fn record(&mut self, outcome_type: OutcomeType, is_exact: bool) {
        let bucket = match outcome_type {
            OutcomeType::Binary => &mut self.binary,
            OutcomeType::Continuous => &mut self.continuous,
            OutcomeType::Unknown => {
                self.unknown += 1;
                return;
            }
        };
        bucket.total += 1;
        self.overall.total += 1;
        if is_exact {
            bucket.correct += 1;
            self.overall.correct += 1;
        }
    }

    /// Merge another set of tallies.
    pub fn merge(&mut self, other: &ExactMatchStats) {
        self.overall.merge(&other.overall);
        self.binary.merge(&other.binary);
        self.continuous.merge(&other.continuous);
        self.unknown += other.unknown;
    }
}

/// Confusion counts plus error accumulation for one numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Confusion cells for this field.
    pub counts: ConfusionCounts,
    /// Squared-error accumulation for this field.
    pub error: ErrorStats,
}

impl FieldStats {
    /// Merge another field's stats.
    pub fn merge(&mut self, other: &FieldStats) {
        self.counts.merge(&other.counts);
        self.error.merge(&other.error);
    }
}

/// All metrics for one evaluated document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetrics {
    /// The document these metrics describe.
    pub document_id: String,
    /// Pooled confusion cells over every field of every record slot.
    pub counts: ConfusionCounts,
    /// Per-field breakdown of the same cells.
    pub per_field: BTreeMap<NumericField, FieldStats>,
    /// Pooled squared-error accumulation.
    pub error: ErrorStats,
    /// Record-level exact-match tallies.
    pub exact: ExactMatchStats,
    /// Committed alignment pairs.
    pub matched_pairs: usize,
    /// Reference records no prediction claimed.
    pub unmatched_reference: usize,
    /// Prediction records that matched nothing.
    pub unmatched_prediction: usize,
}

impl DocumentMetrics {
    /// Empty metrics for a document.
    #[must_use]
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Self::default()
        }
    }

    /// Score and absorb one aligned pair, including its exact-match
    /// judgment.
    pub fn record_pair(&mut self, reference: &Record, prediction: &Record, tolerance: f64) {
        self.matched_pairs += 1;
        self.absorb(&scorer::score_pair(reference, prediction, tolerance));

        let (outcome_type, is_exact) = scorer::exact_match(reference, prediction, tolerance);
        self.exact.record(outcome_type, is_exact);
    }

    /// Score and absorb one unclaimed reference record.
    pub fn record_unmatched_reference(&mut self, reference: &Record) {
        self.unmatched_reference += 1;
        self.absorb(&scorer::score_unmatched_reference(reference));
    }

    /// Score and absorb one prediction record that matched nothing.
    pub fn record_unmatched_prediction(&mut self, prediction: &Record) {
        self.unmatched_prediction += 1;
        self.absorb(&scorer::score_unmatched_prediction(prediction));
    }

    fn absorb(&mut self, scores: &[FieldScore]) {
        for score in scores {
            self.counts.record(score.outcome);
            let field_stats = self.per_field.entry(score.field).or_default();
            field_stats.counts.record(score.outcome);
            if let Some(se) = score.squared_error {
                self.error.record(se);
                field_stats.error.record(se);
            }
        }
    }

    /// Document precision.
    #[must_use]
    pub fn precision(&self) -> f64 {
        self.counts.precision()
    }

    /// Document recall.
    #[must_use]
    pub fn recall(&self) -> f64 {
        self.counts.recall()
    }

    /// Document F1.
    #[must_use]
    pub fn f1(&self) -> f64 {
        self.counts.f1()
    }

    /// Document mean squared error.
    #[must_use]
    pub fn mse(&self) -> f64 {
        self.error.mse()
    }

    /// Document root mean squared error.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        self.error.rmse()
    }

    /// Record slots scored for this document: matched pairs plus unmatched
    /// records on both sides. Each slot contributes one confusion cell per
    /// numeric field.
    #[must_use]
    pub fn record_slots(&self) -> usize {
        self.matched_pairs + self.unmatched_reference + self.unmatched_prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: &str) -> Record {
        Record::new("d1", outcome, "Drug A", "Placebo")
    }

    #[test]
    fn test_error_stats_mse_rmse() {
        let mut error = ErrorStats::default();
        error.record(4.0);
        error.record(0.0);
        assert!((error.mse() - 2.0).abs() < 1e-9);
        assert!((error.rmse() - 2.0_f64.sqrt()).abs() < 1e-9);

        assert_eq!(ErrorStats::default().mse(), 0.0);
        assert_eq!(ErrorStats::default().rmse(), 0.0);
    }

    #[test]
    fn test_exact_match_stats_buckets() {
        let mut stats = ExactMatchStats::default();
        stats.record(OutcomeType::Binary, true);
        stats.record(OutcomeType::Binary, false);
        stats.record(OutcomeType::Continuous, true);
        stats.record(OutcomeType::Unknown, false);

        assert_eq!(stats.overall.correct, 2);
        assert_eq!(stats.overall.total, 3);
        assert_eq!(stats.binary.total, 2);
        assert_eq!(stats.continuous.total, 1);
        assert_eq!(stats.unknown, 1);
        assert!((stats.binary.accuracy() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_document_metrics_pair_accounting() {
        let reference = record("Mortality")
            .with_value(NumericField::InterventionEvents, 10.0)
            .with_value(NumericField::InterventionGroupSize, 100.0);
        let prediction = reference.clone();

        let mut doc = DocumentMetrics::new("d1");
        doc.record_pair(&reference, &prediction, 0.01);

        assert_eq!(doc.counts.tp, 2);
        assert_eq!(doc.counts.tn, 6);
        assert_eq!(doc.counts.total(), 8);
        assert_eq!(doc.error.comparisons, 2);
        assert_eq!(doc.mse(), 0.0);
        assert_eq!(doc.matched_pairs, 1);

        // identical prediction: perfect rates
        assert!((doc.precision() - 1.0).abs() < 1e-9);
        assert!((doc.recall() - 1.0).abs() < 1e-9);
        assert!((doc.f1() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_field_breakdown_tracks_pooled_counts() {
        let reference = record("Mortality")
            .with_value(NumericField::InterventionEvents, 10.0);
        let prediction = record("Mortality")
            .with_value(NumericField::InterventionEvents, 20.0);

        let mut doc = DocumentMetrics::new("d1");
        doc.record_pair(&reference, &prediction, 0.01);

        let field = doc
            .per_field
            .get(&NumericField::InterventionEvents)
            .unwrap();
        assert_eq!(field.counts.fn_, 1);
        assert_eq!(field.error.comparisons, 1);
        assert!((field.error.sum_squared_error - 100.0).abs() < 1e-9);

        // pooled counts agree with the per-field sum
        let pooled: usize = doc.per_field.values().map(|f| f.counts.total()).sum();
        assert_eq!(pooled, doc.counts.total());
    }

    #[test]
    fn test_unmatched_records_contribute_full_rows() {
        let mut doc = DocumentMetrics::new("d1");
        doc.record_unmatched_reference(
            &record("Mortality").with_value(NumericField::InterventionEvents, 10.0),
        );
        doc.record_unmatched_prediction(
            &record("Invented").with_value(NumericField::ComparatorMean, 5.0),
        );

        assert_eq!(doc.counts.total(), 16);
        assert_eq!(doc.counts.fn_, 1);
        assert_eq!(doc.counts.fp, 1);
        assert_eq!(doc.counts.tn, 14);
        assert_eq!(doc.record_slots(), 2);
    }
}
