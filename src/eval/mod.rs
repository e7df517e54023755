//! Record reconciliation and metric computation.
//!
//! # Overview
//!
//! Two evaluation modes answer two different questions and are kept as
//! named, independently testable entry points:
//!
//! - **Strict alignment mode** ([`evaluate_document`], [`evaluate_corpus`]):
//!   fuzzy-aligns predicted records to reference records per document,
//!   scores every numeric field through a four-way null-aware confusion
//!   model, and aggregates precision/recall/F1 (macro and micro), MSE/RMSE,
//!   and record-level exact match. Measures overall extraction quality.
//! - **Open-world mode** ([`openworld::reconcile`]): flattens records into
//!   keyed facts and scores only keys the reference knows; out-of-reference
//!   predictions are "extra", never penalized. Measures strict correctness
//!   on known facts.
//!
//! # Pipeline
//!
//! ```text
//! raw records → normalized identity keys → alignment → confusion cells → report
//! ```
//!
//! Data flows strictly downward; nothing mutates another stage's output.
//! Per-document evaluation is embarrassingly parallel (enable the
//! `eval-parallel` feature) and reduces through an associative merge of
//! per-document counts.
//!
//! # Example
//!
//! ```
//! use trialeval::eval::{evaluate_corpus, EvalConfig};
//! use trialeval::record::{NumericField, PredictionSet, Record, ReferenceSet};
//!
//! let reference = ReferenceSet::from_records(vec![
//!     Record::new("doc1", "Mortality", "Drug A", "Placebo")
//!         .with_value(NumericField::InterventionEvents, 10.0)
//!         .with_value(NumericField::InterventionGroupSize, 100.0),
//! ]);
//! let predictions = PredictionSet::from_records(vec![
//!     Record::new("doc1", "mortality", "drug a", "placebo")
//!         .with_value(NumericField::InterventionEvents, 10.0)
//!         .with_value(NumericField::InterventionGroupSize, 100.0),
//! ]);
//!
//! let report = evaluate_corpus(&reference, &predictions, &EvalConfig::default());
//! assert!((report.micro_rates.f1 - 1.0).abs() < 1e-9);
//! assert_eq!(report.mse(), 0.0);
//! ```

pub mod align;
pub mod aggregate;
pub mod confidence;
pub mod metrics;
pub mod openworld;
pub mod report;
pub mod scorer;

pub use aggregate::{CorpusMetrics, MacroRates, MicroRates};
pub use align::{AlignedPair, Alignment, GreedyMatcher, MatchStrategy, DEFAULT_MATCH_THRESHOLD};
pub use confidence::{bootstrap_ci, BootstrapConfig, ConfidenceInterval};
pub use metrics::{DocumentMetrics, ErrorStats, ExactMatchCounts, ExactMatchStats, FieldStats};
pub use scorer::{ConfusionCounts, ConfusionOutcome, DEFAULT_NUMBER_TOLERANCE};

use crate::record::{PredictionSet, Record, ReferenceSet};
use serde::{Deserialize, Serialize};

/// Evaluation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Minimum identity similarity for committing an alignment pair
    /// (inclusive).
    pub match_threshold: f64,
    /// Relative tolerance for numeric field comparison.
    pub number_tolerance: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            number_tolerance: DEFAULT_NUMBER_TOLERANCE,
        }
    }
}

/// Evaluate one document's predictions against its reference records.
///
/// Aligns, scores every field of every record slot (matched pairs plus
/// unmatched records on both sides), and judges exact match per pair. A
/// document absent from the reference arrives here with an empty
/// `reference` slice, which scores every predicted value as a
/// hallucination.
#[must_use]
pub fn evaluate_document(
    document_id: &str,
    reference: &[Record],
    predictions: &[Record],
    config: &EvalConfig,
) -> DocumentMetrics {
    let matcher = GreedyMatcher::new(config.match_threshold);
    let alignment = matcher.align(reference, predictions);
    log::debug!(
        "document {document_id}: {} pairs, {} unmatched reference, {} unmatched predictions",
        alignment.pairs.len(),
        alignment.unmatched_reference.len(),
        alignment.unmatched_prediction.len()
    );

    let mut doc = DocumentMetrics::new(document_id);
    for pair in &alignment.pairs {
        doc.record_pair(
            &reference[pair.reference_index],
            &predictions[pair.prediction_index],
            config.number_tolerance,
        );
    }
    for &idx in &alignment.unmatched_reference {
        doc.record_unmatched_reference(&reference[idx]);
    }
    for &idx in &alignment.unmatched_prediction {
        doc.record_unmatched_prediction(&predictions[idx]);
    }
    doc
}

/// Evaluate every document in the prediction set and aggregate.
///
/// The document universe is the prediction set: a document id the
/// reference does not know contributes hallucination FPs and a warning; an
/// explicitly registered empty prediction list scores all of that
/// document's reference records as unmatched. Reference documents with no
/// entry in the prediction set are not evaluated.
#[must_use]
pub fn evaluate_corpus(
    reference: &ReferenceSet,
    predictions: &PredictionSet,
    config: &EvalConfig,
) -> CorpusMetrics {
    let mut warnings = Vec::new();
    let entries: Vec<(&str, &[Record])> = predictions.documents().collect();
    for (document_id, _) in &entries {
        if !reference.contains_document(document_id) {
            warnings.push(format!(
                "document {document_id} not in reference; its predictions score as false positives"
            ));
        }
    }

    log::info!(
        "evaluating {} documents ({} predicted records) against {} reference records",
        entries.len(),
        predictions.num_records(),
        reference.len()
    );

    let evaluate_one = |&(document_id, preds): &(&str, &[Record])| {
        let gold: Vec<Record> = reference
            .document(document_id)
            .into_iter()
            .cloned()
            .collect();
        evaluate_document(document_id, &gold, preds, config)
    };

    #[cfg(feature = "eval-parallel")]
    let documents: Vec<DocumentMetrics> = {
        use rayon::prelude::*;
        entries.par_iter().map(evaluate_one).collect()
    };

    #[cfg(not(feature = "eval-parallel"))]
    let documents: Vec<DocumentMetrics> = entries.iter().map(evaluate_one).collect();

    CorpusMetrics::from_documents(documents, warnings)
}
