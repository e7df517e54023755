//! Corpus-level aggregation of per-document metrics.
//!
//! Two disjoint strategies over the same per-document counts:
//!
//! - **Macro**: arithmetic mean of each document's own rates, so every
//!   document weighted equally regardless of size.
//! - **Micro**: counts summed first, rates computed once, so every
//!   field-level decision weighted equally regardless of document.
//!
//! MSE pools as a count-weighted mean (identical to recomputing over the
//! pooled squared-error sum); exact match pools correct/total.

use crate::eval::metrics::{DocumentMetrics, ErrorStats, ExactMatchStats, FieldStats};
use crate::eval::scorer::ConfusionCounts;
use crate::record::NumericField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean-of-documents precision/recall/F1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRates {
    /// Mean of per-document precision.
    pub precision: f64,
    /// Mean of per-document recall.
    pub recall: f64,
    /// Mean of per-document F1.
    pub f1: f64,
}

/// Pooled-count precision/recall/F1 with the counts that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MicroRates {
    /// Summed confusion cells across all documents.
    pub counts: ConfusionCounts,
    /// `TP / (TP + FP)` over pooled counts.
    pub precision: f64,
    /// `TP / (TP + FN)` over pooled counts.
    pub recall: f64,
    /// F1 over pooled counts.
    pub f1: f64,
}

impl MicroRates {
    /// Derive rates from pooled counts.
    #[must_use]
    pub fn from_counts(counts: ConfusionCounts) -> Self {
        Self {
            counts,
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
        }
    }
}

/// Aggregated metrics over an evaluated corpus.
///
/// Never mutated after construction; each evaluation run produces a fresh
/// report. Retains the per-document metrics so confidence estimation can
/// resample them with the same aggregation code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusMetrics {
    /// Number of documents evaluated.
    pub num_documents: usize,
    /// Macro-averaged rates (document-weighted).
    pub macro_rates: MacroRates,
    /// Micro-averaged rates (field-decision-weighted).
    pub micro_rates: MicroRates,
    /// Pooled squared-error statistics.
    pub error: ErrorStats,
    /// Pooled exact-match tallies, split by outcome type.
    pub exact: ExactMatchStats,
    /// Micro computation restricted to each numeric field.
    pub per_field: BTreeMap<NumericField, FieldStats>,
    /// Per-document metrics, in evaluation order.
    pub documents: Vec<DocumentMetrics>,
    /// Recoverable conditions encountered during the run (unknown
    /// documents, rejected records), surfaced instead of interrupting the
    /// batch.
    pub warnings: Vec<String>,
}

impl CorpusMetrics {
    /// Aggregate per-document metrics into a corpus report.
    #[must_use]
    pub fn from_documents(documents: Vec<DocumentMetrics>, warnings: Vec<String>) -> Self {
        let num_documents = documents.len();

        let mut macro_rates = MacroRates::default();
        let mut pooled_counts = ConfusionCounts::default();
        let mut error = ErrorStats::default();
        let mut exact = ExactMatchStats::default();
        let mut per_field: BTreeMap<NumericField, FieldStats> = BTreeMap::new();

        for doc in &documents {
            macro_rates.precision += doc.precision();
            macro_rates.recall += doc.recall();
            macro_rates.f1 += doc.f1();

            pooled_counts.merge(&doc.counts);
            error.merge(&doc.error);
            exact.merge(&doc.exact);
            for (field, stats) in &doc.per_field {
                per_field.entry(*field).or_default().merge(stats);
            }
        }

        if num_documents > 0 {
            let n = num_documents as f64;
            macro_rates.precision /= n;
            macro_rates.recall /= n;
            macro_rates.f1 /= n;
        }

        Self {
            num_documents,
            macro_rates,
            micro_rates: MicroRates::from_counts(pooled_counts),
            error,
            exact,
            per_field,
            documents,
            warnings,
        }
    }

    /// Pooled mean squared error.
    #[must_use]
    pub fn mse(&self) -> f64 {
        self.error.mse()
    }

    /// Pooled root mean squared error.
    #[must_use]
    pub fn rmse(&self) -> f64 {
        self.error.rmse()
    }

    /// Pooled exact-match accuracy.
    #[must_use]
    pub fn exact_match_accuracy(&self) -> f64 {
        self.exact.overall.accuracy()
    }
}

/// Micro-F1 over an arbitrary subset of documents.
///
/// Shared by the point estimate and the bootstrap so the two cannot drift.
#[must_use]
pub fn micro_f1(documents: &[&DocumentMetrics]) -> f64 {
    let mut pooled = ConfusionCounts::default();
    for doc in documents {
        pooled.merge(&doc.counts);
    }
    pooled.f1()
}

/// Pooled RMSE over an arbitrary subset of documents.
#[must_use]
pub fn pooled_rmse(documents: &[&DocumentMetrics]) -> f64 {
    let mut pooled = ErrorStats::default();
    for doc in documents {
        pooled.merge(&doc.error);
    }
    pooled.rmse()
}
