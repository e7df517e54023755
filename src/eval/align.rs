//! Per-document record alignment.
//!
//! Pairs predicted records to reference records by fuzzy similarity over
//! the identity key (`outcome | intervention | comparator`), one-to-one,
//! gated by a threshold. The matcher is a named strategy so an optimal
//! assignment (e.g. Hungarian) can be substituted later without touching
//! the scorer or aggregator.

use crate::record::Record;
use crate::similarity::sequence_ratio;
use serde::{Deserialize, Serialize};

/// Default similarity threshold for committing a pair.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// One committed (reference, prediction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Index into the document's reference records.
    pub reference_index: usize,
    /// Index into the document's prediction records.
    pub prediction_index: usize,
    /// Similarity score that committed the pair, in [0, 1].
    pub similarity: f64,
}

/// The 1-to-1 pairing of a document's predictions to its reference records.
///
/// Invariant: every reference index and every prediction index appears in
/// exactly one of {pairs, unmatched}, never both and never twice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alignment {
    /// Committed pairs, in prediction order.
    pub pairs: Vec<AlignedPair>,
    /// Reference indices never claimed by any prediction.
    pub unmatched_reference: Vec<usize>,
    /// Prediction indices whose best candidate fell below the threshold.
    pub unmatched_prediction: Vec<usize>,
}

impl Alignment {
    /// Total records accounted for: pairs count once per side.
    #[must_use]
    pub fn record_slots(&self) -> usize {
        self.pairs.len() + self.unmatched_reference.len() + self.unmatched_prediction.len()
    }
}

/// Strategy for pairing predicted records to reference records within one
/// document.
pub trait MatchStrategy {
    /// Compute the alignment for one document.
    fn align(&self, reference: &[Record], predictions: &[Record]) -> Alignment;
}

/// Greedy threshold-gated matcher.
///
/// For each prediction record in input order, scores every not-yet-claimed
/// reference record and commits the strictly best candidate iff its score
/// reaches the threshold (ties broken by input order: first seen wins).
/// Greedy, not globally optimal: a deliberate simplicity/accuracy tradeoff
/// that is deterministic given a fixed record order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreedyMatcher {
    /// Minimum similarity for committing a pair (inclusive).
    pub threshold: f64,
}

impl GreedyMatcher {
    /// Create a matcher with the given threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for GreedyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl MatchStrategy for GreedyMatcher {
    fn align(&self, reference: &[Record], predictions: &[Record]) -> Alignment {
        let mut alignment = Alignment::default();
        let mut claimed = vec![false; reference.len()];

        let reference_keys: Vec<String> = reference.iter().map(Record::identity_key).collect();

        for (pred_idx, prediction) in predictions.iter().enumerate() {
            let pred_key = prediction.identity_key();

            let mut best_score = -1.0;
            let mut best_ref: Option<usize> = None;
            for (ref_idx, ref_key) in reference_keys.iter().enumerate() {
                if claimed[ref_idx] {
                    continue;
                }
                let score = sequence_ratio(&pred_key, ref_key);
                if score > best_score {
                    best_score = score;
                    best_ref = Some(ref_idx);
                }
            }

            match best_ref {
                Some(ref_idx) if best_score >= self.threshold => {
                    claimed[ref_idx] = true;
                    alignment.pairs.push(AlignedPair {
                        reference_index: ref_idx,
                        prediction_index: pred_idx,
                        similarity: best_score,
                    });
                }
                _ => alignment.unmatched_prediction.push(pred_idx),
            }
        }

        alignment.unmatched_reference = claimed
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(idx, _)| idx)
            .collect();

        alignment
    }
}
