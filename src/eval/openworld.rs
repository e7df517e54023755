//! Open-world fact reconciliation (alternate mode).
//!
//! Skips fuzzy record alignment entirely. Records flatten into keyed
//! facts, `(document, outcome, role, arm, field) -> value`, and only keys the
//! reference knows about are scored. Predictions outside the reference key
//! set are reported as "extra", never penalized: this mode measures whether
//! known facts were correctly reproduced, not whether the model
//! overgenerated. That is the structural difference from the strict
//! alignment mode, and both are kept as named, independently testable
//! modes.

use crate::eval::scorer::numbers_match;
use crate::normalize::normalize_text;
use crate::record::{ArmRole, FieldKind, NumericField, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of one flattened fact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactKey {
    /// Owning document.
    pub document_id: String,
    /// Normalized outcome name.
    pub outcome: String,
    /// Which arm of the comparison.
    pub role: ArmRole,
    /// Normalized name of that arm (the record's own intervention or
    /// comparator text).
    pub arm: String,
    /// The statistical quantity.
    pub field: FieldKind,
}

/// Flatten records into a deduplicated key→value map.
///
/// Each populated numeric slot yields one fact; names are normalized
/// first. On duplicate keys the first occurrence wins.
#[must_use]
pub fn flatten_facts(records: &[Record]) -> BTreeMap<FactKey, f64> {
    let mut facts = BTreeMap::new();
    for record in records {
        for field in NumericField::ALL {
            let Some(value) = record.value(field) else {
                continue;
            };
            let role = field.role();
            let arm = match role {
                ArmRole::Intervention => normalize_text(&record.intervention),
                ArmRole::Comparator => normalize_text(&record.comparator),
            };
            let key = FactKey {
                document_id: record.document_id.clone(),
                outcome: normalize_text(&record.outcome),
                role,
                arm,
                field: field.kind(),
            };
            facts.entry(key).or_insert(value);
        }
    }
    facts
}

/// Outcome of reconciling prediction facts against reference facts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Keys present in both sets with matching values.
    pub tp: usize,
    /// Keys present in both sets with differing values; counted against
    /// precision and recall, never as "extra".
    pub fp_in_gold: usize,
    /// Keys present only in the reference.
    #[serde(rename = "fn")]
    pub missing: usize,
    /// Keys present only in the prediction; excluded from precision and
    /// recall entirely.
    pub extra: usize,
    /// `tp / (tp + fp_in_gold)`, 0.0 when undefined.
    pub precision: f64,
    /// `tp / (tp + fp_in_gold + fn)`, 0.0 when undefined.
    pub recall: f64,
    /// Harmonic mean of precision and recall, 0.0 when undefined.
    pub f1: f64,
}

/// Reconcile prediction records against reference records as fact sets.
///
/// Value equality uses the same relative-tolerance comparison as the cell
/// scorer, so the two modes cannot drift on what "equal" means.
#[must_use]
pub fn reconcile(reference: &[Record], predictions: &[Record], tolerance: f64) -> Reconciliation {
    let reference_facts = flatten_facts(reference);
    let prediction_facts = flatten_facts(predictions);

    let mut result = Reconciliation::default();

    for (key, gold_value) in &reference_facts {
        match prediction_facts.get(key) {
            Some(pred_value) if numbers_match(*pred_value, *gold_value, tolerance) => {
                result.tp += 1;
            }
            Some(_) => result.fp_in_gold += 1,
            None => result.missing += 1,
        }
    }

    result.extra = prediction_facts
        .keys()
        .filter(|key| !reference_facts.contains_key(*key))
        .count();

    let scored = result.tp + result.fp_in_gold;
    if scored > 0 {
        result.precision = result.tp as f64 / scored as f64;
    }
    let gold_total = scored + result.missing;
    if gold_total > 0 {
        result.recall = result.tp as f64 / gold_total as f64;
    }
    if result.precision + result.recall > 0.0 {
        result.f1 =
            2.0 * result.precision * result.recall / (result.precision + result.recall);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gold() -> Vec<Record> {
        vec![Record::new("d1", "Mortality", "Drug A", "Placebo")
            .with_value(NumericField::InterventionEvents, 10.0)
            .with_value(NumericField::ComparatorEvents, 5.0)]
    }

    #[test]
    fn test_flatten_normalizes_names() {
        let facts = flatten_facts(&[Record::new("d1", "  MORTALITY ", "Drug  A", "placebo")
            .with_value(NumericField::InterventionEvents, 10.0)]);
        let key = facts.keys().next().unwrap();
        assert_eq!(key.outcome, "mortality");
        assert_eq!(key.arm, "drug a");
        assert_eq!(key.role, ArmRole::Intervention);
        assert_eq!(key.field, FieldKind::Events);
    }

    #[test]
    fn test_flatten_dedup_first_wins() {
        let records = vec![
            Record::new("d1", "Mortality", "Drug A", "Placebo")
                .with_value(NumericField::InterventionEvents, 10.0),
            Record::new("d1", "mortality", "drug a", "placebo")
                .with_value(NumericField::InterventionEvents, 99.0),
        ];
        let facts = flatten_facts(&records);
        assert_eq!(facts.len(), 1);
        assert_eq!(*facts.values().next().unwrap(), 10.0);
    }

    #[test]
    fn test_perfect_reproduction() {
        let result = reconcile(&gold(), &gold(), 0.01);
        assert_eq!(result.tp, 2);
        assert_eq!(result.fp_in_gold, 0);
        assert_eq!(result.missing, 0);
        assert_eq!(result.extra, 0);
        assert!((result.precision - 1.0).abs() < 1e-9);
        assert!((result.recall - 1.0).abs() < 1e-9);
        assert!((result.f1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_value_counts_against_both_rates() {
        let predictions = vec![Record::new("d1", "Mortality", "Drug A", "Placebo")
            .with_value(NumericField::InterventionEvents, 20.0)
            .with_value(NumericField::ComparatorEvents, 5.0)];
        let result = reconcile(&gold(), &predictions, 0.01);
        assert_eq!(result.tp, 1);
        assert_eq!(result.fp_in_gold, 1);
        assert!((result.precision - 0.5).abs() < 1e-9);
        assert!((result.recall - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_extra_never_penalized() {
        let baseline = reconcile(&gold(), &gold(), 0.01);

        // add a fact the reference knows nothing about
        let mut predictions = gold();
        predictions.push(
            Record::new("d1", "Invented outcome", "Drug A", "Placebo")
                .with_value(NumericField::InterventionEvents, 7.0),
        );
        let with_extra = reconcile(&gold(), &predictions, 0.01);

        assert_eq!(with_extra.extra, 1);
        assert_eq!(with_extra.precision, baseline.precision);
        assert_eq!(with_extra.recall, baseline.recall);
        assert_eq!(with_extra.f1, baseline.f1);
    }

    #[test]
    fn test_missing_fact_is_fn() {
        let predictions = vec![Record::new("d1", "Mortality", "Drug A", "Placebo")
            .with_value(NumericField::InterventionEvents, 10.0)];
        let result = reconcile(&gold(), &predictions, 0.01);
        assert_eq!(result.tp, 1);
        assert_eq!(result.missing, 1);
        assert!((result.recall - 0.5).abs() < 1e-9);
        assert!((result.precision - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_sides() {
        let empty: Vec<Record> = vec![];
        let all_missing = reconcile(&gold(), &empty, 0.01);
        assert_eq!(all_missing.missing, 2);
        assert_eq!(all_missing.recall, 0.0);
        assert_eq!(all_missing.precision, 0.0);
        assert_eq!(all_missing.f1, 0.0);

        let all_extra = reconcile(&empty, &gold(), 0.01);
        assert_eq!(all_extra.extra, 2);
        assert_eq!(all_extra.precision, 0.0);
    }
}
