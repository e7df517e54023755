//! ICO records and the collections evaluation runs over.
//!
//! A [`Record`] is one Intervention–Comparator–Outcome observation from a
//! clinical-trial report: three free-text identity fields plus eight
//! optional numeric slots (group sizes, event counts, means, standard
//! deviations for each arm). Absent is `None`, never zero-by-default:
//! "correctly predicted absence" is a first-class outcome downstream.

use crate::normalize::{normalize_text, numeric_from_json};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Which arm of the comparison a numeric field describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmRole {
    /// The intervention arm.
    Intervention,
    /// The comparator arm.
    Comparator,
}

impl ArmRole {
    /// Stable lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ArmRole::Intervention => "intervention",
            ArmRole::Comparator => "comparator",
        }
    }
}

/// The statistical quantity a numeric field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Number of participants in the arm.
    GroupSize,
    /// Number of events observed in the arm (binary outcomes).
    Events,
    /// Mean of the measured quantity (continuous outcomes).
    Mean,
    /// Standard deviation of the measured quantity (continuous outcomes).
    StandardDeviation,
}

impl FieldKind {
    /// Stable snake_case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::GroupSize => "group_size",
            FieldKind::Events => "events",
            FieldKind::Mean => "mean",
            FieldKind::StandardDeviation => "standard_deviation",
        }
    }
}

/// One of the eight numeric slots of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    /// Participants in the intervention arm.
    InterventionGroupSize,
    /// Participants in the comparator arm.
    ComparatorGroupSize,
    /// Events in the intervention arm.
    InterventionEvents,
    /// Events in the comparator arm.
    ComparatorEvents,
    /// Mean in the intervention arm.
    InterventionMean,
    /// Mean in the comparator arm.
    ComparatorMean,
    /// Standard deviation in the intervention arm.
    InterventionStandardDeviation,
    /// Standard deviation in the comparator arm.
    ComparatorStandardDeviation,
}

impl NumericField {
    /// All eight fields, in dataset column order.
    pub const ALL: [NumericField; 8] = [
        NumericField::InterventionGroupSize,
        NumericField::ComparatorGroupSize,
        NumericField::InterventionEvents,
        NumericField::ComparatorEvents,
        NumericField::InterventionMean,
        NumericField::ComparatorMean,
        NumericField::InterventionStandardDeviation,
        NumericField::ComparatorStandardDeviation,
    ];

    /// Required fields for a binary outcome's exact-match check.
    pub const BINARY_REQUIRED: [NumericField; 4] = [
        NumericField::InterventionGroupSize,
        NumericField::ComparatorGroupSize,
        NumericField::InterventionEvents,
        NumericField::ComparatorEvents,
    ];

    /// Required fields for a continuous outcome's exact-match check.
    pub const CONTINUOUS_REQUIRED: [NumericField; 6] = [
        NumericField::InterventionGroupSize,
        NumericField::ComparatorGroupSize,
        NumericField::InterventionMean,
        NumericField::ComparatorMean,
        NumericField::InterventionStandardDeviation,
        NumericField::ComparatorStandardDeviation,
    ];

    /// Stable snake_case name matching the dataset column.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::InterventionGroupSize => "intervention_group_size",
            NumericField::ComparatorGroupSize => "comparator_group_size",
            NumericField::InterventionEvents => "intervention_events",
            NumericField::ComparatorEvents => "comparator_events",
            NumericField::InterventionMean => "intervention_mean",
            NumericField::ComparatorMean => "comparator_mean",
            NumericField::InterventionStandardDeviation => "intervention_standard_deviation",
            NumericField::ComparatorStandardDeviation => "comparator_standard_deviation",
        }
    }

    /// The arm this field describes.
    #[must_use]
    pub fn role(&self) -> ArmRole {
        match self {
            NumericField::InterventionGroupSize
            | NumericField::InterventionEvents
            | NumericField::InterventionMean
            | NumericField::InterventionStandardDeviation => ArmRole::Intervention,
            _ => ArmRole::Comparator,
        }
    }

    /// The statistical quantity this field carries.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            NumericField::InterventionGroupSize | NumericField::ComparatorGroupSize => {
                FieldKind::GroupSize
            }
            NumericField::InterventionEvents | NumericField::ComparatorEvents => FieldKind::Events,
            NumericField::InterventionMean | NumericField::ComparatorMean => FieldKind::Mean,
            NumericField::InterventionStandardDeviation
            | NumericField::ComparatorStandardDeviation => FieldKind::StandardDeviation,
        }
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome type of a record, inferred from which field group is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeType {
    /// Event-count outcome (group sizes + events).
    Binary,
    /// Measured-quantity outcome (group sizes + means + standard deviations).
    Continuous,
    /// Neither or both field groups populated; excluded from exact-match
    /// statistics but surfaced in reports so callers can audit it.
    Unknown,
}

impl OutcomeType {
    /// Stable lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            OutcomeType::Binary => "binary",
            OutcomeType::Continuous => "continuous",
            OutcomeType::Unknown => "unknown",
        }
    }
}

/// One ICO observation: identity fields plus eight optional numeric slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque identifier grouping records into documents.
    pub document_id: String,
    /// Free-text outcome name.
    pub outcome: String,
    /// Free-text intervention name.
    pub intervention: String,
    /// Free-text comparator name.
    pub comparator: String,
    /// Declared outcome type, if the source carried one. Exact-match
    /// classification infers the type from populated fields regardless;
    /// this tag is carried metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_type: Option<OutcomeType>,
    /// Participants in the intervention arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_group_size: Option<f64>,
    /// Participants in the comparator arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_group_size: Option<f64>,
    /// Events in the intervention arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_events: Option<f64>,
    /// Events in the comparator arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_events: Option<f64>,
    /// Mean in the intervention arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_mean: Option<f64>,
    /// Mean in the comparator arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_mean: Option<f64>,
    /// Standard deviation in the intervention arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_standard_deviation: Option<f64>,
    /// Standard deviation in the comparator arm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator_standard_deviation: Option<f64>,
}

impl Record {
    /// Create a record with empty numeric slots.
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        outcome: impl Into<String>,
        intervention: impl Into<String>,
        comparator: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            outcome: outcome.into(),
            intervention: intervention.into(),
            comparator: comparator.into(),
            outcome_type: None,
            intervention_group_size: None,
            comparator_group_size: None,
            intervention_events: None,
            comparator_events: None,
            intervention_mean: None,
            comparator_mean: None,
            intervention_standard_deviation: None,
            comparator_standard_deviation: None,
        }
    }

    /// Builder-style setter for one numeric slot.
    #[must_use]
    pub fn with_value(mut self, field: NumericField, value: f64) -> Self {
        self.set_value(field, Some(value));
        self
    }

    /// Read one numeric slot.
    #[must_use]
    pub fn value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::InterventionGroupSize => self.intervention_group_size,
            NumericField::ComparatorGroupSize => self.comparator_group_size,
            NumericField::InterventionEvents => self.intervention_events,
            NumericField::ComparatorEvents => self.comparator_events,
            NumericField::InterventionMean => self.intervention_mean,
            NumericField::ComparatorMean => self.comparator_mean,
            NumericField::InterventionStandardDeviation => self.intervention_standard_deviation,
            NumericField::ComparatorStandardDeviation => self.comparator_standard_deviation,
        }
    }

    /// Write one numeric slot.
    pub fn set_value(&mut self, field: NumericField, value: Option<f64>) {
        let slot = match field {
            NumericField::InterventionGroupSize => &mut self.intervention_group_size,
            NumericField::ComparatorGroupSize => &mut self.comparator_group_size,
            NumericField::InterventionEvents => &mut self.intervention_events,
            NumericField::ComparatorEvents => &mut self.comparator_events,
            NumericField::InterventionMean => &mut self.intervention_mean,
            NumericField::ComparatorMean => &mut self.comparator_mean,
            NumericField::InterventionStandardDeviation => {
                &mut self.intervention_standard_deviation
            }
            NumericField::ComparatorStandardDeviation => &mut self.comparator_standard_deviation,
        };
        *slot = value;
    }

    /// Number of populated numeric slots.
    #[must_use]
    pub fn populated_fields(&self) -> usize {
        NumericField::ALL
            .iter()
            .filter(|f| self.value(**f).is_some())
            .count()
    }

    /// The normalized identity key used for alignment:
    /// `outcome | intervention | comparator`, each field normalized.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{} | {} | {}",
            normalize_text(&self.outcome),
            normalize_text(&self.intervention),
            normalize_text(&self.comparator),
        )
    }

    /// Infer the outcome type from which field group is populated.
    ///
    /// Events present and means absent → binary; means present and events
    /// absent → continuous; both or neither → unknown. The declared
    /// `outcome_type` tag is deliberately not consulted: the populated
    /// fields are the ground truth for what kind of comparison this is.
    #[must_use]
    pub fn inferred_outcome_type(&self) -> OutcomeType {
        let has_events =
            self.intervention_events.is_some() || self.comparator_events.is_some();
        let has_means = self.intervention_mean.is_some() || self.comparator_mean.is_some();

        match (has_events, has_means) {
            (true, false) => OutcomeType::Binary,
            (false, true) => OutcomeType::Continuous,
            _ => OutcomeType::Unknown,
        }
    }

    /// Parse a record from a lenient JSON object.
    ///
    /// Identity fields are required and must be strings; a record missing
    /// one is rejected with [`Error::Record`] so the rest of the batch can
    /// proceed. Numeric slots accept numbers or numeric-ish strings
    /// (normalized per [`crate::normalize`]); unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Record`] if the value is not an object or an identity field
    /// is missing or non-string.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::record("expected a JSON object"))?;

        let identity = |key: &str| -> Result<String> {
            obj.get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| Error::record(format!("missing required field: {key}")))
        };

        let document_id = match obj.get("document_id").or_else(|| obj.get("pmcid")) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(Error::record("missing required field: document_id")),
        };

        let mut record = Record::new(
            document_id,
            identity("outcome")?,
            identity("intervention")?,
            identity("comparator")?,
        );

        record.outcome_type = obj.get("outcome_type").and_then(|v| match v.as_str() {
            Some("binary") => Some(OutcomeType::Binary),
            Some("continuous") => Some(OutcomeType::Continuous),
            _ => None,
        });

        for field in NumericField::ALL {
            if let Some(raw) = obj.get(field.name()) {
                record.set_value(field, numeric_from_json(raw));
            }
        }

        Ok(record)
    }
}

/// The trusted reference dataset: an ordered, immutable record collection
/// partitioned by document id.
///
/// Constructed once per evaluation run and passed in explicitly; there is
/// no process-wide cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceSet {
    records: Vec<Record>,
    #[serde(skip)]
    by_document: HashMap<String, Vec<usize>>,
}

impl<'de> Deserialize<'de> for ReferenceSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            records: Vec<Record>,
        }
        // rebuild the document index dropped by serialization
        Ok(ReferenceSet::from_records(Raw::deserialize(deserializer)?.records))
    }
}

impl ReferenceSet {
    /// Build a reference set from records, preserving input order.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut by_document: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_document
                .entry(record.document_id.clone())
                .or_default()
                .push(idx);
        }
        Self {
            records,
            by_document,
        }
    }

    /// Parse a reference dataset from a JSON array payload.
    ///
    /// The reference is trusted input, so problems here are fatal: an
    /// undecodable payload, a non-array shape, or any malformed record
    /// aborts with [`Error::Dataset`] naming the cause. (Prediction
    /// parsing is lenient instead; see
    /// [`PredictionSet::from_json_str`].)
    ///
    /// # Errors
    ///
    /// [`Error::Dataset`] as described above.
    pub fn from_json_str(payload: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| Error::dataset(format!("undecodable reference dataset: {e}")))?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::dataset("reference dataset must be a JSON array"))?;

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let record = Record::from_json(item)
                .map_err(|e| Error::dataset(format!("reference record {idx}: {e}")))?;
            records.push(record);
        }
        Ok(Self::from_records(records))
    }

    /// All records, in input order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records belonging to one document, in input order.
    #[must_use]
    pub fn document(&self, document_id: &str) -> Vec<&Record> {
        self.by_document
            .get(document_id)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Whether the reference contains any records for a document.
    #[must_use]
    pub fn contains_document(&self, document_id: &str) -> bool {
        self.by_document.contains_key(document_id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Predicted records grouped per document.
///
/// Documents iterate in sorted id order so evaluation output is
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionSet {
    by_document: BTreeMap<String, Vec<Record>>,
}

impl PredictionSet {
    /// Empty prediction set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat record list by each record's own document id,
    /// preserving per-document order.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.by_document
                .entry(record.document_id.clone())
                .or_default()
                .push(record);
        }
        set
    }

    /// Parse predictions from a JSON array payload, leniently.
    ///
    /// Malformed records are rejected individually and reported back as
    /// warnings; the rest of the batch proceeds. Only an undecodable or
    /// non-array payload is an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the payload is not a JSON array.
    pub fn from_json_str(payload: &str) -> Result<(Self, Vec<String>)> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| Error::invalid_input(format!("undecodable predictions: {e}")))?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::invalid_input("predictions must be a JSON array"))?;

        let mut records = Vec::new();
        let mut warnings = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            match Record::from_json(item) {
                Ok(record) => records.push(record),
                Err(e) => warnings.push(format!("prediction record {idx} rejected: {e}")),
            }
        }
        Ok((Self::from_records(records), warnings))
    }

    /// Register a document's predictions. An empty list is meaningful: it
    /// marks the document as evaluated with zero extractions.
    pub fn insert(&mut self, document_id: impl Into<String>, records: Vec<Record>) {
        self.by_document
            .entry(document_id.into())
            .or_default()
            .extend(records);
    }

    /// Iterate `(document_id, records)` in sorted document order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.by_document
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    /// Number of documents.
    #[must_use]
    pub fn num_documents(&self) -> usize {
        self.by_document.len()
    }

    /// Total number of records across documents.
    #[must_use]
    pub fn num_records(&self) -> usize {
        self.by_document.values().map(Vec::len).sum()
    }

    /// Whether the set has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_document.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_table_covers_all_slots() {
        let mut record = Record::new("d1", "o", "i", "c");
        for (n, field) in NumericField::ALL.iter().enumerate() {
            record.set_value(*field, Some(n as f64));
        }
        for (n, field) in NumericField::ALL.iter().enumerate() {
            assert_eq!(record.value(*field), Some(n as f64));
        }
        assert_eq!(record.populated_fields(), 8);
    }

    #[test]
    fn test_identity_key_normalizes() {
        let record = Record::new("d1", "  Mortality  Rate ", "Drug A", "PLACEBO");
        assert_eq!(record.identity_key(), "mortality rate | drug a | placebo");
    }

    #[test]
    fn test_outcome_type_inference() {
        let binary = Record::new("d", "o", "i", "c")
            .with_value(NumericField::InterventionEvents, 10.0);
        assert_eq!(binary.inferred_outcome_type(), OutcomeType::Binary);

        let continuous = Record::new("d", "o", "i", "c")
            .with_value(NumericField::ComparatorMean, 1.5);
        assert_eq!(continuous.inferred_outcome_type(), OutcomeType::Continuous);

        let neither = Record::new("d", "o", "i", "c");
        assert_eq!(neither.inferred_outcome_type(), OutcomeType::Unknown);

        let both = Record::new("d", "o", "i", "c")
            .with_value(NumericField::InterventionEvents, 10.0)
            .with_value(NumericField::InterventionMean, 2.0);
        assert_eq!(both.inferred_outcome_type(), OutcomeType::Unknown);
    }

    #[test]
    fn test_from_json_accepts_string_numbers() {
        let record = Record::from_json(&json!({
            "document_id": "4132222",
            "outcome": "Mortality",
            "intervention": "Drug A",
            "comparator": "Placebo",
            "intervention_events": "1,200",
            "comparator_events": "NR",
            "intervention_group_size": 100,
        }))
        .unwrap();

        assert_eq!(record.intervention_events, Some(1200.0));
        assert_eq!(record.comparator_events, None);
        assert_eq!(record.intervention_group_size, Some(100.0));
    }

    #[test]
    fn test_from_json_numeric_document_id() {
        let record = Record::from_json(&json!({
            "pmcid": 4132222,
            "outcome": "o",
            "intervention": "i",
            "comparator": "c",
        }))
        .unwrap();
        assert_eq!(record.document_id, "4132222");
    }

    #[test]
    fn test_from_json_rejects_missing_identity() {
        let err = Record::from_json(&json!({
            "document_id": "d1",
            "outcome": "o",
            "comparator": "c",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("intervention"));
    }

    #[test]
    fn test_reference_set_partitions_by_document() {
        let reference = ReferenceSet::from_records(vec![
            Record::new("d1", "o1", "i", "c"),
            Record::new("d2", "o2", "i", "c"),
            Record::new("d1", "o3", "i", "c"),
        ]);

        let d1 = reference.document("d1");
        assert_eq!(d1.len(), 2);
        assert_eq!(d1[0].outcome, "o1");
        assert_eq!(d1[1].outcome, "o3");
        assert!(reference.contains_document("d2"));
        assert!(!reference.contains_document("d3"));
        assert!(reference.document("d3").is_empty());
    }

    #[test]
    fn test_prediction_set_groups_and_sorts() {
        let predictions = PredictionSet::from_records(vec![
            Record::new("d2", "o1", "i", "c"),
            Record::new("d1", "o2", "i", "c"),
            Record::new("d2", "o3", "i", "c"),
        ]);

        let docs: Vec<&str> = predictions.documents().map(|(id, _)| id).collect();
        assert_eq!(docs, vec!["d1", "d2"]);
        assert_eq!(predictions.num_records(), 3);
    }

    #[test]
    fn test_reference_from_json_str_is_strict() {
        let good = r#"[{"document_id": "d1", "outcome": "o", "intervention": "i", "comparator": "c"}]"#;
        let reference = ReferenceSet::from_json_str(good).unwrap();
        assert_eq!(reference.len(), 1);

        let malformed =
            r#"[{"document_id": "d1", "outcome": "o", "comparator": "c"}]"#;
        let err = ReferenceSet::from_json_str(malformed).unwrap_err();
        assert!(matches!(err, crate::Error::Dataset(_)));

        assert!(ReferenceSet::from_json_str("not json").is_err());
        assert!(ReferenceSet::from_json_str("{}").is_err());
    }

    #[test]
    fn test_predictions_from_json_str_is_lenient() {
        let payload = r#"[
            {"document_id": "d1", "outcome": "o", "intervention": "i", "comparator": "c"},
            {"document_id": "d1", "outcome": "o"}
        ]"#;
        let (predictions, warnings) = PredictionSet::from_json_str(payload).unwrap();
        assert_eq!(predictions.num_records(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("record 1"));
    }

    #[test]
    fn test_reference_set_round_trips_with_index() {
        let reference = ReferenceSet::from_records(vec![
            Record::new("d1", "o1", "i", "c"),
            Record::new("d2", "o2", "i", "c"),
        ]);
        let json = serde_json::to_string(&reference).unwrap();
        let restored: ReferenceSet = serde_json::from_str(&json).unwrap();

        // the document index is rebuilt, not serialized
        assert_eq!(restored.document("d2").len(), 1);
        assert_eq!(restored.records(), reference.records());
    }

    #[test]
    fn test_prediction_set_empty_document_is_meaningful() {
        let mut predictions = PredictionSet::new();
        predictions.insert("d1", vec![]);
        assert_eq!(predictions.num_documents(), 1);
        assert_eq!(predictions.num_records(), 0);
    }
}
