//! # trialeval
//!
//! Calibrated reconciliation of machine-extracted clinical-trial outcome
//! records against a trusted reference dataset.
//!
//! Each record is one ICO observation (Intervention, Comparator, Outcome)
//! with up to eight numeric fields. Identity strings are free text subject
//! to paraphrase, typo, and truncation, so nothing here assumes exact
//! matches: records align by lexical similarity, values compare under
//! relative tolerance, and absence is scored as its own outcome.
//!
//! ## What you get
//!
//! | Concern | Where |
//! |---------|-------|
//! | Text/numeric canonicalization | [`normalize`] |
//! | Fuzzy identity similarity | [`similarity`] |
//! | Records and collections | [`record`] |
//! | Alignment, scoring, aggregation | [`eval`] |
//! | Bootstrap confidence intervals | [`eval::confidence`] |
//! | Open-world fact reconciliation | [`eval::openworld`] |
//!
//! ## Quick start
//!
//! ```
//! use trialeval::eval::{evaluate_corpus, EvalConfig};
//! use trialeval::record::{NumericField, PredictionSet, Record, ReferenceSet};
//!
//! let reference = ReferenceSet::from_records(vec![
//!     Record::new("doc1", "Mortality", "Drug A", "Placebo")
//!         .with_value(NumericField::InterventionEvents, 10.0),
//! ]);
//! let predictions = PredictionSet::from_records(vec![
//!     Record::new("doc1", "mortality rate", "drug a", "placebo")
//!         .with_value(NumericField::InterventionEvents, 10.0),
//! ]);
//!
//! let report = evaluate_corpus(&reference, &predictions, &EvalConfig::default());
//! println!("{}", report.render_summary());
//! assert_eq!(report.micro_rates.counts.tp, 1);
//! ```
//!
//! ## Design notes
//!
//! - A present-but-wrong value scores as a false negative, never also a
//!   false positive. This is deliberate and load-bearing; see
//!   [`eval::scorer`].
//! - Alignment is greedy and threshold-gated behind the
//!   [`eval::MatchStrategy`] trait so an optimal matcher can be swapped in
//!   without touching the scorer or aggregator.
//! - There is no global state: the reference dataset is passed into every
//!   evaluation call.
//! - Enable the `eval-parallel` feature to fan document evaluation out
//!   across a rayon pool.

#![warn(missing_docs)]

mod error;
pub mod eval;
pub mod normalize;
pub mod record;
pub mod similarity;

pub use error::{Error, Result};
pub use eval::{evaluate_corpus, evaluate_document, CorpusMetrics, DocumentMetrics, EvalConfig};
pub use record::{NumericField, OutcomeType, PredictionSet, Record, ReferenceSet};
