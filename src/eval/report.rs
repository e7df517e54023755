//! Human-readable rendering of corpus metrics.
//!
//! The report structure itself is the product; this module is the minimal
//! audit surface on top of it: a plain-text summary and a compact
//! markdown table. Anything richer (CSV, LaTeX) is a caller concern.

use crate::eval::aggregate::CorpusMetrics;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Provenance stamped onto a rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp of rendering.
    pub timestamp: String,
    /// Version of the producing crate.
    pub version: String,
}

impl ReportMetadata {
    /// Capture the current time and crate version.
    #[must_use]
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl CorpusMetrics {
    /// Format the headline rates as a markdown table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        format!(
            "| Average | Precision | Recall | F1 |\n\
             |---------|-----------|--------|----|\n\
             | Micro   | {:.1}% | {:.1}% | {:.1}% |\n\
             | Macro   | {:.1}% | {:.1}% | {:.1}% |",
            self.micro_rates.precision * 100.0,
            self.micro_rates.recall * 100.0,
            self.micro_rates.f1 * 100.0,
            self.macro_rates.precision * 100.0,
            self.macro_rates.recall * 100.0,
            self.macro_rates.f1 * 100.0,
        )
    }

    /// Render the full plain-text summary: pooled confusion cells, micro
    /// and macro rates, error metrics, exact-match accuracy, per-field
    /// breakdown, and any accumulated warnings.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let counts = &self.micro_rates.counts;

        let _ = writeln!(out, "Documents evaluated: {}", self.num_documents);
        let _ = writeln!(out);
        let _ = writeln!(out, "Micro-averaged (field-level):");
        let _ = writeln!(
            out,
            "  TP={} FP={} FN={} TN={}",
            counts.tp, counts.fp, counts.fn_, counts.tn
        );
        let _ = writeln!(out, "  Precision: {:.4}", self.micro_rates.precision);
        let _ = writeln!(out, "  Recall:    {:.4}", self.micro_rates.recall);
        let _ = writeln!(out, "  F1:        {:.4}", self.micro_rates.f1);
        let _ = writeln!(out);
        let _ = writeln!(out, "Macro-averaged (document-level):");
        let _ = writeln!(out, "  Precision: {:.4}", self.macro_rates.precision);
        let _ = writeln!(out, "  Recall:    {:.4}", self.macro_rates.recall);
        let _ = writeln!(out, "  F1:        {:.4}", self.macro_rates.f1);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Error: MSE={:.4} RMSE={:.4} ({} comparisons)",
            self.mse(),
            self.rmse(),
            self.error.comparisons
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Exact match: {:.4} ({}/{})",
            self.exact_match_accuracy(),
            self.exact.overall.correct,
            self.exact.overall.total
        );
        let _ = writeln!(
            out,
            "  Binary:     {:.4} ({}/{})",
            self.exact.binary.accuracy(),
            self.exact.binary.correct,
            self.exact.binary.total
        );
        let _ = writeln!(
            out,
            "  Continuous: {:.4} ({}/{})",
            self.exact.continuous.accuracy(),
            self.exact.continuous.correct,
            self.exact.continuous.total
        );
        if self.exact.unknown > 0 {
            let _ = writeln!(
                out,
                "  Unknown type (excluded): {}",
                self.exact.unknown
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Per-field (micro):");
        for (field, stats) in &self.per_field {
            let _ = writeln!(
                out,
                "  {:34} P={:.4} R={:.4} F1={:.4} MSE={:.4} (TP={}, FP={}, FN={}, TN={})",
                field.name(),
                stats.counts.precision(),
                stats.counts.recall(),
                stats.counts.f1(),
                stats.error.mse(),
                stats.counts.tp,
                stats.counts.fp,
                stats.counts.fn_,
                stats.counts.tn
            );
        }

        if !self.warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Warnings:");
            for warning in &self.warnings {
                let _ = writeln!(out, "  - {warning}");
            }
        }

        out
    }
}
