//! Collected result of a validation run.

use crate::lint::LintDiagnostic;

/// Every finding from one run, deduplicated and grouped by file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    diagnostics: Vec<LintDiagnostic>,
}

impl Report {
    /// Build a report from diagnostics in discovery order.
    ///
    /// Repeated findings (same rule, file and message) are dropped and the
    /// rest are stably sorted by file.
    pub fn new(found: Vec<LintDiagnostic>) -> Self {
        let mut diagnostics: Vec<LintDiagnostic> = Vec::with_capacity(found.len());
        for diag in found {
            if !diagnostics.iter().any(|d| d.same_finding(&diag)) {
                diagnostics.push(diag);
            }
        }
        diagnostics.sort_by(|a, b| a.file.cmp(&b.file));
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Plain `file: message` lines, one per finding.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}
