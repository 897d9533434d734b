//! Lint diagnostic messages.
//!
//! This module provides the [`LintDiagnostic`] type for representing
//! issues found while validating a release repository. Each diagnostic
//! names the repository-relative file it concerns so reports can be
//! grouped per file.

use super::rule::RuleId;

/// A diagnostic message produced by a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintDiagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: RuleId,
    /// Repository-relative file (`config.yml`, `manifests/pos--live.yml`).
    pub file: String,
    /// Human-readable message.
    pub message: String,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl LintDiagnostic {
    /// Create a new diagnostic.
    pub fn new(rule_id: RuleId, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            file: file.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Whether two diagnostics report the same finding.
    ///
    /// Suggestions are ignored: the same finding reached through two checks
    /// may carry different hints.
    pub fn same_finding(&self, other: &LintDiagnostic) -> bool {
        self.rule_id == other.rule_id && self.file == other.file && self.message == other.message
    }
}

impl std::fmt::Display for LintDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_creation() {
        let diag = LintDiagnostic::new(
            RuleId::OrphanNotes,
            "notes/pos--1.0.0.yml",
            "Version 1.0.0 not referenced in any manifest file",
        );

        assert_eq!(diag.rule_id, RuleId::OrphanNotes);
        assert_eq!(diag.file, "notes/pos--1.0.0.yml");
        assert!(diag.suggestion.is_none());
    }

    #[test]
    fn diagnostic_with_suggestion() {
        let diag = LintDiagnostic::new(RuleId::BadPattern, "manifests/POS.yml", "bad name")
            .with_suggestion("Rename to {app}--{environment}.yml");

        assert_eq!(
            diag.suggestion.as_deref(),
            Some("Rename to {app}--{environment}.yml")
        );
    }

    #[test]
    fn same_finding_ignores_suggestion() {
        let a = LintDiagnostic::new(RuleId::UnknownApp, "notes/x--1.0.0.yml", "App 'x'");
        let b = a.clone().with_suggestion("Declare it");
        let c = LintDiagnostic::new(RuleId::UnknownApp, "notes/y--1.0.0.yml", "App 'x'");

        assert!(a.same_finding(&b));
        assert!(!a.same_finding(&c));
    }

    #[test]
    fn display_prefixes_file() {
        let diag = LintDiagnostic::new(RuleId::NoVersions, "manifests/pos--live.yml", "No versions defined");
        assert_eq!(diag.to_string(), "manifests/pos--live.yml: No versions defined");
    }
}
