//! Human-readable output formatter.
//!
//! Formats lint diagnostics for terminal display, grouped by file, with
//! optional color support.

use super::LintFormatter;
use crate::lint::LintDiagnostic;
use crate::ui::ReportTheme;
use std::io::Write;

/// Formats lint output for human consumption.
pub struct HumanFormatter {
    theme: ReportTheme,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        let theme = if use_color {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };
        Self { theme }
    }
}

/// Group diagnostics by file, keeping first-appearance order.
fn group_by_file(diagnostics: &[LintDiagnostic]) -> Vec<(&str, Vec<&LintDiagnostic>)> {
    let mut groups: Vec<(&str, Vec<&LintDiagnostic>)> = Vec::new();
    for diag in diagnostics {
        match groups.iter_mut().find(|(file, _)| *file == diag.file) {
            Some((_, entries)) => entries.push(diag),
            None => groups.push((diag.file.as_str(), vec![diag])),
        }
    }
    groups
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        writeln!(writer, "{}", self.theme.header.apply_to("Validation failed:"))?;
        writeln!(writer)?;

        for (file, entries) in group_by_file(diagnostics) {
            writeln!(writer, "{}:", self.theme.file.apply_to(file))?;
            for diag in entries {
                // - error[rule-id]: message
                writeln!(
                    writer,
                    "  - {}: {}",
                    self.theme
                        .error
                        .apply_to(format!("error[{}]", diag.rule_id)),
                    diag.message
                )?;
                if let Some(ref suggestion) = diag.suggestion {
                    writeln!(
                        writer,
                        "    {}",
                        self.theme.hint.apply_to(format!("help: {}", suggestion))
                    )?;
                }
            }
            writeln!(writer)?;
        }

        writeln!(writer, "Found {} error(s)", diagnostics.len())?;

        Ok(())
    }
}
