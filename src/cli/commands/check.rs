//! Check command implementation.
//!
//! The `relcheck check` command validates a release repository and prints
//! every problem found. It is also what runs when no subcommand is given.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::lint::{HumanFormatter, JsonFormatter, LintDiagnostic, LintFormatter, OutputFormat};
use crate::runner::Runner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Exit code when findings were reported.
const EXIT_FINDINGS: i32 = 1;

/// Exit code when the repository could not be validated at all.
const EXIT_FATAL: i32 = 2;

/// The check command implementation.
pub struct CheckCommand {
    repo_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(repo_root: &Path, args: CheckArgs) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            args,
        }
    }

    /// Get the repository root path.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Format diagnostics using the requested formatter.
    fn format_output(&self, diagnostics: &[LintDiagnostic], use_color: bool) -> String {
        let mut output = Vec::new();

        match self.args.format {
            OutputFormat::Json => {
                JsonFormatter::new().format(diagnostics, &mut output).ok();
            }
            OutputFormat::Human => {
                HumanFormatter::new(use_color)
                    .format(diagnostics, &mut output)
                    .ok();
            }
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let now = self.args.now.unwrap_or_else(Utc::now);
        tracing::debug!(
            "Checking {} at {}",
            self.repo_root.display(),
            now.to_rfc3339()
        );

        let report = match Runner::new(&self.repo_root, now).run() {
            Ok(report) => report,
            Err(e) => {
                ui.error(&format!("Error: {}", e));
                return Ok(CommandResult::failure(EXIT_FATAL));
            }
        };

        // A clean run is silent in human format
        if report.is_clean() && self.args.format == OutputFormat::Human {
            return Ok(CommandResult::success());
        }

        let output = self.format_output(report.diagnostics(), ui.use_colors());
        ui.message(output.trim_end());

        if report.is_clean() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_FINDINGS))
        }
    }
}
