//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    repo_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given repository root.
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    /// Get the repository root path.
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand the repository is checked, using the same
    /// `--format` and `--now` values as `check`.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check) | None => {
                let cmd = super::check::CheckCommand::new(&self.repo_root, cli.check.clone());
                cmd.execute(ui)
            }
            Some(Commands::Rules) => super::rules::RulesCommand::new().execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.repo_root(), Path::new("/test"));
    }

    #[test]
    fn no_subcommand_runs_check() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::parse_from(["relcheck"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&cli, &mut ui)
            .unwrap();

        // Empty directory: config.yml is missing
        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("config.yml not found"));
    }

    #[test]
    fn no_subcommand_honours_now() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("manifests")).unwrap();
        fs::create_dir(temp.path().join("notes")).unwrap();
        fs::write(
            temp.path().join("config.yml"),
            "apps:\n  - name: pos\n    environments: [live]\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("manifests/pos--live.yml"),
            "versions:\n  \"1.0.0\":\n    released_at: 2025-01-01\n    matchers:\n      - {type: default, severity: green}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("notes/pos--1.0.0.yml"),
            "locales:\n  - name: en-en\n    notes: Launch\n",
        )
        .unwrap();

        let pinned = Cli::parse_from(["relcheck", "--now", "2025-07-01T00:00:00Z"]);
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&pinned, &mut ui)
            .unwrap();
        assert!(result.success, "{:?}", ui.messages());

        // A year and a half later the same release is stale
        let later = Cli::parse_from(["relcheck", "--now", "2026-07-01T00:00:00Z"]);
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&later, &mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("error[stale-release]"));
    }

    #[test]
    fn rules_subcommand() {
        let cli = Cli::parse_from(["relcheck", "rules"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(PathBuf::from("."))
            .dispatch(&cli, &mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("orphan-notes"));
    }
}
