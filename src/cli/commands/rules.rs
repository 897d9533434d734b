//! Rules command implementation.
//!
//! The `relcheck rules` command lists every rule id that can appear in a
//! report, with a one-line description.

use crate::error::Result;
use crate::lint::RuleId;
use crate::ui::{ReportTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
#[derive(Debug, Default)]
pub struct RulesCommand;

impl RulesCommand {
    /// Create a new rules command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for RulesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let theme = if ui.use_colors() {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };
        let width = RuleId::ALL
            .iter()
            .map(|rule| rule.as_str().len())
            .max()
            .unwrap_or(0);

        for rule in RuleId::ALL {
            ui.message(&format!(
                "{}  {}",
                theme.key.apply_to(format!("{:<width$}", rule.as_str())),
                theme.dim.apply_to(rule.description())
            ));
        }

        Ok(CommandResult::success())
    }
}
