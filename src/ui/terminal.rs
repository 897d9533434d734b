//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, ReportTheme, UserInterface};

/// Terminal UI implementation.
///
/// Reports go to stdout; errors go to stderr so a CI gate can capture the
/// report on its own.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ReportTheme,
    colors: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let colors = should_use_colors();
        let theme = if colors {
            ReportTheme::new()
        } else {
            ReportTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            colors,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn use_colors(&self) -> bool {
        self.colors
    }
}
