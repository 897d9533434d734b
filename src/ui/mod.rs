//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing reports to stdout and errors to stderr
//! - [`MockUI`] capturing output for tests
//! - [`ReportTheme`] colour styles
//!
//! # Example
//!
//! ```
//! use relcheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("manifests/pos--live.yml: No versions defined");
//! assert!(ui.has_message("No versions defined"));
//! ```

pub mod mock;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, ReportTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Whether coloured output is wanted.
    fn use_colors(&self) -> bool;
}
