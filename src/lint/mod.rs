//! Diagnostics and reporting.
//!
//! Every check in the engine produces [`LintDiagnostic`]s tagged with a
//! [`RuleId`]. Nothing here decides validity; it only describes and
//! renders findings.
//!
//! # Example
//!
//! ```
//! use relcheck::lint::{HumanFormatter, LintDiagnostic, LintFormatter, RuleId};
//!
//! let diagnostics = vec![LintDiagnostic::new(
//!     RuleId::OrphanNotes,
//!     "notes/pos--1.0.0.yml",
//!     "Version 1.0.0 not referenced in any manifest file",
//! )];
//!
//! let mut out = Vec::new();
//! HumanFormatter::new(false).format(&diagnostics, &mut out).unwrap();
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.contains("error[orphan-notes]"));
//! ```

pub mod diagnostic;
pub mod output;
pub mod rule;

pub use diagnostic::LintDiagnostic;
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat};
pub use rule::RuleId;
