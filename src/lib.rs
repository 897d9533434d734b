//! relcheck - Validation engine for release manifest repositories.
//!
//! A release repository holds a registry (`config.yml`), one manifest per
//! app/environment pair (`manifests/{app}--{environment}.yml`) and one
//! notes file per released version (`notes/{app}--{version}.yml`).
//! relcheck checks each file on its own, then checks them against each
//! other, and reports every problem at once.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Repository layout and registry validation
//! - [`cross`] - Consistency checks across files
//! - [`document`] - Untyped YAML loading
//! - [`error`] - Fatal error types and result aliases
//! - [`lint`] - Diagnostics, rule ids and output formatters
//! - [`manifest`] - Manifest validation
//! - [`notes`] - Notes validation
//! - [`runner`] - Validation driver
//! - [`semver`] - `major.minor.patch` versions
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use relcheck::semver::{compare, Version};
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare("9.0.0", "10.0.0"), Ok(Ordering::Less));
//! assert_eq!(Version::parse("1.2.3").unwrap().to_string(), "1.2.3");
//! ```
//!
//! For whole-repository validation, see [`runner::Runner`] and the
//! integration tests.

pub mod cli;
pub mod config;
pub mod cross;
pub mod document;
pub mod error;
pub mod lint;
pub mod manifest;
pub mod notes;
pub mod runner;
pub mod semver;
pub mod ui;

pub use error::{RelcheckError, Result};
