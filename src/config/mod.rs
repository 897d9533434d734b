//! Registry loading and validation.
//!
//! This module handles the `config.yml` registry:
//! - Repository layout and file discovery in [`loader`]
//! - Validation into a [`Registry`] in [`registry`]
//!
//! # Example
//!
//! ```
//! use relcheck::config::{validate, FALLBACK_LOCALE};
//!
//! let document = serde_yaml::from_str(
//!     "apps:\n  - name: pos\n    environments: [live]\nlocales: [en-en, nl-NL]\n",
//! )
//! .unwrap();
//!
//! let (registry, diagnostics) = validate(&document);
//! assert!(diagnostics.is_empty());
//! assert!(registry.has_environment("pos", "live"));
//! assert!(registry.has_locale(FALLBACK_LOCALE));
//! ```

pub mod loader;
pub mod registry;

pub use loader::{load, manifest_path, notes_path, Layout, CONFIG_FILE, MANIFESTS_DIR, NOTES_DIR};
pub use registry::{is_valid_name, validate, AppEntry, Registry, FALLBACK_LOCALE};
