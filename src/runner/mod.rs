//! Validation driver.
//!
//! Runs every check over a release repository in a fixed order: registry,
//! manifests, notes, then cross-file consistency. Per-file validators hand
//! back their findings and the driver owns the single list that ends up in
//! the [`Report`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use relcheck::runner::Runner;
//!
//! let report = Runner::new(Path::new("."), chrono::Utc::now()).run()?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! # Ok::<(), relcheck::RelcheckError>(())
//! ```

pub mod report;

pub use report::Report;

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{self, manifest_path, notes_path, Layout, Registry, CONFIG_FILE};
use crate::cross;
use crate::document;
use crate::error::Result;
use crate::lint::{LintDiagnostic, RuleId};
use crate::manifest::{self, Manifest, ManifestKey, ManifestValidator};
use crate::notes::{self, NotesKey, NotesValidator};

/// Validates one repository at a fixed instant.
#[derive(Debug, Clone)]
pub struct Runner {
    layout: Layout,
    now: DateTime<Utc>,
}

impl Runner {
    /// Create a runner for the repository at `root`.
    pub fn new(root: &Path, now: DateTime<Utc>) -> Self {
        Self {
            layout: Layout::discover(root),
            now,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Run every check and collect the findings.
    ///
    /// # Errors
    ///
    /// Fails only on setup problems: `config.yml` missing or not YAML, or
    /// the `manifests/` or `notes/` directory missing. Everything else is
    /// reported in the returned [`Report`].
    pub fn run(&self) -> Result<Report> {
        self.layout.ensure_present()?;

        let document = config::load(&self.layout.config)?;
        let (registry, config_errors) = config::validate(&document);
        if !config_errors.is_empty() {
            info!(
                "{} has {} problem(s), skipping per-file checks",
                CONFIG_FILE,
                config_errors.len()
            );
            return Ok(Report::new(config_errors));
        }
        debug!(
            "Registry: {} app(s), {} locale(s)",
            registry.apps().len(),
            registry.locales().len()
        );

        let mut diagnostics = Vec::new();
        let manifests = self.check_manifests(&registry, &mut diagnostics)?;
        let notes = self.check_notes(&registry, &mut diagnostics)?;
        diagnostics.extend(cross::validate(&registry, &manifests, &notes));

        let report = Report::new(diagnostics);
        info!(
            "Checked {} manifest(s) and {} notes file(s): {} problem(s)",
            manifests.len(),
            notes.len(),
            report.len()
        );
        Ok(report)
    }

    fn check_manifests(
        &self,
        registry: &Registry,
        diagnostics: &mut Vec<LintDiagnostic>,
    ) -> Result<Vec<(ManifestKey, Manifest)>> {
        let validator = ManifestValidator::new(registry, self.now);
        let mut parsed = Vec::new();

        for name in self.layout.manifest_files()? {
            let file = manifest_path(&name);
            debug!("Checking {}", file);

            if let Err(diag) = validator.validate_filename(&name, &file) {
                let excluded = diag.rule_id == RuleId::BadPattern;
                diagnostics.push(diag);
                if excluded {
                    continue;
                }
            }
            let Some(key) = manifest::parse_filename(&name) else {
                continue;
            };

            let manifest = match document::load(&self.layout.manifests_dir.join(&name)) {
                Ok(document) => {
                    let (manifest, found) = validator.validate(&file, &document);
                    diagnostics.extend(found);
                    manifest
                }
                Err(e) => {
                    diagnostics.push(e.into_diagnostic(&file));
                    Manifest::default()
                }
            };
            parsed.push((key, manifest));
        }

        Ok(parsed)
    }

    fn check_notes(
        &self,
        registry: &Registry,
        diagnostics: &mut Vec<LintDiagnostic>,
    ) -> Result<Vec<NotesKey>> {
        let validator = NotesValidator::new(registry);
        let mut keys = Vec::new();

        for name in self.layout.notes_files()? {
            let file = notes_path(&name);
            debug!("Checking {}", file);

            if let Err(found) = validator.validate_filename(&name, &file) {
                let excluded = found.iter().any(|d| d.rule_id == RuleId::BadPattern);
                diagnostics.extend(found);
                if excluded {
                    continue;
                }
            }

            match document::load(&self.layout.notes_dir.join(&name)) {
                Ok(document) => {
                    let (_, found) = validator.validate(&file, &document);
                    diagnostics.extend(found);
                }
                Err(e) => diagnostics.push(e.into_diagnostic(&file)),
            }

            if let Some(key) = notes::parse_filename(&name) {
                keys.push(key);
            }
        }

        Ok(keys)
    }
}

/// Validate the repository at `root` at the instant `now`.
pub fn run(root: &Path, now: DateTime<Utc>) -> Result<Report> {
    Runner::new(root, now).run()
}
