//! Manifest validation.
//!
//! A manifest (`manifests/{app}--{environment}.yml`) records the release
//! history of one app/environment pair:
//!
//! ```yaml
//! versions:
//!   "1.0.0":
//!     released_at: 2026-01-01T00:00:00Z
//!     matchers:
//!       - type: default
//!         severity: green
//! ```
//!
//! Every check is independent: a malformed entry is reported and the rest
//! of the file is still examined. Only an unreadable or unparseable file
//! collapses to a single diagnostic, and that happens in the runner.

pub mod matcher;
pub mod timestamp;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_yaml::Value;

use crate::config::Registry;
use crate::document::{describe, field, shape_name};
use crate::lint::{LintDiagnostic, RuleId};
use crate::semver::Version;

pub use matcher::{Criterion, Matcher, MatcherType, Severity};

static FILENAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)--([a-z]+)\.yml$").expect("valid manifest filename regex"));

/// Identity of a manifest file: the (app, environment) pair it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestKey {
    pub app: String,
    pub environment: String,
}

impl ManifestKey {
    pub fn new(app: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            environment: environment.into(),
        }
    }

    /// `{app}--{environment}.yml`
    pub fn file_name(&self) -> String {
        format!("{}--{}.yml", self.app, self.environment)
    }
}

/// One released version that passed the version-format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Version key exactly as written in the file.
    pub key: String,
    pub version: Version,
    pub released_at: Option<DateTime<Utc>>,
    pub matchers: Vec<Matcher>,
}

/// Parsed content of a manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub releases: Vec<Release>,
}

impl Manifest {
    /// Version keys that parsed as semantic versions.
    pub fn version_keys(&self) -> impl Iterator<Item = &str> {
        self.releases.iter().map(|r| r.key.as_str())
    }
}

/// Split a manifest filename into its pair without consulting the registry.
pub fn parse_filename(name: &str) -> Option<ManifestKey> {
    let caps = FILENAME_PATTERN.captures(name)?;
    Some(ManifestKey::new(&caps[1], &caps[2]))
}

/// Validates manifests against a registry at a fixed instant.
pub struct ManifestValidator<'a> {
    registry: &'a Registry,
    now: DateTime<Utc>,
}

impl<'a> ManifestValidator<'a> {
    /// Create a validator. `now` anchors the future and 12-month checks.
    pub fn new(registry: &'a Registry, now: DateTime<Utc>) -> Self {
        Self { registry, now }
    }

    /// Check a manifest filename against the registry.
    ///
    /// `file` is the repository-relative path used in diagnostics.
    pub fn validate_filename(&self, name: &str, file: &str) -> Result<ManifestKey, LintDiagnostic> {
        let Some(key) = parse_filename(name) else {
            return Err(LintDiagnostic::new(
                RuleId::BadPattern,
                file,
                "Invalid filename format (expected {app}--{environment}.yml)",
            )
            .with_suggestion("Use lowercase letters only for app and environment"));
        };

        if !self.registry.has_app(&key.app) {
            return Err(LintDiagnostic::new(
                RuleId::UnknownApp,
                file,
                format!("App '{}' not defined in config.yml", key.app),
            ));
        }
        if !self.registry.has_environment(&key.app, &key.environment) {
            return Err(LintDiagnostic::new(
                RuleId::UnknownEnvironment,
                file,
                format!(
                    "Environment '{}' not defined for app '{}' in config.yml",
                    key.environment, key.app
                ),
            ));
        }
        Ok(key)
    }

    /// Validate a manifest document.
    pub fn validate(&self, file: &str, document: &Value) -> (Manifest, Vec<LintDiagnostic>) {
        let mut diagnostics = Vec::new();
        let mut manifest = Manifest::default();

        let Some(versions) = field(document, "versions") else {
            diagnostics.push(LintDiagnostic::new(
                RuleId::MissingField,
                file,
                "Missing 'versions' key",
            ));
            return (manifest, diagnostics);
        };

        let versions = match versions {
            Value::Mapping(versions) if versions.is_empty() => {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::NoVersions,
                    file,
                    "No versions defined",
                ));
                return (manifest, diagnostics);
            }
            Value::Mapping(versions) => versions,
            other => {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::InvalidVersionsType,
                    file,
                    format!("'versions' must be a mapping, found {}", shape_name(other)),
                ));
                return (manifest, diagnostics);
            }
        };

        let window_start = timestamp::window_start(self.now);
        let mut previous_version: Option<(Version, String)> = None;
        let mut previous_release: Option<(DateTime<Utc>, String)> = None;

        for (raw_key, details) in versions {
            let label = match raw_key {
                Value::String(s) => s.clone(),
                other => describe(other),
            };
            let err = |rule_id: RuleId, message: String| {
                LintDiagnostic::new(rule_id, file, format!("Version {}: {}", label, message))
            };

            // Version format and ordering
            let version = match raw_key.as_str().map(Version::parse) {
                Some(Ok(version)) => Some(version),
                _ => {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::InvalidFormat,
                        file,
                        format!("Invalid semantic version format: {}", label),
                    ));
                    None
                }
            };
            if let Some(version) = version {
                if let Some((prev, prev_label)) = &previous_version {
                    if version <= *prev {
                        diagnostics.push(LintDiagnostic::new(
                            RuleId::VersionOrder,
                            file,
                            format!("Versions not in ascending order: {} -> {}", prev_label, label),
                        ));
                    }
                }
                previous_version = Some((version, label.clone()));
            }

            let Some(details) = details.as_mapping() else {
                diagnostics.push(err(
                    RuleId::InvalidVersionDetails,
                    format!("version details must be a mapping, found {}", shape_name(details)),
                ));
                continue;
            };

            // Release timestamp
            let released_at = match details.get("released_at") {
                None => {
                    diagnostics.push(err(RuleId::MissingField, "missing 'released_at'".into()));
                    None
                }
                Some(raw) => {
                    let parsed = timestamp::parse(raw);
                    if parsed.is_none() {
                        diagnostics.push(err(
                            RuleId::InvalidTimestamp,
                            format!("invalid ISO 8601 timestamp {}", describe(raw)),
                        ));
                    }
                    parsed
                }
            };
            if let Some(released_at) = released_at {
                let shown = timestamp::display(&released_at);
                if released_at > self.now {
                    diagnostics.push(err(
                        RuleId::FutureRelease,
                        format!("released_at {} is in the future", shown),
                    ));
                }
                if window_start.is_some_and(|start| released_at < start) {
                    diagnostics.push(err(
                        RuleId::StaleRelease,
                        format!(
                            "released_at {} is more than {} months old",
                            shown,
                            timestamp::RELEASE_WINDOW_MONTHS
                        ),
                    ));
                }
                if let Some((prev_at, prev_label)) = &previous_release {
                    if released_at < *prev_at {
                        diagnostics.push(err(
                            RuleId::ChronologicalOrder,
                            format!(
                                "released_at {} is earlier than version {} ({})",
                                shown,
                                prev_label,
                                timestamp::display(prev_at)
                            ),
                        ));
                    }
                }
                previous_release = Some((released_at, label.clone()));
            }

            // Matchers
            let matchers = match details.get("matchers") {
                None => {
                    diagnostics.push(err(RuleId::MissingField, "missing 'matchers'".into()));
                    Vec::new()
                }
                Some(Value::Sequence(list)) => {
                    let (matchers, found) = matcher::validate(&label, file, list);
                    diagnostics.extend(found);
                    matchers
                }
                Some(other) => {
                    diagnostics.push(err(
                        RuleId::InvalidMatchers,
                        format!("'matchers' must be a list, found {}", shape_name(other)),
                    ));
                    Vec::new()
                }
            };

            if let Some(version) = version {
                manifest.releases.push(Release {
                    key: label.clone(),
                    version,
                    released_at,
                    matchers,
                });
            }
        }

        (manifest, diagnostics)
    }
}
