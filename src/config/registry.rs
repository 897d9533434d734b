//! Registry validation.
//!
//! Turns the raw `config.yml` tree into a [`Registry`] of apps,
//! environments and locales, reporting every structural problem found
//! along the way. Invalid entries are left out of the registry rather
//! than aborting the scan.

use std::collections::HashSet;

use serde_yaml::Value;

use super::loader::CONFIG_FILE;
use crate::document::{describe, field, shape_name};
use crate::lint::{LintDiagnostic, RuleId};

/// Locale every notes file must provide, and every declared locale list must include.
pub const FALLBACK_LOCALE: &str = "en-en";

/// An app and its environments, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub environments: Vec<String>,
}

/// The validated set of apps, environments and locales.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    apps: Vec<AppEntry>,
    locales: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            locales: vec![FALLBACK_LOCALE.to_string()],
        }
    }
}

impl Registry {
    /// Create a registry from already-validated parts.
    pub fn new(apps: Vec<AppEntry>, locales: Vec<String>) -> Self {
        Self { apps, locales }
    }

    /// Declared apps in order.
    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    /// Declared locale codes in order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Look up an app by name.
    pub fn app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|a| a.name == name)
    }

    pub fn has_app(&self, name: &str) -> bool {
        self.app(name).is_some()
    }

    pub fn has_environment(&self, app: &str, environment: &str) -> bool {
        self.app(app)
            .is_some_and(|a| a.environments.iter().any(|e| e == environment))
    }

    pub fn has_locale(&self, code: &str) -> bool {
        self.locales.iter().any(|l| l == code)
    }

    /// Every declared (app, environment) pair.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.apps.iter().flat_map(|app| {
            app.environments
                .iter()
                .map(move |env| (app.name.as_str(), env.as_str()))
        })
    }
}

/// Filename-safe identifier: lowercase ASCII letters only.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase())
}

fn error(rule_id: RuleId, message: impl Into<String>) -> LintDiagnostic {
    LintDiagnostic::new(rule_id, CONFIG_FILE, message)
}

/// Validate a registry document.
///
/// Returns the registry built from the valid parts of the document along
/// with every problem found. Callers must not trust the registry when the
/// diagnostics are non-empty.
pub fn validate(document: &Value) -> (Registry, Vec<LintDiagnostic>) {
    let mut diagnostics = Vec::new();
    let apps = validate_apps(document, &mut diagnostics);
    let locales = validate_locales(document, &mut diagnostics);
    (Registry::new(apps, locales), diagnostics)
}

fn validate_apps(document: &Value, diagnostics: &mut Vec<LintDiagnostic>) -> Vec<AppEntry> {
    let mut apps: Vec<AppEntry> = Vec::new();

    let Some(raw_apps) = field(document, "apps") else {
        diagnostics.push(error(RuleId::InvalidRegistry, "Missing 'apps' key"));
        return apps;
    };

    let entries = match raw_apps {
        Value::Sequence(entries) if !entries.is_empty() => entries,
        other => {
            diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!("'apps' must be a non-empty list, found {}", shape_name(other)),
            ));
            return apps;
        }
    };

    for (i, entry) in entries.iter().enumerate() {
        if !entry.is_mapping() {
            diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!("App at index {} must be a mapping, found {}", i, shape_name(entry)),
            ));
            continue;
        }

        let name = match field(entry, "name") {
            None => {
                diagnostics.push(error(
                    RuleId::InvalidRegistry,
                    format!("App at index {} missing 'name'", i),
                ));
                continue;
            }
            Some(Value::String(name)) if is_valid_name(name) => name,
            Some(other) => {
                diagnostics.push(
                    error(
                        RuleId::InvalidName,
                        format!("Invalid app name {}", describe(other)),
                    )
                    .with_suggestion("Use lowercase letters only (a-z)"),
                );
                continue;
            }
        };

        if apps.iter().any(|a| &a.name == name) {
            diagnostics.push(error(
                RuleId::DuplicateApp,
                format!("Duplicate app name '{}'", name),
            ));
            continue;
        }

        let environments = validate_environments(name, entry, diagnostics);
        apps.push(AppEntry {
            name: name.clone(),
            environments,
        });
    }

    apps
}

fn validate_environments(
    app: &str,
    entry: &Value,
    diagnostics: &mut Vec<LintDiagnostic>,
) -> Vec<String> {
    let mut environments: Vec<String> = Vec::new();

    let raw = match field(entry, "environments") {
        None => {
            diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!("App '{}' missing 'environments'", app),
            ));
            return environments;
        }
        Some(Value::Sequence(raw)) if !raw.is_empty() => raw,
        Some(other) => {
            diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!(
                    "App '{}' environments must be a non-empty list, found {}",
                    app,
                    shape_name(other)
                ),
            ));
            return environments;
        }
    };

    for env in raw {
        let name = match env {
            Value::String(name) if is_valid_name(name) => name,
            other => {
                diagnostics.push(
                    error(
                        RuleId::InvalidName,
                        format!("Invalid environment {} in app '{}'", describe(other), app),
                    )
                    .with_suggestion("Use lowercase letters only (a-z)"),
                );
                continue;
            }
        };
        if environments.contains(name) {
            diagnostics.push(error(
                RuleId::DuplicateEnvironment,
                format!("Duplicate environment '{}' in app '{}'", name, app),
            ));
            continue;
        }
        environments.push(name.clone());
    }

    environments
}

fn validate_locales(document: &Value, diagnostics: &mut Vec<LintDiagnostic>) -> Vec<String> {
    let raw = match field(document, "locales") {
        None => return vec![FALLBACK_LOCALE.to_string()],
        Some(Value::Sequence(raw)) if !raw.is_empty() => raw,
        Some(other) => {
            diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!("'locales' must be a non-empty list, found {}", shape_name(other)),
            ));
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut locales = Vec::new();
    for locale in raw {
        match locale {
            Value::String(code) if !code.is_empty() => {
                if seen.insert(code.as_str()) {
                    locales.push(code.clone());
                } else {
                    diagnostics.push(error(
                        RuleId::DuplicateLocale,
                        format!("Duplicate locale '{}'", code),
                    ));
                }
            }
            other => diagnostics.push(error(
                RuleId::InvalidRegistry,
                format!("Invalid locale {} (must be a non-empty string)", describe(other)),
            )),
        }
    }

    if !seen.contains(FALLBACK_LOCALE) {
        diagnostics.push(error(
            RuleId::MissingFallbackLocale,
            format!("Missing required locale '{}'", FALLBACK_LOCALE),
        ));
    }

    locales
}
