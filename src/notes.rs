//! Notes validation.
//!
//! A notes file (`notes/{app}--{version}.yml`) carries the localized release
//! text for one released version:
//!
//! ```yaml
//! locales:
//!   - name: en-en
//!     notes: "Bug fixes"
//!   - name: nl-NL
//!     notes: "Opgeloste fouten"
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::config::{Registry, FALLBACK_LOCALE};
use crate::document::{field, shape_name};
use crate::lint::{LintDiagnostic, RuleId};
use crate::semver::Version;

/// Longest accepted notes text, in characters.
pub const MAX_NOTES_CHARS: usize = 500;

static FILENAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)--(.+)\.yml$").expect("valid notes filename regex"));

/// Identity of a notes file: the (app, version) pair it documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotesKey {
    pub app: String,
    /// Version exactly as written in the filename.
    pub version: String,
}

impl NotesKey {
    pub fn new(app: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            version: version.into(),
        }
    }

    /// `{app}--{version}.yml`
    pub fn file_name(&self) -> String {
        format!("{}--{}.yml", self.app, self.version)
    }
}

/// A locale entry that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleNotes {
    pub name: String,
    pub notes: String,
}

/// Parsed content of a notes file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    pub entries: Vec<LocaleNotes>,
}

impl Notes {
    /// Locale codes present in the file, in file order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

/// Split a notes filename into app and semver-valid version.
///
/// Returns `None` when the name does not follow the pattern or the version
/// part is not a plain `major.minor.patch`.
pub fn parse_filename(name: &str) -> Option<NotesKey> {
    let caps = FILENAME_PATTERN.captures(name)?;
    Version::parse(&caps[2]).ok()?;
    Some(NotesKey::new(&caps[1], &caps[2]))
}

/// Validates notes files against a registry.
pub struct NotesValidator<'a> {
    registry: &'a Registry,
}

impl<'a> NotesValidator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Check a notes filename against the registry.
    ///
    /// `file` is the repository-relative path used in diagnostics. An
    /// unknown app and an invalid version are both reported when present.
    pub fn validate_filename(
        &self,
        name: &str,
        file: &str,
    ) -> Result<NotesKey, Vec<LintDiagnostic>> {
        let Some(caps) = FILENAME_PATTERN.captures(name) else {
            return Err(vec![LintDiagnostic::new(
                RuleId::BadPattern,
                file,
                "Invalid filename format (expected {app}--{version}.yml)",
            )
            .with_suggestion("Name the file after the app and a released version, e.g. pos--1.0.0.yml")]);
        };
        let (app, version) = (&caps[1], &caps[2]);

        let mut diagnostics = Vec::new();
        if !self.registry.has_app(app) {
            diagnostics.push(unknown_app(app, file));
        }
        if let Err(e) = Version::parse(version) {
            diagnostics.push(LintDiagnostic::new(RuleId::InvalidFormat, file, e.to_string()));
        }

        if diagnostics.is_empty() {
            Ok(NotesKey::new(app, version))
        } else {
            Err(diagnostics)
        }
    }

    /// Validate a notes document.
    pub fn validate(&self, file: &str, document: &Value) -> (Notes, Vec<LintDiagnostic>) {
        let mut diagnostics = Vec::new();
        let mut notes = Notes::default();

        let entries = match field(document, "locales") {
            None => {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::MissingField,
                    file,
                    "Missing 'locales' key",
                ));
                return (notes, diagnostics);
            }
            Some(Value::Sequence(entries)) if entries.is_empty() => {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::EmptyLocales,
                    file,
                    "No locales defined",
                ));
                return (notes, diagnostics);
            }
            Some(Value::Sequence(entries)) => entries,
            Some(other) => {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::InvalidLocales,
                    file,
                    format!("'locales' must be a list, found {}", shape_name(other)),
                ));
                return (notes, diagnostics);
            }
        };

        let mut seen = HashSet::new();
        for (i, entry) in entries.iter().enumerate() {
            if !entry.is_mapping() {
                diagnostics.push(LintDiagnostic::new(
                    RuleId::InvalidLocaleEntry,
                    file,
                    format!("Locale entry at index {} must be a mapping, found {}", i, shape_name(entry)),
                ));
                continue;
            }

            let name = match field(entry, "name") {
                Some(Value::String(name)) => Some(name.as_str()),
                None => {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::InvalidLocaleEntry,
                        file,
                        format!("Locale entry at index {} missing 'name'", i),
                    ));
                    None
                }
                Some(other) => {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::InvalidLocaleEntry,
                        file,
                        format!(
                            "Locale entry at index {} 'name' must be a string, found {}",
                            i,
                            shape_name(other)
                        ),
                    ));
                    None
                }
            };

            let mut duplicate = false;
            if let Some(name) = name {
                if !self.registry.has_locale(name) {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::UnknownLocale,
                        file,
                        format!("Locale '{}' not defined in config.yml", name),
                    ));
                }
                if !seen.insert(name) {
                    duplicate = true;
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::DuplicateLocale,
                        file,
                        format!("Duplicate locale '{}'", name),
                    ));
                }
            }

            let subject = match name {
                Some(name) => format!("Locale '{}'", name),
                None => format!("Locale entry at index {}", i),
            };
            let text = match field(entry, "notes") {
                None => {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::InvalidNotes,
                        file,
                        format!("{}: missing 'notes'", subject),
                    ));
                    None
                }
                Some(Value::String(text)) => match check_length(&subject, text) {
                    Some(message) => {
                        diagnostics.push(LintDiagnostic::new(RuleId::InvalidNotes, file, message));
                        None
                    }
                    None => Some(text),
                },
                Some(other) => {
                    diagnostics.push(LintDiagnostic::new(
                        RuleId::InvalidNotes,
                        file,
                        format!("{}: 'notes' must be a string, found {}", subject, shape_name(other)),
                    ));
                    None
                }
            };

            if let (Some(name), Some(text), false) = (name, text, duplicate) {
                notes.entries.push(LocaleNotes {
                    name: name.to_string(),
                    notes: text.clone(),
                });
            }
        }

        if !seen.contains(FALLBACK_LOCALE) {
            diagnostics.push(LintDiagnostic::new(
                RuleId::MissingFallbackLocale,
                file,
                format!("Missing required locale '{}'", FALLBACK_LOCALE),
            ));
        }

        (notes, diagnostics)
    }
}

/// Diagnostic for a notes file whose app is not in the registry.
///
/// Shared with the cross-validator so both report the same finding.
pub(crate) fn unknown_app(app: &str, file: &str) -> LintDiagnostic {
    LintDiagnostic::new(
        RuleId::UnknownApp,
        file,
        format!("App '{}' not defined in config.yml", app),
    )
}

fn check_length(subject: &str, text: &str) -> Option<String> {
    let chars = text.chars().count();
    if chars == 0 {
        Some(format!("{}: notes must not be empty", subject))
    } else if chars > MAX_NOTES_CHARS {
        Some(format!(
            "{}: notes exceed {} characters ({} characters)",
            subject, MAX_NOTES_CHARS, chars
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppEntry;
    use crate::document::parse;

    const FILE: &str = "notes/pos--1.0.0.yml";

    fn registry() -> Registry {
        Registry::new(
            vec![AppEntry {
                name: "pos".into(),
                environments: vec!["live".into()],
            }],
            vec!["en-en".into(), "nl-NL".into(), "de-DE".into()],
        )
    }

    fn check(yaml: &str) -> (Notes, Vec<LintDiagnostic>) {
        let registry = registry();
        NotesValidator::new(&registry).validate(FILE, &parse(yaml).unwrap())
    }

    fn rules(diagnostics: &[LintDiagnostic]) -> Vec<RuleId> {
        diagnostics.iter().map(|d| d.rule_id).collect()
    }

    #[test]
    fn valid_notes() {
        let (notes, diagnostics) = check(
            r#"
locales:
  - name: en-en
    notes: "Bug fixes"
  - name: nl-NL
    notes: "Opgeloste fouten"
"#,
        );
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(notes.locales().collect::<Vec<_>>(), vec!["en-en", "nl-NL"]);
    }

    fn filename_rules(validator: &NotesValidator<'_>, name: &str) -> Vec<RuleId> {
        match validator.validate_filename(name, FILE) {
            Ok(_) => Vec::new(),
            Err(found) => rules(&found),
        }
    }

    #[test]
    fn filename_checks() {
        let registry = registry();
        let validator = NotesValidator::new(&registry);

        assert_eq!(
            validator.validate_filename("pos--1.0.0.yml", FILE),
            Ok(NotesKey::new("pos", "1.0.0"))
        );
        assert_eq!(filename_rules(&validator, "pos-1.0.0.yml"), vec![RuleId::BadPattern]);
        assert_eq!(filename_rules(&validator, "bo--1.0.0.yml"), vec![RuleId::UnknownApp]);

        let err = validator.validate_filename("pos--2.0.0-rc.2.yml", FILE).unwrap_err();
        assert_eq!(rules(&err), vec![RuleId::InvalidFormat]);
        assert_eq!(err[0].message, "Invalid semantic version format: 2.0.0-rc.2");
    }

    #[test]
    fn filename_reports_unknown_app_and_bad_version_together() {
        let registry = registry();
        let validator = NotesValidator::new(&registry);

        let err = validator.validate_filename("bo--1.0.yml", "notes/bo--1.0.yml").unwrap_err();
        assert_eq!(rules(&err), vec![RuleId::UnknownApp, RuleId::InvalidFormat]);
        assert_eq!(err[0].message, "App 'bo' not defined in config.yml");
        assert_eq!(err[1].message, "Invalid semantic version format: 1.0");
    }

    #[test]
    fn parse_filename_requires_semver() {
        assert_eq!(parse_filename("bo--1.2.3.yml"), Some(NotesKey::new("bo", "1.2.3")));
        assert_eq!(parse_filename("bo--1.2.yml"), None);
        assert_eq!(parse_filename("bo.yml"), None);
    }

    #[test]
    fn missing_locales_key() {
        let (_, diagnostics) = check("notes: hello\n");
        assert_eq!(rules(&diagnostics), vec![RuleId::MissingField]);
    }

    #[test]
    fn locales_wrong_type() {
        let (_, diagnostics) = check("locales:\n  en-en: hello\n");
        assert_eq!(rules(&diagnostics), vec![RuleId::InvalidLocales]);
        assert!(diagnostics[0].message.ends_with("found a mapping"));
    }

    #[test]
    fn empty_locales() {
        let (_, diagnostics) = check("locales: []\n");
        assert_eq!(rules(&diagnostics), vec![RuleId::EmptyLocales]);
    }

    #[test]
    fn unknown_locale() {
        let (_, diagnostics) = check(
            "locales:\n  - name: en-en\n    notes: hi\n  - name: fr-FR\n    notes: salut\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::UnknownLocale]);
        assert_eq!(diagnostics[0].message, "Locale 'fr-FR' not defined in config.yml");
    }

    #[test]
    fn duplicate_locale() {
        let (notes, diagnostics) = check(
            "locales:\n  - name: en-en\n    notes: one\n  - name: en-en\n    notes: two\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::DuplicateLocale]);
        assert_eq!(notes.entries.len(), 1);
    }

    #[test]
    fn missing_fallback_reported_once() {
        let (_, diagnostics) = check(
            r#"
locales:
  - name: nl-NL
    notes: een
  - name: de-DE
    notes: eins
"#,
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::MissingFallbackLocale]);
        assert_eq!(diagnostics[0].message, "Missing required locale 'en-en'");
    }

    #[test]
    fn malformed_entries() {
        let (_, diagnostics) = check(
            r#"
locales:
  - just-a-string
  - notes: no name
  - name: 42
    notes: numeric name
  - name: en-en
    notes: fine
"#,
        );
        assert_eq!(
            rules(&diagnostics),
            vec![
                RuleId::InvalidLocaleEntry,
                RuleId::InvalidLocaleEntry,
                RuleId::InvalidLocaleEntry,
            ]
        );
    }

    #[test]
    fn invalid_notes_text() {
        let long = "x".repeat(MAX_NOTES_CHARS + 1);
        let yaml = format!(
            "locales:\n  - name: en-en\n    notes: \"\"\n  - name: nl-NL\n  - name: de-DE\n    notes: {}\n",
            long
        );
        let (notes, diagnostics) = check(&yaml);
        assert_eq!(
            rules(&diagnostics),
            vec![RuleId::InvalidNotes, RuleId::InvalidNotes, RuleId::InvalidNotes]
        );
        assert_eq!(diagnostics[0].message, "Locale 'en-en': notes must not be empty");
        assert_eq!(diagnostics[1].message, "Locale 'nl-NL': missing 'notes'");
        assert!(diagnostics[2].message.contains("exceed 500 characters"));
        assert!(notes.entries.is_empty());
    }

    #[test]
    fn notes_non_string() {
        let (_, diagnostics) = check("locales:\n  - name: en-en\n    notes: [a, b]\n");
        assert_eq!(rules(&diagnostics), vec![RuleId::InvalidNotes]);
        assert!(diagnostics[0].message.ends_with("found a sequence"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_NOTES_CHARS);
        assert!(text.len() > MAX_NOTES_CHARS);
        let yaml = format!("locales:\n  - name: en-en\n    notes: {}\n", text);
        let (notes, diagnostics) = check(&yaml);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(notes.entries[0].notes.chars().count(), MAX_NOTES_CHARS);
    }
}
