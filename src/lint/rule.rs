//! Rule identifiers.
//!
//! Every check the engine performs reports under a [`RuleId`]. The id is
//! stable and rendered in kebab-case (`orphan-notes`), so CI logs and JSON
//! consumers can match on it.

use serde::Serialize;

/// Unique identifier for a validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum RuleId {
    // Document loading
    NotFound,
    MalformedDocument,

    // Registry (config.yml)
    InvalidRegistry,
    InvalidName,
    DuplicateApp,
    DuplicateEnvironment,
    DuplicateLocale,
    MissingFallbackLocale,

    // Filenames
    BadPattern,
    UnknownApp,
    UnknownEnvironment,

    // Manifests
    InvalidFormat,
    MissingField,
    InvalidVersionsType,
    NoVersions,
    VersionOrder,
    InvalidVersionDetails,
    InvalidTimestamp,
    ChronologicalOrder,
    FutureRelease,
    StaleRelease,
    InvalidMatchers,
    InvalidMatcherType,
    InvalidSeverity,
    InvalidCountry,
    InvalidLocationHash,
    UnexpectedField,
    MissingDefaultMatcher,
    DuplicateDefaultMatcher,
    ConflictingMatcher,
    DuplicateMatcher,

    // Notes
    InvalidLocales,
    EmptyLocales,
    InvalidLocaleEntry,
    UnknownLocale,
    InvalidNotes,

    // Cross-references
    MissingNotes,
    OrphanNotes,
    OrphanManifest,
    MissingManifest,
}

impl RuleId {
    /// Every rule, in catalogue order.
    pub const ALL: &'static [RuleId] = &[
        RuleId::NotFound,
        RuleId::MalformedDocument,
        RuleId::InvalidRegistry,
        RuleId::InvalidName,
        RuleId::DuplicateApp,
        RuleId::DuplicateEnvironment,
        RuleId::DuplicateLocale,
        RuleId::MissingFallbackLocale,
        RuleId::BadPattern,
        RuleId::UnknownApp,
        RuleId::UnknownEnvironment,
        RuleId::InvalidFormat,
        RuleId::MissingField,
        RuleId::InvalidVersionsType,
        RuleId::NoVersions,
        RuleId::VersionOrder,
        RuleId::InvalidVersionDetails,
        RuleId::InvalidTimestamp,
        RuleId::ChronologicalOrder,
        RuleId::FutureRelease,
        RuleId::StaleRelease,
        RuleId::InvalidMatchers,
        RuleId::InvalidMatcherType,
        RuleId::InvalidSeverity,
        RuleId::InvalidCountry,
        RuleId::InvalidLocationHash,
        RuleId::UnexpectedField,
        RuleId::MissingDefaultMatcher,
        RuleId::DuplicateDefaultMatcher,
        RuleId::ConflictingMatcher,
        RuleId::DuplicateMatcher,
        RuleId::InvalidLocales,
        RuleId::EmptyLocales,
        RuleId::InvalidLocaleEntry,
        RuleId::UnknownLocale,
        RuleId::InvalidNotes,
        RuleId::MissingNotes,
        RuleId::OrphanNotes,
        RuleId::OrphanManifest,
        RuleId::MissingManifest,
    ];

    /// Kebab-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::NotFound => "not-found",
            RuleId::MalformedDocument => "malformed-document",
            RuleId::InvalidRegistry => "invalid-registry",
            RuleId::InvalidName => "invalid-name",
            RuleId::DuplicateApp => "duplicate-app",
            RuleId::DuplicateEnvironment => "duplicate-environment",
            RuleId::DuplicateLocale => "duplicate-locale",
            RuleId::MissingFallbackLocale => "missing-fallback-locale",
            RuleId::BadPattern => "bad-pattern",
            RuleId::UnknownApp => "unknown-app",
            RuleId::UnknownEnvironment => "unknown-environment",
            RuleId::InvalidFormat => "invalid-format",
            RuleId::MissingField => "missing-field",
            RuleId::InvalidVersionsType => "invalid-versions-type",
            RuleId::NoVersions => "no-versions",
            RuleId::VersionOrder => "version-order",
            RuleId::InvalidVersionDetails => "invalid-version-details",
            RuleId::InvalidTimestamp => "invalid-timestamp",
            RuleId::ChronologicalOrder => "chronological-order",
            RuleId::FutureRelease => "future-release",
            RuleId::StaleRelease => "stale-release",
            RuleId::InvalidMatchers => "invalid-matchers",
            RuleId::InvalidMatcherType => "invalid-matcher-type",
            RuleId::InvalidSeverity => "invalid-severity",
            RuleId::InvalidCountry => "invalid-country",
            RuleId::InvalidLocationHash => "invalid-location-hash",
            RuleId::UnexpectedField => "unexpected-field",
            RuleId::MissingDefaultMatcher => "missing-default-matcher",
            RuleId::DuplicateDefaultMatcher => "duplicate-default-matcher",
            RuleId::ConflictingMatcher => "conflicting-matcher",
            RuleId::DuplicateMatcher => "duplicate-matcher",
            RuleId::InvalidLocales => "invalid-locales",
            RuleId::EmptyLocales => "empty-locales",
            RuleId::InvalidLocaleEntry => "invalid-locale-entry",
            RuleId::UnknownLocale => "unknown-locale",
            RuleId::InvalidNotes => "invalid-notes",
            RuleId::MissingNotes => "missing-notes",
            RuleId::OrphanNotes => "orphan-notes",
            RuleId::OrphanManifest => "orphan-manifest",
            RuleId::MissingManifest => "missing-manifest",
        }
    }

    /// Description of what this rule checks.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::NotFound => "A file that must be read does not exist",
            RuleId::MalformedDocument => "A file cannot be read or is not valid YAML",
            RuleId::InvalidRegistry => "config.yml has the wrong structure",
            RuleId::InvalidName => "App and environment names use lowercase letters only",
            RuleId::DuplicateApp => "App names are unique in config.yml",
            RuleId::DuplicateEnvironment => "Environment names are unique within an app",
            RuleId::DuplicateLocale => "A locale is declared or used at most once",
            RuleId::MissingFallbackLocale => "The en-en fallback locale is present",
            RuleId::BadPattern => "Filenames follow {app}--{environment}.yml or {app}--{version}.yml",
            RuleId::UnknownApp => "Filenames reference an app declared in config.yml",
            RuleId::UnknownEnvironment => "Manifest filenames reference a declared environment",
            RuleId::InvalidFormat => "Versions follow major.minor.patch",
            RuleId::MissingField => "Required fields are present",
            RuleId::InvalidVersionsType => "'versions' is a mapping",
            RuleId::NoVersions => "A manifest defines at least one version",
            RuleId::VersionOrder => "Versions appear in strictly ascending order",
            RuleId::InvalidVersionDetails => "Version details are a mapping",
            RuleId::InvalidTimestamp => "released_at is an ISO 8601 timestamp",
            RuleId::ChronologicalOrder => "A later version is not released before an earlier one",
            RuleId::FutureRelease => "released_at is not in the future",
            RuleId::StaleRelease => "released_at is within the last 12 months",
            RuleId::InvalidMatchers => "'matchers' is a sequence of mappings",
            RuleId::InvalidMatcherType => "Matcher type is default, country or location_hash",
            RuleId::InvalidSeverity => "Matcher severity is green, yellow or red",
            RuleId::InvalidCountry => "Country matchers carry a known ISO 3166-1 alpha-2 code",
            RuleId::InvalidLocationHash => "Location hash matchers carry a 64-character hex hash",
            RuleId::UnexpectedField => "Matchers carry only the fields their type expects",
            RuleId::MissingDefaultMatcher => "Each version has a default matcher",
            RuleId::DuplicateDefaultMatcher => "Each version has at most one default matcher",
            RuleId::ConflictingMatcher => "A criterion is not targeted with two severities",
            RuleId::DuplicateMatcher => "A matcher is not repeated within a version",
            RuleId::InvalidLocales => "'locales' is a sequence",
            RuleId::EmptyLocales => "A notes file has at least one locale entry",
            RuleId::InvalidLocaleEntry => "Locale entries are mappings with a string name",
            RuleId::UnknownLocale => "Notes use locales declared in config.yml",
            RuleId::InvalidNotes => "Notes text is a string of 1 to 500 characters",
            RuleId::MissingNotes => "Every released version has a notes file",
            RuleId::OrphanNotes => "Every notes file is referenced by a manifest",
            RuleId::OrphanManifest => "Every manifest file is declared in config.yml",
            RuleId::MissingManifest => "Every declared app/environment has a manifest file",
        }
    }
}

impl From<RuleId> for &'static str {
    fn from(id: RuleId) -> Self {
        id.as_str()
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
