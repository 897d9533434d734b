//! Rollout matchers.
//!
//! A matcher selects which deployed instances a version targets and at what
//! severity. Each version carries exactly one `default` matcher plus any
//! number of `country` and `location_hash` matchers, and no criterion may be
//! targeted twice.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::document::{describe, shape_name};
use crate::lint::{LintDiagnostic, RuleId};

static LOCATION_HASH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{64}$").expect("valid location hash regex"));

/// ISO 3166-1 alpha-2 codes accepted in country matchers.
pub const VALID_COUNTRIES: &[&str] = &[
    "US", "GB", "DE", "FR", "IT", "ES", "NL", "BE", "AT", "CH", "PL", "CZ", "SK", "HU", "RO", "BG",
    "HR", "SI", "SE", "NO", "DK", "FI", "IE", "PT", "GR", "LU", "EE", "LV", "LT", "CY", "MT", "IS",
];

/// Rollout severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Green => write!(f, "green"),
            Severity::Yellow => write!(f, "yellow"),
            Severity::Red => write!(f, "red"),
        }
    }
}

/// Matcher kind, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherType {
    Default,
    Country,
    LocationHash,
}

impl MatcherType {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "country" => Some(Self::Country),
            "location_hash" => Some(Self::LocationHash),
            _ => None,
        }
    }

    /// Name of the criterion field this type requires, if any.
    fn criterion_field(&self) -> Option<&'static str> {
        match self {
            MatcherType::Default => None,
            MatcherType::Country => Some("country"),
            MatcherType::LocationHash => Some("location_hash"),
        }
    }

    fn allows_field(&self, key: &str) -> bool {
        key == "type" || key == "severity" || self.criterion_field() == Some(key)
    }
}

impl fmt::Display for MatcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatcherType::Default => write!(f, "default"),
            MatcherType::Country => write!(f, "country"),
            MatcherType::LocationHash => write!(f, "location_hash"),
        }
    }
}

/// What a matcher selects on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criterion {
    Default,
    Country(String),
    LocationHash(String),
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Default => write!(f, "default"),
            Criterion::Country(code) => write!(f, "country '{}'", code),
            Criterion::LocationHash(hash) => write!(f, "location_hash '{}'", hash),
        }
    }
}

/// A fully valid matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    pub criterion: Criterion,
    pub severity: Severity,
}

/// Validate the matcher list of one version.
///
/// `label` is the version key as written, used to prefix messages. Returns
/// the matchers that passed every per-matcher check.
pub fn validate(label: &str, file: &str, matchers: &[Value]) -> (Vec<Matcher>, Vec<LintDiagnostic>) {
    let mut diagnostics = Vec::new();
    let mut valid = Vec::new();
    let mut default_count = 0;

    let err = |rule_id: RuleId, message: String| {
        LintDiagnostic::new(rule_id, file, format!("Version {}: {}", label, message))
    };

    for (i, raw) in matchers.iter().enumerate() {
        let Some(mapping) = raw.as_mapping() else {
            diagnostics.push(err(
                RuleId::InvalidMatchers,
                format!("matcher at index {} must be a mapping, found {}", i, shape_name(raw)),
            ));
            continue;
        };

        let severity = match mapping.get("severity") {
            Some(Value::String(s)) => s.parse::<Severity>().ok(),
            _ => None,
        };
        if severity.is_none() {
            diagnostics.push(err(
                RuleId::InvalidSeverity,
                format!(
                    "invalid severity {} (expected green, yellow or red)",
                    mapping.get("severity").map(describe).unwrap_or_else(|| "(missing)".into())
                ),
            ));
        }

        let matcher_type = match mapping.get("type") {
            Some(Value::String(s)) => MatcherType::parse(s),
            _ => None,
        };
        let Some(matcher_type) = matcher_type else {
            diagnostics.push(err(
                RuleId::InvalidMatcherType,
                format!(
                    "invalid matcher type {} (expected default, country or location_hash)",
                    mapping.get("type").map(describe).unwrap_or_else(|| "(missing)".into())
                ),
            ));
            continue;
        };

        for key in mapping.keys() {
            let allowed = key.as_str().is_some_and(|k| matcher_type.allows_field(k));
            if !allowed {
                diagnostics.push(err(
                    RuleId::UnexpectedField,
                    format!("unexpected field {} on {} matcher", describe(key), matcher_type),
                ));
            }
        }

        let criterion = match matcher_type {
            MatcherType::Default => {
                default_count += 1;
                Some(Criterion::Default)
            }
            MatcherType::Country => country(mapping).map(Criterion::Country).or_else(|| {
                diagnostics.push(err(
                    RuleId::InvalidCountry,
                    format!("invalid country code {}", field_text(mapping, "country")),
                ));
                None
            }),
            MatcherType::LocationHash => location_hash(mapping)
                .map(Criterion::LocationHash)
                .or_else(|| {
                    diagnostics.push(err(
                        RuleId::InvalidLocationHash,
                        format!(
                            "invalid location hash {} (expected 64 lowercase hex characters)",
                            field_text(mapping, "location_hash")
                        ),
                    ));
                    None
                }),
        };

        if let (Some(criterion), Some(severity)) = (criterion, severity) {
            valid.push(Matcher {
                criterion,
                severity,
            });
        }
    }

    match default_count {
        0 => diagnostics.push(err(
            RuleId::MissingDefaultMatcher,
            "missing default matcher".to_string(),
        )),
        1 => {}
        n => diagnostics.push(err(
            RuleId::DuplicateDefaultMatcher,
            format!("{} default matchers defined (exactly one allowed)", n),
        )),
    }

    let mut seen: HashMap<&Criterion, Severity> = HashMap::new();
    for matcher in &valid {
        if matcher.criterion == Criterion::Default {
            continue;
        }
        match seen.get(&matcher.criterion).copied() {
            None => {
                seen.insert(&matcher.criterion, matcher.severity);
            }
            Some(first) if first == matcher.severity => diagnostics.push(err(
                RuleId::DuplicateMatcher,
                format!("duplicate matcher for {}", matcher.criterion),
            )),
            Some(first) => diagnostics.push(err(
                RuleId::ConflictingMatcher,
                format!(
                    "{} targeted with conflicting severities {} and {}",
                    matcher.criterion, first, matcher.severity
                ),
            )),
        }
    }

    (valid, diagnostics)
}

fn country(mapping: &Mapping) -> Option<String> {
    mapping
        .get("country")
        .and_then(Value::as_str)
        .filter(|code| VALID_COUNTRIES.contains(code))
        .map(str::to_string)
}

fn location_hash(mapping: &Mapping) -> Option<String> {
    mapping
        .get("location_hash")
        .and_then(Value::as_str)
        .filter(|hash| LOCATION_HASH_PATTERN.is_match(hash))
        .map(str::to_string)
}

fn field_text(mapping: &Mapping, key: &str) -> String {
    mapping
        .get(key)
        .map(describe)
        .unwrap_or_else(|| "(missing)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    const HASH_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const HASH_B: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn check(yaml: &str) -> (Vec<Matcher>, Vec<LintDiagnostic>) {
        let value = parse(yaml).unwrap();
        let list = value.as_sequence().unwrap().clone();
        validate("1.0.0", "manifests/pos--live.yml", &list)
    }

    fn rules(diagnostics: &[LintDiagnostic]) -> Vec<RuleId> {
        diagnostics.iter().map(|d| d.rule_id).collect()
    }

    #[test]
    fn accepts_all_matcher_types() {
        let (matchers, diagnostics) = check(&format!(
            r#"
- type: default
  severity: green
- type: country
  severity: yellow
  country: NL
- type: location_hash
  severity: red
  location_hash: "{HASH_A}"
"#
        ));

        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(matchers.len(), 3);
        assert_eq!(matchers[1].criterion, Criterion::Country("NL".into()));
        assert_eq!(matchers[2].severity, Severity::Red);
    }

    #[test]
    fn missing_default_matcher() {
        let (_, diagnostics) = check("- {type: country, severity: green, country: US}");
        assert_eq!(rules(&diagnostics), vec![RuleId::MissingDefaultMatcher]);
        assert_eq!(diagnostics[0].message, "Version 1.0.0: missing default matcher");
    }

    #[test]
    fn empty_matcher_list_lacks_default() {
        let (_, diagnostics) = check("[]");
        assert_eq!(rules(&diagnostics), vec![RuleId::MissingDefaultMatcher]);
    }

    #[test]
    fn duplicate_default_matcher() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: default, severity: red}\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::DuplicateDefaultMatcher]);
    }

    #[test]
    fn invalid_matcher_type() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: region, severity: green}\n- {severity: red}\n",
        );
        assert_eq!(
            rules(&diagnostics),
            vec![RuleId::InvalidMatcherType, RuleId::InvalidMatcherType]
        );
        assert!(diagnostics[0].message.contains("'region'"));
        assert!(diagnostics[1].message.contains("(missing)"));
    }

    #[test]
    fn invalid_severity() {
        let (matchers, diagnostics) = check("- {type: default, severity: orange}");
        assert_eq!(rules(&diagnostics), vec![RuleId::InvalidSeverity]);
        assert!(diagnostics[0].message.contains("'orange'"));
        assert!(matchers.is_empty());
    }

    #[test]
    fn invalid_country_code() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: country, severity: red, country: XX}\n- {type: country, severity: red}\n",
        );
        assert_eq!(
            rules(&diagnostics),
            vec![RuleId::InvalidCountry, RuleId::InvalidCountry]
        );
        assert!(diagnostics[0].message.contains("'XX'"));
        assert!(diagnostics[1].message.contains("(missing)"));
    }

    #[test]
    fn lowercase_country_code_is_rejected() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: country, severity: red, country: nl}\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::InvalidCountry]);
    }

    #[test]
    fn invalid_location_hash() {
        for hash in ["abc".to_string(), HASH_A.to_uppercase(), format!("{HASH_A}a")] {
            let (_, diagnostics) = check(&format!(
                "- {{type: default, severity: green}}\n- {{type: location_hash, severity: red, location_hash: \"{hash}\"}}\n"
            ));
            assert_eq!(rules(&diagnostics), vec![RuleId::InvalidLocationHash], "{hash}");
        }
    }

    #[test]
    fn unexpected_fields() {
        let (_, diagnostics) = check(&format!(
            r#"
- type: default
  severity: green
  country: NL
- type: country
  severity: red
  country: DE
  location_hash: "{HASH_A}"
- type: location_hash
  severity: red
  location_hash: "{HASH_B}"
  notes: extra
"#
        ));
        assert_eq!(
            rules(&diagnostics),
            vec![
                RuleId::UnexpectedField,
                RuleId::UnexpectedField,
                RuleId::UnexpectedField
            ]
        );
        assert!(diagnostics[0].message.contains("'country' on default matcher"));
        assert!(diagnostics[2].message.contains("'notes'"));
    }

    #[test]
    fn conflicting_country_severities() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: country, severity: green, country: NL}\n- {type: country, severity: red, country: NL}\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::ConflictingMatcher]);
        assert_eq!(
            diagnostics[0].message,
            "Version 1.0.0: country 'NL' targeted with conflicting severities green and red"
        );
    }

    #[test]
    fn exact_duplicate_country_matcher() {
        let (_, diagnostics) = check(
            "- {type: default, severity: green}\n- {type: country, severity: red, country: NL}\n- {type: country, severity: red, country: NL}\n",
        );
        assert_eq!(rules(&diagnostics), vec![RuleId::DuplicateMatcher]);
    }

    #[test]
    fn conflicting_location_hash_severities() {
        let (_, diagnostics) = check(&format!(
            "- {{type: default, severity: green}}\n- {{type: location_hash, severity: yellow, location_hash: \"{HASH_B}\"}}\n- {{type: location_hash, severity: red, location_hash: \"{HASH_B}\"}}\n"
        ));
        assert_eq!(rules(&diagnostics), vec![RuleId::ConflictingMatcher]);
    }

    #[test]
    fn different_criteria_do_not_conflict() {
        let (matchers, diagnostics) = check(&format!(
            "- {{type: default, severity: green}}\n- {{type: country, severity: red, country: NL}}\n- {{type: country, severity: green, country: BE}}\n- {{type: location_hash, severity: red, location_hash: \"{HASH_A}\"}}\n- {{type: location_hash, severity: red, location_hash: \"{HASH_B}\"}}\n"
        ));
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(matchers.len(), 5);
    }

    #[test]
    fn non_mapping_matcher() {
        let (_, diagnostics) = check("- {type: default, severity: green}\n- default\n- 3\n");
        assert_eq!(
            rules(&diagnostics),
            vec![RuleId::InvalidMatchers, RuleId::InvalidMatchers]
        );
        assert!(diagnostics[0].message.contains("index 1"));
    }

    #[test]
    fn severity_round_trip_display() {
        for s in ["green", "yellow", "red"] {
            assert_eq!(s.parse::<Severity>().unwrap().to_string(), s);
        }
        assert!("Green".parse::<Severity>().is_err());
    }
}
