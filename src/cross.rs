//! Cross-file consistency.
//!
//! Runs after every file has been validated on its own and works only on the
//! parsed results: manifest keys with their semver-valid versions, and notes
//! keys. Files whose names could not be parsed never reach this stage.

use std::collections::{HashMap, HashSet};

use crate::config::{manifest_path, notes_path, Registry};
use crate::lint::{LintDiagnostic, RuleId};
use crate::manifest::{Manifest, ManifestKey};
use crate::notes::{self, NotesKey};

/// Check manifests, notes and the registry against each other.
pub fn validate(
    registry: &Registry,
    manifests: &[(ManifestKey, Manifest)],
    notes: &[NotesKey],
) -> Vec<LintDiagnostic> {
    let mut diagnostics = Vec::new();

    // app -> versions referenced by any of its manifests
    let mut released: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (key, manifest) in manifests {
        released
            .entry(key.app.as_str())
            .or_default()
            .extend(manifest.version_keys());
    }

    let present: HashSet<NotesKey> = notes.iter().cloned().collect();
    let mut reported = HashSet::new();
    for (key, manifest) in manifests {
        // Undeclared apps are reported as orphan manifests instead
        if !registry.has_app(&key.app) {
            continue;
        }
        for version in manifest.version_keys() {
            let wanted = NotesKey::new(key.app.as_str(), version);
            if present.contains(&wanted) || !reported.insert(wanted.clone()) {
                continue;
            }
            diagnostics.push(LintDiagnostic::new(
                RuleId::MissingNotes,
                notes_path(&wanted.file_name()),
                format!(
                    "Missing notes file for version {} (referenced in manifest)",
                    version
                ),
            ));
        }
    }

    for key in notes {
        let file = notes_path(&key.file_name());
        if !registry.has_app(&key.app) {
            diagnostics.push(notes::unknown_app(&key.app, &file));
            continue;
        }
        let referenced = released
            .get(key.app.as_str())
            .is_some_and(|versions| versions.contains(key.version.as_str()));
        if !referenced {
            diagnostics.push(LintDiagnostic::new(
                RuleId::OrphanNotes,
                file,
                format!("Version {} not referenced in any manifest file", key.version),
            ));
        }
    }

    let on_disk: HashSet<&ManifestKey> = manifests.iter().map(|(key, _)| key).collect();
    for (key, _) in manifests {
        if !registry.has_environment(&key.app, &key.environment) {
            diagnostics.push(LintDiagnostic::new(
                RuleId::OrphanManifest,
                manifest_path(&key.file_name()),
                "Manifest file not defined in config.yml",
            ));
        }
    }
    for (app, environment) in registry.pairs() {
        let key = ManifestKey::new(app, environment);
        if !on_disk.contains(&key) {
            diagnostics.push(LintDiagnostic::new(
                RuleId::MissingManifest,
                manifest_path(&key.file_name()),
                "Missing manifest file (defined in config.yml but file not found)",
            ));
        }
    }

    diagnostics
}
