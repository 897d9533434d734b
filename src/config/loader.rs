//! Repository layout discovery and registry loading.
//!
//! A release repository is laid out as:
//!
//! - `config.yml` - the registry of apps, environments and locales
//! - `manifests/{app}--{environment}.yml` - release history per pair
//! - `notes/{app}--{version}.yml` - localized notes per release

use crate::document::{self, LoadError};
use crate::error::{RelcheckError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry file name, relative to the repository root.
pub const CONFIG_FILE: &str = "config.yml";

/// Manifests directory, relative to the repository root.
pub const MANIFESTS_DIR: &str = "manifests";

/// Notes directory, relative to the repository root.
pub const NOTES_DIR: &str = "notes";

/// Paths making up a release repository.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Repository root.
    pub root: PathBuf,

    /// Registry document: config.yml
    pub config: PathBuf,

    /// Manifest directory: manifests/
    pub manifests_dir: PathBuf,

    /// Notes directory: notes/
    pub notes_dir: PathBuf,
}

impl Layout {
    /// Resolve the layout for the given repository root.
    pub fn discover(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            config: root.join(CONFIG_FILE),
            manifests_dir: root.join(MANIFESTS_DIR),
            notes_dir: root.join(NOTES_DIR),
        }
    }

    /// Check that the registry and both directories exist.
    pub fn ensure_present(&self) -> Result<()> {
        if !self.config.is_file() {
            return Err(RelcheckError::ConfigNotFound {
                path: PathBuf::from(CONFIG_FILE),
            });
        }
        for (dir, name) in [(&self.manifests_dir, MANIFESTS_DIR), (&self.notes_dir, NOTES_DIR)] {
            if !dir.is_dir() {
                return Err(RelcheckError::DirectoryNotFound {
                    path: PathBuf::from(name),
                });
            }
        }
        Ok(())
    }

    /// Names of the `*.yml` files in the manifests directory, sorted.
    pub fn manifest_files(&self) -> Result<Vec<String>> {
        list_yaml_files(&self.manifests_dir, MANIFESTS_DIR)
    }

    /// Names of the `*.yml` files in the notes directory, sorted.
    pub fn notes_files(&self) -> Result<Vec<String>> {
        list_yaml_files(&self.notes_dir, NOTES_DIR)
    }
}

/// Repository-relative display path for a manifest file.
pub fn manifest_path(name: &str) -> String {
    format!("{}/{}", MANIFESTS_DIR, name)
}

/// Repository-relative display path for a notes file.
pub fn notes_path(name: &str) -> String {
    format!("{}/{}", NOTES_DIR, name)
}

fn list_yaml_files(dir: &Path, display: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RelcheckError::DirectoryNotFound {
                path: PathBuf::from(display),
            }
        } else {
            RelcheckError::Io(e)
        }
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".yml") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Load the registry document as a raw YAML tree.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load(path: &Path) -> Result<Value> {
    document::load(path).map_err(|e| match e {
        LoadError::NotFound => RelcheckError::ConfigNotFound {
            path: PathBuf::from(CONFIG_FILE),
        },
        LoadError::Unreadable(message) => RelcheckError::Other(anyhow::anyhow!(
            "Error reading {}: {}",
            CONFIG_FILE,
            message
        )),
        LoadError::Syntax(message) => RelcheckError::ConfigParseError {
            path: PathBuf::from(CONFIG_FILE),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scaffold(temp: &TempDir) {
        fs::write(temp.path().join(CONFIG_FILE), "apps: []").unwrap();
        fs::create_dir_all(temp.path().join(MANIFESTS_DIR)).unwrap();
        fs::create_dir_all(temp.path().join(NOTES_DIR)).unwrap();
    }

    #[test]
    fn discover_resolves_paths() {
        let layout = Layout::discover(Path::new("/repo"));
        assert_eq!(layout.config, PathBuf::from("/repo/config.yml"));
        assert_eq!(layout.manifests_dir, PathBuf::from("/repo/manifests"));
        assert_eq!(layout.notes_dir, PathBuf::from("/repo/notes"));
    }

    #[test]
    fn ensure_present_accepts_complete_layout() {
        let temp = TempDir::new().unwrap();
        scaffold(&temp);
        assert!(Layout::discover(temp.path()).ensure_present().is_ok());
    }

    #[test]
    fn ensure_present_reports_missing_config() {
        let temp = TempDir::new().unwrap();
        let err = Layout::discover(temp.path()).ensure_present().unwrap_err();
        assert!(matches!(err, RelcheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn ensure_present_reports_missing_manifests_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        fs::create_dir_all(temp.path().join(NOTES_DIR)).unwrap();

        let err = Layout::discover(temp.path()).ensure_present().unwrap_err();
        assert_eq!(err.to_string(), "manifests directory not found");
    }

    #[test]
    fn ensure_present_reports_missing_notes_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        fs::create_dir_all(temp.path().join(MANIFESTS_DIR)).unwrap();

        let err = Layout::discover(temp.path()).ensure_present().unwrap_err();
        assert_eq!(err.to_string(), "notes directory not found");
    }

    #[test]
    fn lists_only_yml_files_sorted() {
        let temp = TempDir::new().unwrap();
        scaffold(&temp);
        let dir = temp.path().join(MANIFESTS_DIR);
        fs::write(dir.join("pos--live.yml"), "").unwrap();
        fs::write(dir.join("bo--live.yml"), "").unwrap();
        fs::write(dir.join("README.md"), "").unwrap();
        fs::write(dir.join("pos--test.yaml"), "").unwrap();
        fs::create_dir_all(dir.join("nested.yml")).unwrap();

        let files = Layout::discover(temp.path()).manifest_files().unwrap();
        assert_eq!(files, vec!["bo--live.yml", "pos--live.yml"]);
    }

    #[test]
    fn display_paths() {
        assert_eq!(manifest_path("pos--live.yml"), "manifests/pos--live.yml");
        assert_eq!(notes_path("pos--1.0.0.yml"), "notes/pos--1.0.0.yml");
    }

    #[test]
    fn load_returns_not_found_error() {
        let temp = TempDir::new().unwrap();
        let err = load(&temp.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, RelcheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn load_returns_parse_error_for_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "apps: [unclosed").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, RelcheckError::ConfigParseError { .. }));
        assert!(err.to_string().contains("YAML syntax error in config.yml"));
    }

    #[test]
    fn load_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        fs::write(&path, "apps:\n  - name: pos\n").unwrap();

        let value = load(&path).unwrap();
        assert!(value.get("apps").is_some());
    }
}
