//! Installed-component tracking.
//!
//! A single JSON file at the project root records what has been installed.
//! Every read goes to disk; mutations are full load-modify-store cycles.
//! A missing or corrupt file behaves as an empty registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::registry::schema::Component;

/// Tracking file, relative to the project root
pub const INSTALLED_FILE: &str = ".stitch/installed.json";

/// Persisted record of everything installed into a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstalledRegistry {
    #[serde(default)]
    pub components: BTreeMap<String, InstalledComponent>,
}

/// Record of one installed component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledComponent {
    /// Component name
    pub name: String,

    /// Resolved version at install time
    pub version: String,

    /// Timestamp of the last install or overwrite
    pub installed_at: chrono::DateTime<chrono::Utc>,

    /// Target paths written by that install (possibly empty)
    pub files: Vec<PathBuf>,
}

/// Install tracking rooted at a project directory
#[derive(Debug, Clone)]
pub struct InstallTracker {
    project_root: PathBuf,
}

impl InstallTracker {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Path of the tracking file
    pub fn path(&self) -> PathBuf {
        self.project_root.join(INSTALLED_FILE)
    }

    /// Load the installed registry.
    ///
    /// Any read or parse failure degrades to an empty registry; a corrupt
    /// tracking file silently resets tracked state.
    pub fn load(&self) -> InstalledRegistry {
        let path = self.path();
        let Ok(bytes) = std::fs::read(&path) else {
            return InstalledRegistry::default();
        };
        match serde_json::from_slice(&bytes) {
            Ok(installed) => installed,
            Err(err) => {
                tracing::debug!("discarding unparsable tracking file {}: {err}", path.display());
                InstalledRegistry::default()
            }
        }
    }

    /// Persist the installed registry, pretty-printed for human diffing.
    ///
    /// Callers treat failure as non-fatal; the files themselves are already
    /// on disk.
    pub fn save(&self, installed: &InstalledRegistry) -> anyhow::Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create tracking directory: {}", parent.display())
            })?;
        }

        let bytes =
            serde_json::to_vec_pretty(installed).context("Failed to serialize tracking file")?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write tracking file: {}", path.display()))?;
        Ok(())
    }

    /// Record an install for `name`, replacing any previous record wholesale.
    pub fn record(
        &self,
        name: &str,
        component: &Component,
        files: Vec<PathBuf>,
    ) -> anyhow::Result<()> {
        let mut installed = self.load();
        installed.components.insert(
            name.to_string(),
            InstalledComponent {
                name: name.to_string(),
                version: component
                    .version
                    .clone()
                    .unwrap_or_else(|| "1.0.0".to_string()),
                installed_at: chrono::Utc::now(),
                files,
            },
        );
        self.save(&installed)
    }

    /// Membership test against the persisted registry, read fresh from disk.
    pub fn is_component_installed(&self, name: &str) -> bool {
        self.load().components.contains_key(name)
    }

    /// Project root this tracker is bound to
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::schema::{ComponentKind, FileEntry};
    use tempfile::TempDir;

    fn component(name: &str, version: Option<&str>) -> Component {
        Component {
            name: name.to_string(),
            version: version.map(String::from),
            description: None,
            kind: ComponentKind::Ui,
            files: vec![FileEntry::Path(format!("{name}.tsx"))],
            dependencies: None,
            dev_dependencies: vec![],
            registry_dependencies: vec![],
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        assert!(tracker.load().components.is_empty());
        assert!(!tracker.is_component_installed("button"));
    }

    #[test]
    fn test_record_and_query() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        tracker
            .record(
                "button",
                &component("button", Some("2.0.0")),
                vec![tmp.path().join("src/components/ui/button.tsx")],
            )
            .unwrap();

        assert!(tracker.is_component_installed("button"));
        let installed = tracker.load();
        let record = &installed.components["button"];
        assert_eq!(record.version, "2.0.0");
        assert_eq!(record.files.len(), 1);
    }

    #[test]
    fn test_version_defaults_when_component_has_none() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        tracker
            .record("badge", &component("badge", None), vec![])
            .unwrap();

        assert_eq!(tracker.load().components["badge"].version, "1.0.0");
    }

    #[test]
    fn test_record_replaces_wholesale() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        tracker
            .record(
                "button",
                &component("button", None),
                vec![PathBuf::from("a.tsx"), PathBuf::from("b.css")],
            )
            .unwrap();
        tracker
            .record("button", &component("button", None), vec![])
            .unwrap();

        // Last write wins; the file list reflects only the latest install.
        assert!(tracker.load().components["button"].files.is_empty());
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        std::fs::create_dir_all(tmp.path().join(".stitch")).unwrap();
        std::fs::write(tracker.path(), "{not json").unwrap();

        assert!(tracker.load().components.is_empty());

        // Recording over the corrupt file starts fresh.
        tracker
            .record("button", &component("button", None), vec![])
            .unwrap();
        assert_eq!(tracker.load().components.len(), 1);
    }

    #[test]
    fn test_tracking_file_wire_format() {
        let tmp = TempDir::new().unwrap();
        let tracker = InstallTracker::new(tmp.path().to_path_buf());

        tracker
            .record("button", &component("button", None), vec![])
            .unwrap();

        let raw = std::fs::read_to_string(tracker.path()).unwrap();
        assert!(raw.contains("\"installedAt\""));
        // Pretty-printed for human diffing
        assert!(raw.contains('\n'));
    }
}
