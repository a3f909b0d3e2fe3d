//! Installed-status collection for listings and selection prompts.

use crate::registry::schema::Registry;
use crate::tracker::InstallTracker;

/// One component's registry entry joined with its install state
#[derive(Debug, Clone)]
pub struct ComponentStatus {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub installed: bool,
}

/// Collect the status of every registry component against the tracker.
///
/// The tracking file is read once per collection; ordering follows the
/// registry's (sorted) component keys.
pub fn collect_status(registry: &Registry, tracker: &InstallTracker) -> Vec<ComponentStatus> {
    let installed = tracker.load();

    registry
        .components
        .iter()
        .map(|(name, component)| ComponentStatus {
            name: name.clone(),
            version: component.version.clone(),
            description: component.description.clone(),
            installed: installed.components.contains_key(name),
        })
        .collect()
}
