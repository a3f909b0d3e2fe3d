//! Stitch Core Library
//!
//! Provides the domain logic for resolving UI components from a remote
//! registry and installing them into a project tree.

pub mod config;
pub mod install;
pub mod registry;
pub mod status;
pub mod tracker;
pub mod transform;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{Aliases, ProjectConfig, StorybookConfig, StyleConfig, StyleStrategy};

    // Registry
    pub use crate::registry::{
        Component, ComponentFile, ComponentKind, DEFAULT_REGISTRY_URL, FetchError, FileEntry,
        FileKind, FileSource, Registry, RegistryCache, RegistryClient,
    };
    pub use crate::registry::{npm_dependencies, resolve_all, resolve_component_dependencies};

    // Installation
    pub use crate::install::{ComponentInstaller, InstallOptions};

    // Tracking
    pub use crate::tracker::{InstallTracker, InstalledComponent, InstalledRegistry};

    // Status
    pub use crate::status::{ComponentStatus, collect_status};

    // Transforms
    pub use crate::transform::{to_kebab_case, to_pascal_case, transform_component};
}
