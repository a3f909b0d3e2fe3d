//! Registry manifest schema
//!
//! The registry index is a JSON document mapping component names to
//! component definitions, fetched from `{registry}/index.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Registry manifest: the full component catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    /// Registry format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Component definitions keyed by component name
    pub components: BTreeMap<String, Component>,

    /// Shared utility definitions, same shape as components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utils: Option<BTreeMap<String, Component>>,
}

impl Registry {
    /// Parse a registry index document
    pub fn parse(content: &str) -> anyhow::Result<Registry> {
        let registry: Registry = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse registry index: {}", e))?;
        Ok(registry)
    }

    /// Look up a component by name
    pub fn get_component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// All component names available in the registry
    pub fn available_components(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }
}

/// A component definition in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Component name (identifier)
    pub name: String,

    /// Component version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Component kind
    #[serde(rename = "type")]
    pub kind: ComponentKind,

    /// Files belonging to this component, in install order
    pub files: Vec<FileEntry>,

    /// Runtime dependencies (npm packages and other components)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<ComponentDependencies>,

    /// npm dev dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Vec<String>,

    /// Other registry components this component depends on
    #[serde(default, rename = "registryDependencies")]
    pub registry_dependencies: Vec<String>,
}

impl Component {
    /// Component-to-component dependency edges from the `dependencies` block
    pub fn component_dependencies(&self) -> &[String] {
        self.dependencies
            .as_ref()
            .map(|d| d.components.as_slice())
            .unwrap_or(&[])
    }

    /// npm package dependencies from the `dependencies` block
    pub fn npm_dependencies(&self) -> &[String] {
        self.dependencies
            .as_ref()
            .map(|d| d.npm.as_slice())
            .unwrap_or(&[])
    }
}

/// Dependency block of a component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentDependencies {
    /// npm package identifiers
    #[serde(default)]
    pub npm: Vec<String>,

    /// Names of other registry components
    #[serde(default)]
    pub components: Vec<String>,
}

/// Component kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// UI component
    #[serde(rename = "registry:ui")]
    Ui,
    /// Shared utility
    #[serde(rename = "registry:util")]
    Util,
}

/// A file entry can be a bare path string or a full descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// Bare file name, equivalent to a component-typed required file
    Path(String),
    /// Full descriptor with type and optional flag
    Descriptor(ComponentFile),
}

impl FileEntry {
    /// Normalize either form to a descriptor
    pub fn descriptor(&self) -> ComponentFile {
        match self {
            FileEntry::Path(path) => ComponentFile {
                path: path.clone(),
                kind: FileKind::Component,
                optional: false,
            },
            FileEntry::Descriptor(file) => file.clone(),
        }
    }
}

/// A fully-described component file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentFile {
    /// File name within the component's remote namespace
    pub path: String,

    /// File type
    #[serde(rename = "type")]
    pub kind: FileKind,

    /// Whether a fetch failure for this file is tolerated
    #[serde(default)]
    pub optional: bool,
}

/// Component file type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Style,
    Story,
}
