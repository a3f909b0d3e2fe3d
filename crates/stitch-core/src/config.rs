//! Project configuration (`stitch.toml`)
//!
//! Loaded once per invocation from the project root and treated as
//! read-only by the rest of the pipeline.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration file name at the project root
pub const CONFIG_FILE: &str = "stitch.toml";

/// Project configuration from stitch.toml
///
/// Top-level values are declared before the sub-tables so TOML
/// serialization stays valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Where components are installed, relative to the project root
    #[serde(default = "default_component_path")]
    pub component_path: String,

    /// Registry URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Url>,

    /// Style handling
    #[serde(default)]
    pub style: StyleConfig,

    /// Path aliases, matching the project's tsconfig paths
    #[serde(default)]
    pub aliases: Aliases,

    /// Storybook integration
    #[serde(default)]
    pub storybook: StorybookConfig,
}

fn default_component_path() -> String {
    "src/components/ui".to_string()
}

/// Style configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Style strategy
    #[serde(default)]
    pub strategy: StyleStrategy,

    /// CSS output path, only used with the tailwind+css strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_path: Option<String>,
}

/// Style strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleStrategy {
    /// Tailwind classes only; style files are not installed
    #[default]
    #[serde(rename = "tailwind-only")]
    TailwindOnly,
    /// Tailwind plus companion CSS files
    #[serde(rename = "tailwind+css")]
    TailwindCss,
}

/// Path aliases used when rewriting fetched sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aliases {
    /// Alias for the components directory
    #[serde(default = "default_components_alias")]
    pub components: String,

    /// Alias for the shared lib directory
    #[serde(default = "default_lib_alias")]
    pub lib: String,
}

fn default_components_alias() -> String {
    "@/components".to_string()
}

fn default_lib_alias() -> String {
    "@/lib".to_string()
}

impl Default for Aliases {
    fn default() -> Self {
        Aliases {
            components: default_components_alias(),
            lib: default_lib_alias(),
        }
    }
}

/// Storybook integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorybookConfig {
    /// Whether story files are installed
    #[serde(default)]
    pub enabled: bool,

    /// Where stories live
    #[serde(default = "default_storybook_path")]
    pub path: String,

    /// Generate a story skeleton for components that ship none
    #[serde(default)]
    pub auto_generate: bool,
}

fn default_storybook_path() -> String {
    "src/stories".to_string()
}

impl Default for StorybookConfig {
    fn default() -> Self {
        StorybookConfig {
            enabled: false,
            path: default_storybook_path(),
            auto_generate: false,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            component_path: default_component_path(),
            registry: None,
            style: StyleConfig::default(),
            aliases: Aliases::default(),
            storybook: StorybookConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Check whether a config file exists at the project root
    pub fn exists(project_root: &Path) -> bool {
        project_root.join(CONFIG_FILE).exists()
    }

    /// Load the configuration from `stitch.toml`
    ///
    /// A missing file yields the defaults; a malformed file is an error.
    pub fn load(project_root: &Path) -> anyhow::Result<ProjectConfig> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            tracing::warn!("No {} found, using defaults", CONFIG_FILE);
            return Ok(ProjectConfig::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Write the configuration to `stitch.toml`
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let path = project_root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Resolved component install directory
    pub fn component_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.component_path)
    }

    /// Resolved lib directory, derived from the lib alias
    ///
    /// An `@/` alias maps onto `src/` (e.g. `@/lib` -> `src/lib`); anything
    /// else is taken as a project-relative path.
    pub fn lib_dir(&self, project_root: &Path) -> PathBuf {
        let alias = &self.aliases.lib;
        match alias.strip_prefix("@/") {
            Some(rest) => project_root.join("src").join(rest),
            None => project_root.join(alias),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.component_path, "src/components/ui");
        assert_eq!(config.style.strategy, StyleStrategy::TailwindOnly);
        assert_eq!(config.aliases.components, "@/components");
        assert_eq!(config.aliases.lib, "@/lib");
        assert!(!config.storybook.enabled);
        assert_eq!(config.storybook.path, "src/stories");
        assert!(config.registry.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = ProjectConfig::load(tmp.path()).unwrap();
        assert_eq!(config.component_path, "src/components/ui");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
component_path = "app/components"

[style]
strategy = "tailwind+css"
css_path = "src/styles/components"
"#,
        )
        .unwrap();

        let config = ProjectConfig::load(tmp.path()).unwrap();
        assert_eq!(config.component_path, "app/components");
        assert_eq!(config.style.strategy, StyleStrategy::TailwindCss);
        assert_eq!(config.style.css_path.as_deref(), Some("src/styles/components"));
        // Untouched sections keep their defaults
        assert_eq!(config.aliases.lib, "@/lib");
        assert!(!config.storybook.enabled);
    }

    #[test]
    fn test_load_malformed_config_errors() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "component_path = [nope").unwrap();
        assert!(ProjectConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut config = ProjectConfig::default();
        config.component_path = "src/ui".to_string();
        config.storybook.enabled = true;
        config.registry = Some(Url::parse("https://registry.example.com/stitch").unwrap());

        config.save(tmp.path()).unwrap();
        let loaded = ProjectConfig::load(tmp.path()).unwrap();

        assert_eq!(loaded.component_path, "src/ui");
        assert!(loaded.storybook.enabled);
        assert_eq!(
            loaded.registry.as_ref().map(|u| u.as_str()),
            Some("https://registry.example.com/stitch")
        );
    }

    #[test]
    fn test_lib_dir_maps_alias_onto_src() {
        let config = ProjectConfig::default();
        let root = Path::new("/project");
        assert_eq!(config.lib_dir(root), PathBuf::from("/project/src/lib"));
    }

    #[test]
    fn test_lib_dir_plain_path_is_project_relative() {
        let mut config = ProjectConfig::default();
        config.aliases.lib = "lib".to_string();
        let root = Path::new("/project");
        assert_eq!(config.lib_dir(root), PathBuf::from("/project/lib"));
    }
}
