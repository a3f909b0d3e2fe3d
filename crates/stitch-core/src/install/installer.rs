//! Component installation orchestration.
//!
//! Per component: select files by type and strategy, honor the overwrite
//! policy, fetch-transform-write each file, and record the result in the
//! install tracker.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{ProjectConfig, StyleStrategy};
use crate::registry::client::FileSource;
use crate::registry::schema::{Component, FileKind};
use crate::tracker::InstallTracker;
use crate::transform::{to_kebab_case, transform_component};

/// Fixed shared utility written once per project
pub const UTILS_TEMPLATE: &str = r#"import { type ClassValue, clsx } from 'clsx';
import { twMerge } from 'tailwind-merge';

/**
 * Merge Tailwind CSS classes with clsx
 */
export function cn(...inputs: ClassValue[]) {
  return twMerge(clsx(inputs));
}
"#;

/// Options for a single component install
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Replace target files that already exist
    pub overwrite: bool,
}

/// Installs components into a project tree
#[derive(Debug)]
pub struct ComponentInstaller {
    config: ProjectConfig,
    project_root: PathBuf,
    tracker: InstallTracker,
}

impl ComponentInstaller {
    pub fn new(config: ProjectConfig, project_root: PathBuf) -> Self {
        let tracker = InstallTracker::new(project_root.clone());
        Self {
            config,
            project_root,
            tracker,
        }
    }

    /// The tracker bound to this installer's project
    pub fn tracker(&self) -> &InstallTracker {
        &self.tracker
    }

    /// Install one component, returning the target paths actually written.
    ///
    /// Files are processed in declared order. Style files are skipped under
    /// the tailwind-only strategy, story files when storybook is disabled,
    /// and existing targets when `overwrite` is off. A failing optional
    /// file is skipped; a failing required file aborts this component and
    /// the error propagates. The tracker record is written unconditionally
    /// with whatever landed, so callers in a batch can catch per component
    /// and continue.
    pub async fn install_component<S: FileSource>(
        &self,
        component_name: &str,
        component: &Component,
        source: &S,
        options: &InstallOptions,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let component_dir = self.config.component_dir(&self.project_root);
        std::fs::create_dir_all(&component_dir).with_context(|| {
            format!(
                "Failed to create component directory: {}",
                component_dir.display()
            )
        })?;

        let mut installed_files = Vec::new();
        let mut failure: Option<anyhow::Error> = None;

        for entry in &component.files {
            let file = entry.descriptor();

            if file.kind == FileKind::Style
                && self.config.style.strategy == StyleStrategy::TailwindOnly
            {
                continue;
            }
            if file.kind == FileKind::Story && !self.config.storybook.enabled {
                continue;
            }

            let target_name = target_file_name(component_name, &file.path);
            let target_path = component_dir.join(&target_name);

            if target_path.exists() && !options.overwrite {
                tracing::warn!("Skipping {} (already exists)", target_name);
                continue;
            }

            match self
                .install_file(component_name, &file.path, &target_path, source)
                .await
            {
                Ok(()) => installed_files.push(target_path),
                Err(err) if file.optional => {
                    tracing::debug!("skipping optional file {}: {err:#}", file.path);
                }
                Err(err) => {
                    failure =
                        Some(err.context(format!("Failed to install file: {}", file.path)));
                    break;
                }
            }
        }

        // Even a partial install is recorded, with whatever was written.
        if let Err(err) = self
            .tracker
            .record(component_name, component, installed_files.clone())
        {
            tracing::warn!("failed to update install tracking: {err:#}");
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(installed_files),
        }
    }

    async fn install_file<S: FileSource>(
        &self,
        component_name: &str,
        file_name: &str,
        target_path: &Path,
        source: &S,
    ) -> anyhow::Result<()> {
        let content = source.fetch_file(component_name, file_name).await?;
        let transformed = transform_component(&content, &self.config);
        std::fs::write(target_path, transformed)
            .with_context(|| format!("Failed to write {}", target_path.display()))?;
        tracing::debug!("wrote {}", target_path.display());
        Ok(())
    }

    /// Write the shared utility file if it does not exist yet.
    ///
    /// Returns whether the file was created. Components import from it, so
    /// this runs once before any batch install.
    pub fn install_utils(&self) -> anyhow::Result<bool> {
        let lib_dir = self.config.lib_dir(&self.project_root);
        let utils_path = lib_dir.join("utils.ts");

        if utils_path.exists() {
            return Ok(false);
        }

        std::fs::create_dir_all(&lib_dir)
            .with_context(|| format!("Failed to create lib directory: {}", lib_dir.display()))?;
        std::fs::write(&utils_path, UTILS_TEMPLATE)
            .with_context(|| format!("Failed to write {}", utils_path.display()))?;
        tracing::debug!("created {}", utils_path.display());
        Ok(true)
    }
}

/// Compute the local file name for a remote component file.
///
/// A remote name already prefixed with the component name is kept as-is;
/// anything else normalizes to `{kebab-case(component)}.{ext}`.
pub fn target_file_name(component_name: &str, file_name: &str) -> String {
    if file_name.starts_with(component_name) {
        return file_name.to_string();
    }
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", to_kebab_case(component_name), ext),
        None => to_kebab_case(component_name),
    }
}
