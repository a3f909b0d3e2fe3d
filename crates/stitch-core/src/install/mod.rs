//! Component installation orchestration.

pub mod installer;

pub use installer::{ComponentInstaller, InstallOptions, UTILS_TEMPLATE, target_file_name};
