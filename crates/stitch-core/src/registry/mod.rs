//! Registry access: schema, HTTP client, manifest cache, and dependency
//! resolution.

pub mod cache;
pub mod client;
pub mod resolver;
pub mod schema;

pub use cache::{CACHE_TTL, RegistryCache};
pub use client::{DEFAULT_REGISTRY_URL, FetchError, FileSource, RegistryClient};
pub use resolver::{NpmDependencies, npm_dependencies, resolve_all, resolve_component_dependencies};
pub use schema::{Component, ComponentFile, ComponentKind, FileEntry, FileKind, Registry};
