//! Dependency resolution over the component graph.
//!
//! Expands a requested set of component names to its transitive closure
//! over both dependency edge kinds (`registryDependencies` and
//! `dependencies.components`, treated as equivalent).

use std::collections::HashSet;

use crate::registry::schema::Registry;

/// Resolve the transitive dependency closure of a single component.
///
/// Depth-first over an explicit work stack; the visited set short-circuits
/// revisits, which also silently terminates cycles. Names that do not
/// exist in the registry are skipped. The returned order is pre-order:
/// a component is recorded before its dependencies are walked. It is NOT
/// a topological order, so callers must not assume a dependency appears
/// before its dependent.
pub fn resolve_component_dependencies(component_name: &str, registry: &Registry) -> Vec<String> {
    let mut resolved = Vec::new();
    let mut seen = HashSet::new();
    walk(component_name, registry, &mut resolved, &mut seen);
    resolved
}

/// Resolve a batch of requested names into one union, sharing a single
/// visited set so each component is walked at most once. First-seen order
/// is preserved.
pub fn resolve_all(component_names: &[String], registry: &Registry) -> Vec<String> {
    let mut resolved = Vec::new();
    let mut seen = HashSet::new();
    for name in component_names {
        walk(name, registry, &mut resolved, &mut seen);
    }
    resolved
}

fn walk(start: &str, registry: &Registry, resolved: &mut Vec<String>, seen: &mut HashSet<String>) {
    let mut stack = vec![start.to_string()];

    while let Some(name) = stack.pop() {
        if seen.contains(&name) {
            continue;
        }
        let Some(component) = registry.get_component(&name) else {
            // Unknown dependency names are tolerated, not an error.
            tracing::debug!("skipping unknown component dependency: {name}");
            continue;
        };

        seen.insert(name.clone());
        resolved.push(name);

        // Both edge kinds are equivalent "depends on" edges. Children are
        // pushed in reverse so the first declared edge is walked first.
        let edges: Vec<&String> = component
            .registry_dependencies
            .iter()
            .chain(component.component_dependencies())
            .collect();
        for dep in edges.into_iter().rev() {
            if !seen.contains(dep) {
                stack.push(dep.clone());
            }
        }
    }
}

/// Aggregated npm dependency lists for a set of components
#[derive(Debug, Clone, Default)]
pub struct NpmDependencies {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

/// Collect the de-duplicated npm and dev dependency names across a set of
/// components, preserving first-seen order. Unknown names are skipped.
pub fn npm_dependencies(component_names: &[String], registry: &Registry) -> NpmDependencies {
    let mut out = NpmDependencies::default();
    let mut seen_deps = HashSet::new();
    let mut seen_dev = HashSet::new();

    for name in component_names {
        let Some(component) = registry.get_component(name) else {
            continue;
        };
        for dep in component.npm_dependencies() {
            if seen_deps.insert(dep.clone()) {
                out.dependencies.push(dep.clone());
            }
        }
        for dep in &component.dev_dependencies {
            if seen_dev.insert(dep.clone()) {
                out.dev_dependencies.push(dep.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(doc: &str) -> Registry {
        Registry::parse(doc).unwrap()
    }

    #[test]
    fn test_closure_follows_both_edge_kinds() {
        let registry = registry(
            r#"{
            "components": {
                "dialog": {
                    "name": "dialog", "type": "registry:ui", "files": ["dialog.tsx"],
                    "registryDependencies": ["overlay"],
                    "dependencies": {"components": ["button"]}
                },
                "overlay": {"name": "overlay", "type": "registry:ui", "files": ["overlay.tsx"]},
                "button": {"name": "button", "type": "registry:ui", "files": ["button.tsx"]},
                "unrelated": {"name": "unrelated", "type": "registry:ui", "files": ["unrelated.tsx"]}
            }
        }"#,
        );

        let resolved = resolve_component_dependencies("dialog", &registry);

        assert_eq!(resolved, ["dialog", "overlay", "button"]);
    }

    #[test]
    fn test_order_is_preorder_not_topological() {
        let registry = registry(
            r#"{
            "components": {
                "card": {
                    "name": "card", "type": "registry:ui", "files": ["card.tsx"],
                    "registryDependencies": ["button"]
                },
                "button": {"name": "button", "type": "registry:ui", "files": ["button.tsx"]}
            }
        }"#,
        );

        // The requested component comes first, before its dependency.
        let resolved = resolve_component_dependencies("card", &registry);
        assert_eq!(resolved, ["card", "button"]);
    }

    #[test]
    fn test_transitive_closure() {
        let registry = registry(
            r#"{
            "components": {
                "a": {"name": "a", "type": "registry:ui", "files": [], "registryDependencies": ["b"]},
                "b": {"name": "b", "type": "registry:ui", "files": [], "registryDependencies": ["c"]},
                "c": {"name": "c", "type": "registry:ui", "files": []},
                "d": {"name": "d", "type": "registry:ui", "files": []}
            }
        }"#,
        );

        let resolved = resolve_component_dependencies("a", &registry);
        assert_eq!(resolved, ["a", "b", "c"]);
        assert!(!resolved.contains(&"d".to_string()));
    }

    #[test]
    fn test_cycle_terminates_with_finite_set() {
        let registry = registry(
            r#"{
            "components": {
                "a": {"name": "a", "type": "registry:ui", "files": [], "registryDependencies": ["b"]},
                "b": {"name": "b", "type": "registry:ui", "files": [], "registryDependencies": ["a"]}
            }
        }"#,
        );

        let resolved = resolve_component_dependencies("a", &registry);
        assert_eq!(resolved, ["a", "b"]);
    }

    #[test]
    fn test_self_dependency_terminates() {
        let registry = registry(
            r#"{
            "components": {
                "a": {"name": "a", "type": "registry:ui", "files": [], "registryDependencies": ["a"]}
            }
        }"#,
        );

        let resolved = resolve_component_dependencies("a", &registry);
        assert_eq!(resolved, ["a"]);
    }

    #[test]
    fn test_unknown_names_skipped() {
        let registry = registry(
            r#"{
            "components": {
                "a": {"name": "a", "type": "registry:ui", "files": [], "registryDependencies": ["missing", "b"]},
                "b": {"name": "b", "type": "registry:ui", "files": []}
            }
        }"#,
        );

        let resolved = resolve_component_dependencies("a", &registry);
        assert_eq!(resolved, ["a", "b"]);

        assert!(resolve_component_dependencies("nonexistent", &registry).is_empty());
    }

    #[test]
    fn test_batch_union_shares_visited_set() {
        let registry = registry(
            r#"{
            "components": {
                "a": {"name": "a", "type": "registry:ui", "files": [], "registryDependencies": ["shared"]},
                "b": {"name": "b", "type": "registry:ui", "files": [], "registryDependencies": ["shared"]},
                "shared": {"name": "shared", "type": "registry:ui", "files": []}
            }
        }"#,
        );

        let resolved = resolve_all(&["a".to_string(), "b".to_string()], &registry);
        assert_eq!(resolved, ["a", "shared", "b"]);
    }

    #[test]
    fn test_npm_dependencies_deduplicated() {
        let registry = registry(
            r#"{
            "components": {
                "a": {
                    "name": "a", "type": "registry:ui", "files": [],
                    "dependencies": {"npm": ["clsx", "tailwind-merge"]},
                    "devDependencies": ["@types/react"]
                },
                "b": {
                    "name": "b", "type": "registry:ui", "files": [],
                    "dependencies": {"npm": ["clsx"]},
                    "devDependencies": ["@types/react", "vitest"]
                }
            }
        }"#,
        );

        let npm = npm_dependencies(&["a".to_string(), "b".to_string(), "ghost".to_string()], &registry);

        assert_eq!(npm.dependencies, ["clsx", "tailwind-merge"]);
        assert_eq!(npm.dev_dependencies, ["@types/react", "vitest"]);
    }
}
