//! Workspace package discovery and build ordering.
//!
//! Parses the `workspaces` field from the root package.json, expands glob
//! patterns like `packages/*`, and orders packages so dependencies come
//! before their dependents.

use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A discovered workspace package.
#[derive(Debug, Clone)]
pub struct WorkspacePackage {
    /// Package name from package.json.
    pub name: String,
    /// Absolute path to the workspace directory.
    pub path: PathBuf,
    /// Version from package.json.
    pub version: String,
    /// Declared dependency names (all sections, workspace-internal or not).
    pub deps: Vec<String>,
}

/// Workspace configuration from the root package.json.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Root directory of the monorepo.
    pub root: PathBuf,
    /// Map of package name -> workspace info.
    pub packages: HashMap<String, WorkspacePackage>,
}

impl WorkspaceConfig {
    /// Get workspace package info by name.
    #[must_use]
    pub fn get_package(&self, name: &str) -> Option<&WorkspacePackage> {
        self.packages.get(name)
    }
}

/// Detect and parse workspace configuration from a project root.
///
/// Returns `None` if the project doesn't use workspaces. Directories whose
/// package.json has no `name` are skipped.
#[must_use]
pub fn detect_workspaces(project_root: &Path) -> Option<WorkspaceConfig> {
    let content = std::fs::read_to_string(project_root.join("package.json")).ok()?;
    let package: Value = serde_json::from_str(&content).ok()?;

    let workspaces = package.get("workspaces")?;

    // Workspaces can be an array or an object with a "packages" field
    // (yarn-style).
    let patterns: Vec<String> = match workspaces {
        Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Value::Object(obj) => obj
            .get("packages")
            .and_then(|p| p.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        _ => return None,
    };

    if patterns.is_empty() {
        return None;
    }

    let packages = discover_workspace_packages(project_root, &patterns);

    if packages.is_empty() {
        return None;
    }

    Some(WorkspaceConfig {
        root: project_root.to_path_buf(),
        packages,
    })
}

/// Expand glob patterns and read each matching package directory.
fn discover_workspace_packages(
    root: &Path,
    patterns: &[String],
) -> HashMap<String, WorkspacePackage> {
    let mut packages = HashMap::new();

    for pattern in patterns {
        let full_pattern = root.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        if let Ok(entries) = glob::glob(&pattern_str) {
            for entry in entries.flatten() {
                if let Some(pkg) = read_workspace_package(&entry) {
                    packages.insert(pkg.name.clone(), pkg);
                }
            }
        }
    }

    packages
}

/// Read package info from a workspace directory.
fn read_workspace_package(dir: &Path) -> Option<WorkspacePackage> {
    if !dir.is_dir() {
        return None;
    }

    let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let package: Value = serde_json::from_str(&content).ok()?;

    let name = package.get("name")?.as_str()?.to_string();
    let version = package
        .get("version")
        .and_then(|v| v.as_str())
        .unwrap_or("0.0.0")
        .to_string();

    let mut deps = Vec::new();
    for section in ["dependencies", "devDependencies", "peerDependencies"] {
        if let Some(map) = package.get(section).and_then(|d| d.as_object()) {
            deps.extend(map.keys().cloned());
        }
    }

    Some(WorkspacePackage {
        name,
        path: dir.to_path_buf(),
        version,
        deps,
    })
}

/// Find the workspace root by walking up the directory tree.
///
/// Returns the first directory containing a package.json with a
/// `workspaces` field.
#[must_use]
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let package_json = current.join("package.json");
        if package_json.exists() {
            if let Ok(content) = std::fs::read_to_string(&package_json) {
                if let Ok(package) = serde_json::from_str::<Value>(&content) {
                    if package.get("workspaces").is_some() {
                        return Some(current);
                    }
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Order packages so every package comes after its workspace-internal
/// dependencies.
///
/// Kahn's algorithm with sorted tie-breaking, so the order is deterministic
/// for a fixed tree. Packages caught in a dependency cycle are appended at
/// the end in name order rather than dropped.
#[must_use]
pub fn build_order(config: &WorkspaceConfig) -> Vec<&WorkspacePackage> {
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for pkg in config.packages.values() {
        in_degree.entry(pkg.name.as_str()).or_insert(0);
        for dep in &pkg.deps {
            // Only edges between workspace packages matter here.
            if !config.packages.contains_key(dep) {
                continue;
            }
            *in_degree.entry(pkg.name.as_str()).or_insert(0) += 1;
            dependents
                .entry(dep.as_str())
                .or_default()
                .push(pkg.name.as_str());
        }
    }

    let mut order: Vec<&str> = Vec::new();
    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, &deg)| deg == 0)
        .map(|(&name, _)| name)
        .collect();
    ready.sort_unstable();

    while !ready.is_empty() {
        let name = ready.remove(0);
        order.push(name);
        if let Some(deps) = dependents.get(name) {
            for &dependent in deps {
                if let Some(deg) = in_degree.get_mut(dependent) {
                    *deg -= 1;
                    if *deg == 0 {
                        let pos = ready.binary_search(&dependent).unwrap_or_else(|e| e);
                        ready.insert(pos, dependent);
                    }
                }
            }
        }
    }

    // Cycle members never reach zero in-degree; emit them anyway.
    for (&name, &deg) in &in_degree {
        if deg > 0 {
            order.push(name);
        }
    }

    order
        .into_iter()
        .filter_map(|name| config.packages.get(name))
        .collect()
}

/// The public entry file of a package: `src/index.ts` when the package has
/// a `src` directory, plain `index.ts` otherwise.
#[must_use]
pub fn entry_file(pkg_dir: &Path) -> PathBuf {
    let src = pkg_dir.join("src");
    if src.is_dir() {
        src.join("index.ts")
    } else {
        pkg_dir.join("index.ts")
    }
}
