//! `ambit declare` command implementation.
//!
//! Whole-workspace mode regenerates the declaration artifact from scratch
//! in build order; single-package mode appends one package's block to the
//! existing artifact.

use ambit_core::workspace::WorkspacePackage;
use ambit_core::{
    build_order, collect_exports, detect_workspaces, entry_file, DeclarationArtifact,
    ModuleDeclaration, WorkspaceConfig,
};
use miette::{IntoDiagnostic, Result};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

pub fn run(cwd: &Path, package: Option<&str>, out: Option<&Path>, json: bool) -> Result<()> {
    let root = ambit_core::find_workspace_root(cwd).unwrap_or_else(|| cwd.to_path_buf());

    let artifact_path = match out {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => root.join("@types").join("packages.d.ts"),
    };
    let types_root = artifact_path
        .parent()
        .map_or_else(|| root.clone(), Path::to_path_buf);

    let Some(config) = detect_workspaces(&root) else {
        return Err(ambit_core::Error::WorkspaceNotFound { start: root }).into_diagnostic();
    };

    match package {
        Some(name) => declare_one(&config, name, &artifact_path, &types_root, json),
        None => declare_all(&config, &artifact_path, &types_root, json),
    }
}

/// Whole-workspace mode: process every package in build order, then
/// truncate-and-write the artifact once.
fn declare_all(
    config: &WorkspaceConfig,
    artifact_path: &Path,
    types_root: &Path,
    json: bool,
) -> Result<()> {
    let started = Instant::now();
    info!("Declaring all packages");

    let mut artifact = DeclarationArtifact::default();
    let mut summaries = Vec::new();

    for pkg in build_order(config) {
        match declare_package(pkg, types_root) {
            Ok((declaration, diagnostics, elapsed_ms)) => {
                let declared = !declaration.is_empty();
                artifact.push(&declaration);
                info!(package = %pkg.name, elapsed_ms, "Package declared");
                summaries.push(json!({
                    "name": pkg.name,
                    "declared": declared,
                    "diagnostics": diagnostics,
                }));
            }
            Err(e) => {
                // One bad package does not abort the workspace run.
                error!(package = %pkg.name, "Failed to declare package: {e}");
                summaries.push(json!({
                    "name": pkg.name,
                    "declared": false,
                    "error": e.to_string(),
                }));
            }
        }
    }

    artifact.write(artifact_path).into_diagnostic()?;
    info!(
        elapsed_ms = elapsed_ms(&started),
        "All packages declared"
    );

    if json {
        println!(
            "{}",
            json!({
                "ok": true,
                "artifact": artifact_path.to_string_lossy(),
                "packages": summaries,
                "notes": [],
            })
        );
    }

    Ok(())
}

/// Single-package mode: append one block without truncating. A missing
/// package or unreadable entry file is fatal here.
fn declare_one(
    config: &WorkspaceConfig,
    name: &str,
    artifact_path: &Path,
    types_root: &Path,
    json: bool,
) -> Result<()> {
    let Some(pkg) = config.get_package(name) else {
        let err = ambit_core::Error::PackageNotFound {
            name: name.to_string(),
        };
        if json {
            println!(
                "{}",
                json!({
                    "ok": false,
                    "error": {
                        "code": "PACKAGE_NOT_FOUND",
                        "message": err.to_string(),
                    }
                })
            );
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    };

    let (declaration, diagnostics, elapsed_ms) =
        declare_package(pkg, types_root).into_diagnostic()?;
    let declared = !declaration.is_empty();

    let mut artifact = DeclarationArtifact::default();
    artifact.push(&declaration);
    artifact.append_to(artifact_path).into_diagnostic()?;
    info!(package = %pkg.name, elapsed_ms, "Package declared");

    if json {
        println!(
            "{}",
            json!({
                "ok": true,
                "artifact": artifact_path.to_string_lossy(),
                "packages": [{
                    "name": pkg.name,
                    "declared": declared,
                    "diagnostics": diagnostics,
                }],
                "notes": [],
            })
        );
    }

    Ok(())
}

/// Resolve one package's surface and build its declaration block.
///
/// Returns the block, the diagnostic count, and elapsed milliseconds.
fn declare_package(
    pkg: &WorkspacePackage,
    types_root: &Path,
) -> std::result::Result<(ModuleDeclaration, usize, u64), ambit_core::Error> {
    let entry: PathBuf = entry_file(&pkg.path);
    info!(package = %pkg.name, entry = %entry.display(), "Declaring package");
    let started = Instant::now();

    let surface = collect_exports(&entry, types_root)?;
    for diagnostic in &surface.diagnostics {
        warn!(package = %pkg.name, "{diagnostic}");
    }

    let declaration = ModuleDeclaration::build(&pkg.name, &surface.bindings);
    Ok((declaration, surface.diagnostics.len(), elapsed_ms(&started)))
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(started: &Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
