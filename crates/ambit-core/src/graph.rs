//! Re-export graph resolution.
//!
//! Walks a package's entry file, classifying each export statement and
//! following `export * from` chains into sibling files depth-first. The
//! result is a flat list of bindings plus the diagnostics produced along
//! the way; only failure to read the entry file itself is an error.

use crate::classify::{classify, ExportStatement};
use crate::error::Error;
use crate::normalize::normalize_source;
use crate::resolve::{declaration_specifier, resolve_specifier};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One or more exported names originating from the same resolved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBinding {
    /// Exported names, in encounter order. Type-only names carry a
    /// `type ` prefix.
    pub names: Vec<String>,
    /// Module specifier relative to the declarations root.
    pub source: String,
}

/// Non-fatal problems found while resolving one package's surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A specifier matched no candidate file; the binding is dropped.
    UnresolvedSpecifier { specifier: String, referrer: PathBuf },
    /// A fragment started with `export` but matched no known pattern.
    UnclassifiedExport { fragment: String, file: PathBuf },
    /// A `export * from` chain revisited an already-traversed file.
    CyclicReexport { path: PathBuf },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedSpecifier {
                specifier,
                referrer,
            } => write!(
                f,
                "unresolved specifier '{specifier}' in {}",
                referrer.display()
            ),
            Self::UnclassifiedExport { fragment, file } => {
                write!(f, "unclassified export in {}: {fragment}", file.display())
            }
            Self::CyclicReexport { path } => {
                write!(f, "cyclic re-export through {}", path.display())
            }
        }
    }
}

/// The resolved export surface of one package.
#[derive(Debug, Clone, Default)]
pub struct ExportSurface {
    /// Flat binding list across the transitive re-export closure.
    pub bindings: Vec<ExportBinding>,
    /// Diagnostics, in encounter order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve the full export surface reachable from a package entry file.
///
/// `types_root` is the directory the emitted specifiers are made relative
/// to. Fails only when the entry file itself cannot be read; everything
/// downstream is reported as a diagnostic and skipped.
pub fn collect_exports(entry: &Path, types_root: &Path) -> Result<ExportSurface, Error> {
    let content = fs::read_to_string(entry).map_err(|source| Error::EntryRead {
        path: entry.to_path_buf(),
        source,
    })?;

    let mut surface = ExportSurface::default();
    let mut visited = HashSet::new();
    visited.insert(canonical(entry));

    if let Some(normalized) = normalize_source(&content) {
        walk(entry, &normalized, types_root, &mut visited, &mut surface);
    }

    Ok(surface)
}

/// Process one normalized file, recursing into star re-exports.
fn walk(
    file: &Path,
    normalized: &str,
    types_root: &Path,
    visited: &mut HashSet<PathBuf>,
    surface: &mut ExportSurface,
) {
    let dir = file.parent().unwrap_or(file);

    for fragment in normalized.split("\n\n") {
        match classify(fragment) {
            ExportStatement::StarReexport { specifier } => {
                follow_star(&specifier, file, dir, types_root, visited, surface);
            }
            ExportStatement::NamespaceReexport { name, specifier } => {
                surface.bindings.push(ExportBinding {
                    names: vec![name],
                    source: source_for(specifier.as_deref(), file, dir, types_root),
                });
            }
            ExportStatement::NamedReexport { names, specifier }
            | ExportStatement::TypeExport { names, specifier } => {
                surface.bindings.push(ExportBinding {
                    names,
                    source: source_for(specifier.as_deref(), file, dir, types_root),
                });
            }
            ExportStatement::ConstExport { names } => {
                surface.bindings.push(ExportBinding {
                    names,
                    source: source_for(None, file, dir, types_root),
                });
            }
            ExportStatement::FunctionExport { name } => {
                surface.bindings.push(ExportBinding {
                    names: vec![name],
                    source: source_for(None, file, dir, types_root),
                });
            }
            ExportStatement::InterfaceExport { name } => {
                surface.bindings.push(ExportBinding {
                    names: vec![format!("type {name}")],
                    source: source_for(None, file, dir, types_root),
                });
            }
            ExportStatement::Unrecognized { raw } => {
                surface.diagnostics.push(Diagnostic::UnclassifiedExport {
                    fragment: raw,
                    file: file.to_path_buf(),
                });
            }
        }
    }
}

/// Resolve and recurse into a `export * from` target.
fn follow_star(
    specifier: &str,
    file: &Path,
    dir: &Path,
    types_root: &Path,
    visited: &mut HashSet<PathBuf>,
    surface: &mut ExportSurface,
) {
    let resolution = resolve_specifier(specifier, dir);
    let Some(target) = resolution.resolved else {
        surface.diagnostics.push(Diagnostic::UnresolvedSpecifier {
            specifier: specifier.to_string(),
            referrer: file.to_path_buf(),
        });
        return;
    };

    if !visited.insert(canonical(&target)) {
        surface
            .diagnostics
            .push(Diagnostic::CyclicReexport { path: target });
        return;
    }

    match fs::read_to_string(&target) {
        Ok(content) => {
            if let Some(normalized) = normalize_source(&content) {
                walk(&target, &normalized, types_root, visited, surface);
            }
        }
        Err(_) => {
            surface.diagnostics.push(Diagnostic::UnresolvedSpecifier {
                specifier: specifier.to_string(),
                referrer: file.to_path_buf(),
            });
        }
    }
}

/// Emitted source for a binding: the resolved specifier target when one is
/// present, otherwise the current file itself.
fn source_for(
    specifier: Option<&str>,
    file: &Path,
    dir: &Path,
    types_root: &Path,
) -> String {
    match specifier {
        Some(spec) => declaration_specifier(&dir.join(spec), types_root),
        None => declaration_specifier(file, types_root),
    }
}

/// Canonical key for the visited set; falls back to the raw path when the
/// file cannot be canonicalized.
fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
