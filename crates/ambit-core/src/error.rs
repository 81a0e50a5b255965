use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ambit operations.
///
/// Only whole-run failures live here. Per-statement and per-specifier
/// problems are [`crate::graph::Diagnostic`]s: they are reported and
/// skipped, never propagated.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Package {name} does not exist in this workspace")]
    PackageNotFound { name: String },

    #[error("Failed to read entry file {path}: {source}")]
    EntryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write declaration artifact {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No workspace configuration found from {start}")]
    WorkspaceNotFound { start: PathBuf },
}
