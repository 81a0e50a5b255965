#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]

pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod normalize;
pub mod resolve;
pub mod version;
pub mod workspace;

pub use classify::{classify, ExportStatement};
pub use config::Config;
pub use emit::{DeclarationArtifact, ModuleDeclaration};
pub use error::Error;
pub use graph::{collect_exports, Diagnostic, ExportBinding, ExportSurface};
pub use normalize::normalize_source;
pub use resolve::{declaration_specifier, resolve_specifier, SpecifierResolution};
pub use version::VERSION;
pub use workspace::{
    build_order, detect_workspaces, entry_file, find_workspace_root, WorkspaceConfig,
    WorkspacePackage,
};
