//! Declaration block rendering and the aggregate artifact.
//!
//! The artifact is modeled as a value built up by the caller and written
//! once, rather than a file handle mutated as a side effect per package.
//! Single-package invocations append instead of truncating; that is an
//! explicit mode, not an accident.

use crate::error::Error;
use crate::graph::ExportBinding;
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;

/// The declaration block for one package.
#[derive(Debug, Clone)]
pub struct ModuleDeclaration {
    /// Package name the ambient module is declared under.
    pub package_name: String,
    /// Bindings grouped by source, in first-seen source order.
    pub groups: Vec<ExportBinding>,
}

impl ModuleDeclaration {
    /// Group bindings by exact source equality, preserving the order in
    /// which each distinct source first appeared. Names within a group are
    /// concatenated in encounter order; duplicates are kept as-is.
    #[must_use]
    pub fn build(package_name: impl Into<String>, bindings: &[ExportBinding]) -> Self {
        let mut groups: Vec<ExportBinding> = Vec::new();

        for binding in bindings {
            if let Some(group) = groups.iter_mut().find(|g| g.source == binding.source) {
                group.names.extend(binding.names.iter().cloned());
            } else {
                groups.push(binding.clone());
            }
        }

        Self {
            package_name: package_name.into(),
            groups,
        }
    }

    /// Whether the package surfaced no bindings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render the `declare module` block, one export line per source.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("declare module '{}' {{\n", self.package_name);
        for group in &self.groups {
            let _ = writeln!(
                out,
                "  export {{ {} }} from '{}';",
                group.names.join(", "),
                group.source
            );
        }
        out.push_str("}\n");
        out
    }
}

/// Ordered per-package declaration blocks for one run.
#[derive(Debug, Clone, Default)]
pub struct DeclarationArtifact {
    blocks: Vec<String>,
}

impl DeclarationArtifact {
    /// Append one package's block. Empty declarations contribute nothing.
    pub fn push(&mut self, declaration: &ModuleDeclaration) {
        if !declaration.is_empty() {
            self.blocks.push(declaration.render());
        }
    }

    /// Number of blocks collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serialize all blocks, each preceded by a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push('\n');
            out.push_str(block);
        }
        out
    }

    /// Truncate `path` and write every block (whole-workspace mode).
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        self.ensure_parent(path)?;
        fs::write(path, self.render()).map_err(|source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Append this run's blocks without truncating (single-package mode).
    pub fn append_to(&self, path: &Path) -> Result<(), Error> {
        self.ensure_parent(path)?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::OutputWrite {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(self.render().as_bytes())
            .map_err(|source| Error::OutputWrite {
                path: path.to_path_buf(),
                source,
            })
    }

    fn ensure_parent(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::OutputWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}
