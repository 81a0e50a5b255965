//! Specifier-to-file resolution and declaration path normalization.
//!
//! Resolution probes a fixed candidate list instead of implementing full
//! Node semantics: entry files only ever reference siblings with relative
//! specifiers, so `.ts`, `.tsx` and `index.ts` probing covers them.

use std::path::{Component, Path, PathBuf};

/// Outcome of probing a specifier against the filesystem.
#[derive(Debug, Clone)]
pub struct SpecifierResolution {
    /// First existing candidate, if any.
    pub resolved: Option<PathBuf>,
    /// Every candidate probed, in order.
    pub tried: Vec<PathBuf>,
}

impl SpecifierResolution {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// Locate the file a module specifier refers to.
///
/// `base` is the path of the referencing file or its directory; a trailing
/// `index.ts` segment is stripped for the second probe round, so callers
/// may pass either form. Probe order:
///
/// 1. `<base>/<spec>.ts`
/// 2. `<base>/<spec>.tsx`
/// 3. `<base>/<spec>/index.ts`
/// 4. the same three against the stripped base
/// 5. `<stripped base>/<spec>/<stem>.ts` and `.tsx`, where `<stem>` is the
///    specifier's last segment (a same-named file in a directory, a layout
///    some packages use instead of `index.ts`)
#[must_use]
pub fn resolve_specifier(spec: &str, base: &Path) -> SpecifierResolution {
    let mut candidates = Vec::new();
    push_probes(&mut candidates, base, spec);

    let stripped = strip_index_segment(base);
    if stripped != base {
        push_probes(&mut candidates, stripped, spec);
        candidates.push(stripped.join(spec).join(format!("{}.ts", stem_of(spec))));
        candidates.push(stripped.join(spec).join(format!("{}.tsx", stem_of(spec))));
    } else {
        candidates.push(base.join(spec).join(format!("{}.ts", stem_of(spec))));
        candidates.push(base.join(spec).join(format!("{}.tsx", stem_of(spec))));
    }

    let mut tried = Vec::new();
    for candidate in candidates {
        if candidate.is_file() {
            return SpecifierResolution {
                resolved: Some(candidate),
                tried,
            };
        }
        tried.push(candidate);
    }

    SpecifierResolution {
        resolved: None,
        tried,
    }
}

fn push_probes(candidates: &mut Vec<PathBuf>, base: &Path, spec: &str) {
    candidates.push(base.join(format!("{spec}.ts")));
    candidates.push(base.join(format!("{spec}.tsx")));
    candidates.push(base.join(spec).join("index.ts"));
}

/// Drop a trailing `index.ts` segment, leaving the containing directory.
fn strip_index_segment(path: &Path) -> &Path {
    if path.file_name().is_some_and(|n| n == "index.ts") {
        path.parent().unwrap_or(path)
    } else {
        path
    }
}

/// Last path segment of a specifier (`./a/b` -> `b`).
fn stem_of(spec: &str) -> &str {
    spec.rsplit('/').next().unwrap_or(spec)
}

/// Compute the module specifier to emit for a concrete file path.
///
/// The result is relative to `types_root` (the directory holding the
/// declaration artifact), with the `.ts`/`.tsx` extension and any trailing
/// `index.ts` segment stripped, doubled separators collapsed, and no
/// trailing slash.
#[must_use]
pub fn declaration_specifier(path: &Path, types_root: &Path) -> String {
    let rel = relative_path(types_root, path);
    let mut s = rel.to_string_lossy().replace('\\', "/");

    // Strip whole segments only; a file named `myindex.ts` keeps its stem.
    if s == "index.ts" {
        s.clear();
    } else if let Some(stripped) = s.strip_suffix("/index.ts") {
        let keep = stripped.len();
        s.truncate(keep);
    }
    if let Some(pos) = s.find(".tsx").or_else(|| s.find(".ts")) {
        s.truncate(pos);
    }
    while s.contains("//") {
        s = s.replace("//", "/");
    }
    while s.contains("  ") {
        s = s.replace("  ", " ");
    }
    let s = s.trim_end_matches('/');

    if s.is_empty() {
        ".".to_string()
    } else {
        s.to_string()
    }
}

/// Relative path from `from` to `to`, by component comparison.
///
/// Both paths must be of the same kind (both absolute or both relative to
/// the same root). `.` and `..` segments left over from specifier joins
/// are collapsed first so they never leak into the output.
fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize_components(from);
    let to = normalize_components(to);
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let mut shared = 0;
    while shared < from.len() && shared < to.len() && from[shared] == to[shared] {
        shared += 1;
    }

    let mut rel = PathBuf::new();
    for _ in shared..from.len() {
        rel.push("..");
    }
    for component in &to[shared..] {
        rel.push(component);
    }
    rel
}

/// Collapse `.` and `..` components lexically, without touching the
/// filesystem.
fn normalize_components(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolves_direct_ts_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("util.ts"), "export const x = 1;").unwrap();

        let res = resolve_specifier("./util", dir.path());
        assert_eq!(res.resolved, Some(dir.path().join("./util.ts")));
    }

    #[test]
    fn test_resolves_tsx_before_index() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("widget.tsx"), "export const w = 1;").unwrap();
        fs::create_dir(dir.path().join("widget")).unwrap();
        fs::write(dir.path().join("widget").join("index.ts"), "").unwrap();

        let res = resolve_specifier("./widget", dir.path());
        assert_eq!(res.resolved, Some(dir.path().join("./widget.tsx")));
    }

    #[test]
    fn test_falls_back_to_directory_index() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("util")).unwrap();
        fs::write(dir.path().join("util").join("index.ts"), "").unwrap();

        let res = resolve_specifier("./util", dir.path());
        assert_eq!(
            res.resolved,
            Some(dir.path().join("./util").join("index.ts"))
        );
    }

    #[test]
    fn test_strips_index_segment_from_base() {
        // The referencing "base" is the entry file itself, not its directory.
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("util.ts"), "").unwrap();

        let res = resolve_specifier("./util", &dir.path().join("index.ts"));
        assert_eq!(res.resolved, Some(dir.path().join("./util.ts")));
    }

    #[test]
    fn test_same_named_file_in_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("parser")).unwrap();
        fs::write(dir.path().join("parser").join("parser.ts"), "").unwrap();

        let res = resolve_specifier("./parser", dir.path());
        assert_eq!(
            res.resolved,
            Some(dir.path().join("./parser").join("parser.ts"))
        );
    }

    #[test]
    fn test_unresolved_records_tried_candidates() {
        let dir = tempdir().unwrap();

        let res = resolve_specifier("./ghost", dir.path());
        assert!(res.resolved.is_none());
        assert!(!res.tried.is_empty());
    }

    #[test]
    fn test_declaration_specifier_strips_extension() {
        let got = declaration_specifier(
            Path::new("/repo/packages/foo/src/util.ts"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/foo/src/util");
    }

    #[test]
    fn test_declaration_specifier_strips_index_segment() {
        let got = declaration_specifier(
            Path::new("/repo/packages/foo/src/index.ts"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/foo/src");
    }

    #[test]
    fn test_declaration_specifier_tsx() {
        let got = declaration_specifier(
            Path::new("/repo/packages/ui/src/button.tsx"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/ui/src/button");
    }

    #[test]
    fn test_declaration_specifier_collapses_parent_segments() {
        // A parent-relative specifier joined onto the referencing directory
        // leaves `..` components in the concrete path.
        let got = declaration_specifier(
            Path::new("/repo/packages/foo/src/../shared/util.ts"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/foo/shared/util");
    }

    #[test]
    fn test_declaration_specifier_keeps_file_named_like_index() {
        let got = declaration_specifier(
            Path::new("/repo/packages/foo/src/myindex.ts"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/foo/src/myindex");
    }

    #[test]
    fn test_declaration_specifier_plain_directory() {
        let got = declaration_specifier(
            Path::new("/repo/packages/foo/src"),
            Path::new("/repo/@types"),
        );
        assert_eq!(got, "../packages/foo/src");
    }
}
