//! Export statement classifier.
//!
//! Takes one normalized fragment (trimmed, starting with `export`) and
//! sorts it into a closed set of syntactic kinds. First match wins; a
//! fragment matching no kind is `Unrecognized` and contributes no binding.

/// One classified export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatement {
    /// `export * from './x'` — followed by recursion, produces no binding.
    StarReexport { specifier: String },
    /// `export * as ns from './x'`
    NamespaceReexport {
        name: String,
        specifier: Option<String>,
    },
    /// `export { a, b } from './x'` — specifier optional for local re-exports.
    NamedReexport {
        names: Vec<String>,
        specifier: Option<String>,
    },
    /// `export const x = ...`, including array/object destructuring.
    ConstExport { names: Vec<String> },
    /// `export type T = ...` or `export type { T, U } from './x'`.
    TypeExport {
        names: Vec<String>,
        specifier: Option<String>,
    },
    /// `export function f(...)`
    FunctionExport { name: String },
    /// `export interface I {...}`
    InterfaceExport { name: String },
    /// Anything else (`export default`, `export class`, `export =`, ...).
    Unrecognized { raw: String },
}

/// Classify one export fragment.
#[must_use]
pub fn classify(fragment: &str) -> ExportStatement {
    let line = fragment.trim();

    if line.starts_with("export * from") {
        if let Some(spec) = quoted_specifier(line) {
            return ExportStatement::StarReexport { specifier: spec };
        }
        return unrecognized(line);
    }

    if line.starts_with("export * as") {
        if let Some(name) = between(line, "as ", " from") {
            return ExportStatement::NamespaceReexport {
                name: name.trim().to_string(),
                specifier: quoted_specifier(line),
            };
        }
        return unrecognized(line);
    }

    if line.starts_with("export {") {
        let names = brace_names(line);
        if names.is_empty() {
            return unrecognized(line);
        }
        return ExportStatement::NamedReexport {
            names,
            specifier: quoted_specifier(line),
        };
    }

    if line.starts_with("export const") {
        let names = const_names(line);
        if names.is_empty() {
            return unrecognized(line);
        }
        return ExportStatement::ConstExport { names };
    }

    if line.starts_with("export type") {
        let names = type_names(line);
        if names.is_empty() {
            return unrecognized(line);
        }
        return ExportStatement::TypeExport {
            names,
            specifier: quoted_specifier(line),
        };
    }

    if line.starts_with("export function") {
        if let Some(name) = ident_after(line, "export function") {
            return ExportStatement::FunctionExport { name };
        }
        return unrecognized(line);
    }

    if line.starts_with("export interface") {
        if let Some(name) = ident_after(line, "export interface") {
            return ExportStatement::InterfaceExport { name };
        }
        return unrecognized(line);
    }

    unrecognized(line)
}

fn unrecognized(line: &str) -> ExportStatement {
    ExportStatement::Unrecognized {
        raw: line.to_string(),
    }
}

/// Extract the first single-quoted string in the fragment.
fn quoted_specifier(line: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"'([^']*)'").ok()?;
    re.captures(line).map(|c| c[1].to_string())
}

/// Text between the first occurrence of `start` and the following `end`.
fn between<'a>(line: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = line.find(start)? + start.len();
    let to = line[from..].find(end)? + from;
    Some(&line[from..to])
}

/// Names inside the first `{ ... }` group, comma-split and trimmed.
fn brace_names(line: &str) -> Vec<String> {
    let Some(inner) = between(line, "{", "}") else {
        return Vec::new();
    };
    split_names(inner)
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

/// Bound names of a const export.
///
/// Three shapes, mirroring what actually occurs in entry files:
/// - `export const [a, b] = ...` — the array-destructured names
/// - `export const { a } = obj` — the right-hand identifier
/// - `export const x: T = ...` — the identifier, annotation stripped
fn const_names(line: &str) -> Vec<String> {
    if line.starts_with("export const [") {
        let Some(inner) = between(line, "[", "]") else {
            return Vec::new();
        };
        return split_names(strip_annotation(inner));
    }

    if line.starts_with("export const {") {
        let Some(eq) = line.find('=') else {
            return Vec::new();
        };
        return ident_at(&line[eq + 1..]).into_iter().collect();
    }

    let Some(bound) = between(line, "export const ", "=") else {
        return Vec::new();
    };
    split_names(strip_annotation(bound))
}

/// Drop a `:`-type annotation and everything after it.
fn strip_annotation(s: &str) -> &str {
    match s.find(':') {
        Some(pos) => &s[..pos],
        None => s,
    }
}

/// Names of a type export, each tagged with a `type ` prefix so the
/// emitter distinguishes type-only bindings from value bindings.
fn type_names(line: &str) -> Vec<String> {
    let rest = line.strip_prefix("export type").unwrap_or("").trim_start();
    // A brace directly after `export type` is a name list; a brace further
    // along is the right-hand side of an alias.
    let names: Vec<String> = if rest.starts_with('{') {
        brace_names(rest)
    } else {
        ident_at(rest).into_iter().collect()
    };
    names.into_iter().map(|n| format!("type {n}")).collect()
}

/// First identifier token after a prefix.
fn ident_after(line: &str, prefix: &str) -> Option<String> {
    ident_at(line.strip_prefix(prefix)?)
}

/// First identifier token in a string, skipping leading whitespace.
fn ident_at(s: &str) -> Option<String> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_reexport() {
        assert_eq!(
            classify("export * from './nested'"),
            ExportStatement::StarReexport {
                specifier: "./nested".to_string()
            }
        );
    }

    #[test]
    fn test_namespace_reexport() {
        assert_eq!(
            classify("export * as helpers from './helpers'"),
            ExportStatement::NamespaceReexport {
                name: "helpers".to_string(),
                specifier: Some("./helpers".to_string()),
            }
        );
    }

    #[test]
    fn test_named_reexport_with_specifier() {
        assert_eq!(
            classify("export { a, b, c } from './lib'"),
            ExportStatement::NamedReexport {
                names: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                specifier: Some("./lib".to_string()),
            }
        );
    }

    #[test]
    fn test_named_reexport_local() {
        assert_eq!(
            classify("export { alpha }"),
            ExportStatement::NamedReexport {
                names: vec!["alpha".to_string()],
                specifier: None,
            }
        );
    }

    #[test]
    fn test_const_export_simple() {
        assert_eq!(
            classify("export const version = '1.0.0'"),
            ExportStatement::ConstExport {
                names: vec!["version".to_string()]
            }
        );
    }

    #[test]
    fn test_const_export_annotation_stripped() {
        assert_eq!(
            classify("export const limit: number = 10"),
            ExportStatement::ConstExport {
                names: vec!["limit".to_string()]
            }
        );
    }

    #[test]
    fn test_const_export_array_destructuring() {
        assert_eq!(
            classify("export const [first, second] = pair"),
            ExportStatement::ConstExport {
                names: vec!["first".to_string(), "second".to_string()]
            }
        );
    }

    #[test]
    fn test_const_export_object_destructuring_takes_rhs() {
        assert_eq!(
            classify("export const { a, b } = bundle"),
            ExportStatement::ConstExport {
                names: vec!["bundle".to_string()]
            }
        );
    }

    #[test]
    fn test_type_export_alias() {
        assert_eq!(
            classify("export type Props = { x: number }"),
            ExportStatement::TypeExport {
                names: vec!["type Props".to_string()],
                specifier: None,
            }
        );
    }

    #[test]
    fn test_type_export_generic() {
        assert_eq!(
            classify("export type Result<T> = T | Error"),
            ExportStatement::TypeExport {
                names: vec!["type Result".to_string()],
                specifier: None,
            }
        );
    }

    #[test]
    fn test_type_export_braced_with_specifier() {
        assert_eq!(
            classify("export type { T, U } from './types'"),
            ExportStatement::TypeExport {
                names: vec!["type T".to_string(), "type U".to_string()],
                specifier: Some("./types".to_string()),
            }
        );
    }

    #[test]
    fn test_function_export() {
        assert_eq!(
            classify("export function parse(input: string): Ast {"),
            ExportStatement::FunctionExport {
                name: "parse".to_string()
            }
        );
    }

    #[test]
    fn test_function_export_generic() {
        assert_eq!(
            classify("export function identity<T>(x: T): T {"),
            ExportStatement::FunctionExport {
                name: "identity".to_string()
            }
        );
    }

    #[test]
    fn test_interface_export() {
        assert_eq!(
            classify("export interface Options { verbose: boolean }"),
            ExportStatement::InterfaceExport {
                name: "Options".to_string()
            }
        );
    }

    #[test]
    fn test_export_default_unrecognized() {
        assert!(matches!(
            classify("export default foo"),
            ExportStatement::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_export_class_unrecognized() {
        assert!(matches!(
            classify("export class Widget {}"),
            ExportStatement::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_export_assignment_unrecognized() {
        assert!(matches!(
            classify("export = legacy"),
            ExportStatement::Unrecognized { .. }
        ));
    }

    #[test]
    fn test_star_reexport_takes_priority_over_namespace() {
        // `export * from` must never be read as a namespace re-export.
        let got = classify("export * from './a'");
        assert!(matches!(got, ExportStatement::StarReexport { .. }));
    }
}
